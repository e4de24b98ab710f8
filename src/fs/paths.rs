//! Destination routing and directory management.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The three destination buckets.
const BUCKETS: [&str; 3] = ["videos", "gifs", "images"];

/// Maps item file names to destination folders under
/// `<download_root>/<feed>/`.
#[derive(Debug, Clone)]
pub struct StorageRouter {
    root: PathBuf,
}

impl StorageRouter {
    /// Build the router and create all three buckets up front, so a bad
    /// download root fails the run before anything is fetched.
    pub fn new(download_root: &Path, feed: &str) -> Result<Self> {
        let root = download_root.join(feed);

        for bucket in BUCKETS {
            std::fs::create_dir_all(root.join(bucket)).map_err(|e| {
                Error::Config(format!(
                    "Cannot create download folder {}: {}. Is your download folder written correctly?",
                    root.join(bucket).display(),
                    e
                ))
            })?;
        }

        Ok(Self { root })
    }

    /// Bucket for a file name: mp4 goes to videos, gif/gifv to gifs,
    /// everything else to images.
    pub fn subfolder_for(name: &str) -> &'static str {
        if name.ends_with("mp4") {
            "videos"
        } else if name.ends_with("gif") || name.ends_with("gifv") {
            "gifs"
        } else {
            "images"
        }
    }

    /// Directory an item with this name lands in, created if absent.
    pub fn resolve_destination(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(Self::subfolder_for(name));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write the bytes at their routed destination, overwriting any
    /// previous run's file of the same name.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.resolve_destination(name)?.join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subfolder_mapping() {
        assert_eq!(StorageRouter::subfolder_for("clip.mp4"), "videos");
        assert_eq!(StorageRouter::subfolder_for("anim.gif"), "gifs");
        assert_eq!(StorageRouter::subfolder_for("anim.gifv"), "gifs");
        assert_eq!(StorageRouter::subfolder_for("pic.png"), "images");
        assert_eq!(StorageRouter::subfolder_for("pic.jpg"), "images");
    }

    #[test]
    fn test_new_creates_all_buckets() {
        let dir = tempfile::tempdir().unwrap();
        StorageRouter::new(dir.path(), "testsub").unwrap();

        for bucket in BUCKETS {
            assert!(dir.path().join("testsub").join(bucket).is_dir());
        }
    }

    #[tokio::test]
    async fn test_write_routes_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let router = StorageRouter::new(dir.path(), "testsub").unwrap();

        let path = router.write("pic.png", b"data").await.unwrap();
        assert_eq!(path, dir.path().join("testsub").join("images").join("pic.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"data");
    }
}
