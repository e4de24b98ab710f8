//! Audio/video track merging through ffmpeg.

use std::path::Path;
use std::process::Stdio;

use tokio::fs;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::fs::StorageRouter;

/// Muxes a separately-hosted video and audio track into one output file.
pub struct MediaMerger {
    router: StorageRouter,
}

impl MediaMerger {
    pub fn new(router: StorageRouter) -> Self {
        Self { router }
    }

    /// Merge the two buffers into the routed destination for `name`.
    ///
    /// When ffmpeg fails (the stream usually has no audio track at all),
    /// the raw video bytes are stored instead. The temporary track files
    /// are removed on both paths.
    pub async fn merge(&self, name: &str, video: &[u8], audio: &[u8]) -> Result<()> {
        let dest_dir = self.router.resolve_destination(name)?;
        let dest = dest_dir.join(name);

        let tag = uuid::Uuid::new_v4();
        let temp_video = dest_dir.join(format!(".{}_video.mp4", tag));
        let temp_audio = dest_dir.join(format!(".{}_audio.mp4", tag));

        let staged = async {
            fs::write(&temp_video, video).await?;
            fs::write(&temp_audio, audio).await?;
            Ok::<(), Error>(())
        }
        .await;

        let result = match staged {
            Ok(()) => match run_ffmpeg(&temp_video, &temp_audio, &dest).await {
                Ok(()) => Ok(()),
                Err(err) => {
                    tracing::warn!(
                        "Merge failed for {} ({}); storing the video track alone",
                        name,
                        err
                    );
                    self.router.write(name, video).await.map(|_| ())
                }
            },
            Err(err) => Err(err),
        };

        let _ = fs::remove_file(&temp_video).await;
        let _ = fs::remove_file(&temp_audio).await;

        result
    }
}

/// Multiplex the two streams, copying codecs without re-encoding.
async fn run_ffmpeg(video: &Path, audio: &Path, output: &Path) -> Result<()> {
    let status = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(video)
        .arg("-i")
        .arg(audio)
        .args(["-c:v", "copy", "-c:a", "copy", "-loglevel", "quiet"])
        .arg(output)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| Error::FFmpeg(format!("Failed to run ffmpeg: {}", e)))?;

    if !status.success() {
        return Err(Error::FFmpeg(format!(
            "ffmpeg exited with status: {}",
            status
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The buffers here are not real media, so ffmpeg fails (or is missing
    // entirely) and the merger must fall back to the raw video bytes.
    #[tokio::test]
    async fn test_failed_merge_falls_back_to_video_bytes_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let router = StorageRouter::new(dir.path(), "testsub").unwrap();
        let merger = MediaMerger::new(router);

        merger
            .merge("clip.mp4", b"video-bytes", b"audio-bytes")
            .await
            .unwrap();

        let out = dir.path().join("testsub").join("videos").join("clip.mp4");
        assert_eq!(std::fs::read(&out).unwrap(), b"video-bytes");

        // Nothing but the output file remains in the bucket.
        let entries: Vec<_> = std::fs::read_dir(out.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("clip.mp4")]);
    }
}
