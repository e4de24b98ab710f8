//! Resolved media item representation.

/// Kind of media content; decides the destination bucket and whether an
/// audio merge is attempted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Gif,
    Video,
}

impl MediaKind {
    /// Get the folder name for this media kind.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Gif => "gifs",
            MediaKind::Video => "videos",
        }
    }
}

/// One concrete, fetchable media resource derived from a submission.
///
/// Gallery posts yield several of these, numbered `<post_id>_1`,
/// `<post_id>_2`, ... so identifiers stay unique within a run.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    /// Unique item identifier.
    pub id: String,

    /// Final fetchable URL.
    pub url: String,

    /// Inferred media kind.
    pub kind: MediaKind,
}
