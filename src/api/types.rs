//! Reddit wire-format type definitions.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One enumerated post from the feed.
///
/// Fields the feed may omit are explicit options; a removed post simply has
/// no metadata left.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    /// Gallery image descriptors keyed by media id, in document order.
    #[serde(default)]
    pub media_metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub crosspost_parent_list: Option<Vec<Crosspost>>,
}

/// The original post a submission reposts; often carries the richer video
/// descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Crosspost {
    #[serde(default)]
    pub media: Option<SubmissionMedia>,
}

/// Media block attached to a submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionMedia {
    #[serde(default)]
    pub reddit_video: Option<RedditVideo>,
}

/// Reddit-hosted video descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditVideo {
    #[serde(default)]
    pub transcoding_status: Option<String>,
    #[serde(default)]
    pub fallback_url: Option<String>,
}

/// One gallery image descriptor out of `media_metadata`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryEntry {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub s: Option<GallerySource>,
}

/// Served rendition of a gallery image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GallerySource {
    #[serde(default)]
    pub u: Option<String>,
}

/// Envelope returned by the permalink `.json` endpoint (an array of these).
#[derive(Debug, Clone, Deserialize)]
pub struct PostListing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    pub data: ListingPost,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPost {
    #[serde(default)]
    pub secure_media: Option<SubmissionMedia>,
}

/// Submission search response page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Submission>,
    #[serde(default)]
    pub metadata: Option<SearchMetadata>,
}

/// Metadata block returned when the search is asked to size itself.
#[derive(Debug, Default, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission() {
        let json = r#"{
            "id": "q1abc",
            "url": "https://v.redd.it/gyh95hiqc0b11",
            "permalink": "/r/pics/comments/q1abc/title/",
            "created_utc": 1633046400,
            "crosspost_parent_list": [
                {
                    "media": {
                        "reddit_video": {
                            "transcoding_status": "completed",
                            "fallback_url": "https://v.redd.it/gyh95hiqc0b11/DASH_720.mp4?source=fallback"
                        }
                    }
                }
            ]
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.id, "q1abc");
        let video = submission.crosspost_parent_list.unwrap()[0]
            .media
            .as_ref()
            .unwrap()
            .reddit_video
            .clone()
            .unwrap();
        assert_eq!(video.transcoding_status.as_deref(), Some("completed"));
    }

    #[test]
    fn test_parse_submission_with_missing_fields() {
        let submission: Submission = serde_json::from_str(r#"{"id": "q1abc"}"#).unwrap();
        assert!(submission.url.is_none());
        assert!(submission.media_metadata.is_none());
        assert!(submission.crosspost_parent_list.is_none());
    }

    #[test]
    fn test_gallery_metadata_preserves_document_order() {
        let json = r#"{
            "id": "g1",
            "media_metadata": {
                "zzz": {"status": "completed"},
                "aaa": {"status": "completed"}
            }
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = submission.media_metadata.as_ref().unwrap().keys().collect();
        assert_eq!(keys, vec!["zzz", "aaa"]);
    }

    #[test]
    fn test_parse_listing_payload() {
        let json = r#"[{
            "data": {
                "children": [{
                    "data": {
                        "secure_media": {
                            "reddit_video": {
                                "transcoding_status": "completed",
                                "fallback_url": "https://v.redd.it/abc/DASH_1080.mp4"
                            }
                        }
                    }
                }]
            }
        }]"#;

        let listings: Vec<PostListing> = serde_json::from_str(json).unwrap();
        let media = listings[0].data.children[0].data.secure_media.as_ref().unwrap();
        assert!(media.reddit_video.is_some());
    }
}
