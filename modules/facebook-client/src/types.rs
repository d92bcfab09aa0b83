use serde::Deserialize;

/// Image bytes to upload with a photo post.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: String,
}

impl PhotoUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
            file_name: "image.jpg".to_string(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Response to `/{page-id}/photos` and `/{page-id}/feed`.
///
/// Photo uploads return the photo `id` plus the feed `post_id`; feed posts
/// return only `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub post_id: Option<String>,
}

impl PostResponse {
    /// The feed story id when present, otherwise the object id.
    pub fn story_id(&self) -> &str {
        self.post_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<i64>,
}

impl GraphErrorBody {
    pub fn describe(&self) -> String {
        match (&self.kind, self.code) {
            (Some(kind), Some(code)) => format!("{} ({kind}, code {code})", self.message),
            (Some(kind), None) => format!("{} ({kind})", self.message),
            (None, Some(code)) => format!("{} (code {code})", self.message),
            (None, None) => self.message.clone(),
        }
    }
}
