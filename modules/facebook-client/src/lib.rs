pub mod error;
pub mod types;

pub use error::{FacebookError, Result};
pub use types::{PhotoUpload, PostResponse};

use reqwest::multipart::{Form, Part};
use types::ErrorEnvelope;

const BASE_URL: &str = "https://graph.facebook.com/v19.0";

pub struct GraphClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl GraphClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point at a different Graph host or API version, e.g. `https://graph.facebook.com/v21.0`.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Upload a photo to the page with `message` as its caption.
    pub async fn publish_photo(
        &self,
        page_id: &str,
        photo: PhotoUpload,
        message: &str,
    ) -> Result<PostResponse> {
        let url = format!("{}/{}/photos", self.base_url, page_id);

        let mut source = Part::bytes(photo.bytes).file_name(photo.file_name);
        if let Some(ref content_type) = photo.content_type {
            source = source.mime_str(content_type).map_err(|e| {
                FacebookError::Parse(format!("image content type {content_type:?}: {e}"))
            })?;
        }

        let form = Form::new()
            .text("message", message.to_string())
            .text("access_token", self.access_token.clone())
            .part("source", source);

        tracing::debug!(page_id, "Graph API photo upload");

        let resp = self.client.post(&url).multipart(form).send().await?;
        Self::post_response(resp).await
    }

    /// Publish a text-only post to the page feed.
    pub async fn publish_feed(&self, page_id: &str, message: &str) -> Result<PostResponse> {
        let url = format!("{}/{}/feed", self.base_url, page_id);
        let params = [("message", message), ("access_token", self.access_token.as_str())];

        tracing::debug!(page_id, "Graph API feed post");

        let resp = self.client.post(&url).form(&params).send().await?;
        Self::post_response(resp).await
    }

    async fn post_response(resp: reqwest::Response) -> Result<PostResponse> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => envelope.error.describe(),
                Err(_) => body,
            };
            return Err(FacebookError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
