// Publisher: push the composed post to the Facebook page, with the headline
// image attached when one is given.

use async_trait::async_trait;
use facebook_client::{GraphClient, PhotoUpload};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::info;

use autopost_common::{
    ComposedPost, ImageReference, PipelineError, PublishReceipt, PublisherConfig, Service,
};

use crate::traits::PagePublisher;

const IMAGE_USER_AGENT: &str = "autopost/0.1";

pub struct GraphPublisher {
    config: PublisherConfig,
    http: reqwest::Client,
}

impl GraphPublisher {
    pub fn new(config: PublisherConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Page id and access token, or every missing variable name.
    fn credentials(&self) -> Result<(&str, &str), PipelineError> {
        match (
            self.config.page_id.as_deref(),
            self.config.access_token.as_deref(),
        ) {
            (Some(page_id), Some(token)) => Ok((page_id, token)),
            (page_id, token) => {
                let mut missing = Vec::new();
                if page_id.is_none() {
                    missing.push("FACEBOOK_PAGE_ID");
                }
                if token.is_none() {
                    missing.push("FACEBOOK_ACCESS_TOKEN");
                }
                Err(PipelineError::MissingConfig(missing))
            }
        }
    }

    async fn fetch_image(&self, image: &ImageReference) -> Result<PhotoUpload, PipelineError> {
        let resp = self
            .http
            .get(image.as_str())
            .header(USER_AGENT, IMAGE_USER_AGENT)
            .send()
            .await
            .map_err(|e| PipelineError::external(Service::Image, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::external(
                Service::Image,
                format!("HTTP {status} from {image}"),
            ));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| PipelineError::external(Service::Image, e))?;
        if bytes.is_empty() {
            return Err(PipelineError::external(
                Service::Image,
                format!("empty body from {image}"),
            ));
        }

        info!(bytes = bytes.len(), content_type = ?content_type, "Image fetched");

        let photo = PhotoUpload::new(bytes.to_vec());
        Ok(match content_type {
            Some(content_type) => photo.with_content_type(content_type),
            None => photo,
        })
    }
}

#[async_trait]
impl PagePublisher for GraphPublisher {
    async fn publish(
        &self,
        post: &ComposedPost,
        image: Option<&ImageReference>,
    ) -> Result<PublishReceipt, PipelineError> {
        let (page_id, token) = self.credentials()?;
        let client = GraphClient::new(token).with_base_url(&self.config.graph_url);

        let response = match image {
            Some(image) => {
                let photo = self.fetch_image(image).await?;
                client.publish_photo(page_id, photo, post.as_str()).await
            }
            None => client.publish_feed(page_id, post.as_str()).await,
        }
        .map_err(|e| PipelineError::external(Service::Facebook, e))?;

        Ok(PublishReceipt {
            post_id: response.story_id().to_string(),
            with_image: image.is_some(),
        })
    }
}

/// Logs the post instead of sending it.
pub struct DryRunPublisher;

#[async_trait]
impl PagePublisher for DryRunPublisher {
    async fn publish(
        &self,
        post: &ComposedPost,
        image: Option<&ImageReference>,
    ) -> Result<PublishReceipt, PipelineError> {
        info!(
            chars = post.as_str().chars().count(),
            image_url = image.map(ImageReference::as_str),
            "Dry run: not publishing to Facebook"
        );
        Ok(PublishReceipt {
            post_id: "dry-run".to_string(),
            with_image: image.is_some(),
        })
    }
}
