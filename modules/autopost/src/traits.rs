// Trait seams for the pipeline's external collaborators.
//
// FeedReader:    syndication feed (RSS/Atom) listing entry titles
// CopyGenerator: language model turning a headline into promotional copy
// PagePublisher: social page that accepts the composed post
//
// The pipeline only talks to these, so tests swap in the mocks from
// `crate::testing` and never touch the network.

use async_trait::async_trait;

use autopost_common::{
    ComposedPost, GeneratedCopy, Headline, ImageReference, PipelineError, PublishReceipt,
};

#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Titles of every titled entry, in feed order.
    async fn titles(&self) -> Result<Vec<String>, PipelineError>;
}

#[async_trait]
pub trait CopyGenerator: Send + Sync {
    async fn generate_copy(&self, headline: &Headline) -> Result<GeneratedCopy, PipelineError>;
}

#[async_trait]
pub trait PagePublisher: Send + Sync {
    /// Post `post` to the page, as a photo caption when `image` is given,
    /// otherwise as a text-only feed item.
    async fn publish(
        &self,
        post: &ComposedPost,
        image: Option<&ImageReference>,
    ) -> Result<PublishReceipt, PipelineError>;
}
