pub mod config;
pub mod error;
pub mod types;

pub use config::{
    Config, FeedConfig, GeneratorConfig, ImageConfig, LinkConfig, PublisherConfig,
};
pub use error::{ErrorKind, PipelineError, Service};
pub use types::{
    ComposedPost, GeneratedCopy, Headline, ImageReference, LinkCandidate, PublishReceipt,
};
