// Test mocks for the publishing pipeline.
//
// One mock per trait boundary, each counting its calls so scenario tests can
// prove which stages ran:
// - MockFeed (FeedReader): fixed titles or a fixed failure
// - MockGenerator (CopyGenerator): fixed copy, failure, or missing key
// - MockPublisher (PagePublisher): records every post it receives

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use autopost_common::{
    ComposedPost, GeneratedCopy, Headline, ImageConfig, ImageReference, PipelineError,
    PublishReceipt, Service,
};

use crate::pipeline::Pipeline;
use crate::traits::{CopyGenerator, FeedReader, PagePublisher};

pub const TEST_IMAGE_SEARCH_URL: &str = "https://img.test/th?q=";

// ---------------------------------------------------------------------------
// MockFeed
// ---------------------------------------------------------------------------

pub struct MockFeed {
    titles: Result<Vec<String>, String>,
    calls: AtomicUsize,
}

impl MockFeed {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            titles: Ok(titles.iter().map(|t| t.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_titles(&[])
    }

    pub fn failing(message: &str) -> Self {
        Self {
            titles: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedReader for MockFeed {
    async fn titles(&self) -> Result<Vec<String>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.titles
            .clone()
            .map_err(|message| PipelineError::external(Service::Feed, message))
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

enum GeneratorReply {
    Copy(String),
    Failure(String),
    MissingKey,
}

pub struct MockGenerator {
    reply: GeneratorReply,
    headlines: Mutex<Vec<Headline>>,
}

impl MockGenerator {
    pub fn replying(copy: &str) -> Self {
        Self::new(GeneratorReply::Copy(copy.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(GeneratorReply::Failure(message.to_string()))
    }

    pub fn missing_key() -> Self {
        Self::new(GeneratorReply::MissingKey)
    }

    fn new(reply: GeneratorReply) -> Self {
        Self {
            reply,
            headlines: Mutex::new(Vec::new()),
        }
    }

    /// Headlines received so far, in call order.
    pub fn headlines(&self) -> Vec<Headline> {
        self.headlines.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.headlines.lock().unwrap().len()
    }
}

#[async_trait]
impl CopyGenerator for MockGenerator {
    async fn generate_copy(&self, headline: &Headline) -> Result<GeneratedCopy, PipelineError> {
        self.headlines.lock().unwrap().push(headline.clone());
        match &self.reply {
            GeneratorReply::Copy(copy) => Ok(GeneratedCopy::new(copy.trim())),
            GeneratorReply::Failure(message) => {
                Err(PipelineError::external(Service::Gemini, message))
            }
            GeneratorReply::MissingKey => Err(PipelineError::MissingConfig(vec!["GEMINI_API_KEY"])),
        }
    }
}

// ---------------------------------------------------------------------------
// MockPublisher
// ---------------------------------------------------------------------------

pub struct MockPublisher {
    failure: Option<(Service, String)>,
    posts: Mutex<Vec<(ComposedPost, Option<ImageReference>)>>,
}

impl MockPublisher {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(service: Service, message: &str) -> Self {
        Self {
            failure: Some((service, message.to_string())),
            posts: Mutex::new(Vec::new()),
        }
    }

    /// Everything passed to `publish`, in call order.
    pub fn posts(&self) -> Vec<(ComposedPost, Option<ImageReference>)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PagePublisher for MockPublisher {
    async fn publish(
        &self,
        post: &ComposedPost,
        image: Option<&ImageReference>,
    ) -> Result<PublishReceipt, PipelineError> {
        self.posts
            .lock()
            .unwrap()
            .push((post.clone(), image.cloned()));

        match &self.failure {
            Some((service, message)) => Err(PipelineError::external(*service, message)),
            None => Ok(PublishReceipt {
                post_id: format!("mock_{}", self.calls()),
                with_image: image.is_some(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pipeline over the given mocks with a seeded RNG and images attached.
pub fn mock_pipeline(
    feed: Arc<MockFeed>,
    generator: Arc<MockGenerator>,
    publisher: Arc<MockPublisher>,
    links_path: &Path,
    seed: u64,
) -> Pipeline {
    Pipeline::builder()
        .feed(feed)
        .generator(generator)
        .publisher(publisher)
        .links_path(links_path)
        .image(ImageConfig {
            search_url: TEST_IMAGE_SEARCH_URL.to_string(),
            attach: true,
        })
        .rng(Box::new(StdRng::seed_from_u64(seed)))
        .build()
}
