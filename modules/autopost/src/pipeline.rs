//! Linear publishing pipeline.
//!
//! Headline → link → generated copy → publish. Each stage returns a
//! `Result`; the first failure stops the run and is reported as
//! [`RunOutcome::Halted`] with the stage it happened in. Nothing is retried
//! and nothing already done is rolled back.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{error, info, warn};
use typed_builder::TypedBuilder;

use autopost_common::{
    ComposedPost, Config, ErrorKind, Headline, ImageConfig, ImageReference, PipelineError,
    PublishReceipt,
};

use crate::generator::GeminiCopyGenerator;
use crate::headline::{self, RssFeedReader};
use crate::links;
use crate::publisher::{DryRunPublisher, GraphPublisher};
use crate::traits::{CopyGenerator, FeedReader, PagePublisher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Headline,
    Link,
    Generate,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Headline => "headline",
            Stage::Link => "link",
            Stage::Generate => "generate",
            Stage::Publish => "publish",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Published {
        headline: Headline,
        post: ComposedPost,
        image: Option<ImageReference>,
        receipt: PublishReceipt,
    },
    Halted {
        stage: Stage,
        error: PipelineError,
    },
}

impl RunOutcome {
    pub fn halted_at(&self) -> Option<Stage> {
        match self {
            RunOutcome::Halted { stage, .. } => Some(*stage),
            RunOutcome::Published { .. } => None,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, RunOutcome::Published { .. })
    }
}

#[derive(TypedBuilder)]
pub struct Pipeline {
    feed: Arc<dyn FeedReader>,
    generator: Arc<dyn CopyGenerator>,
    publisher: Arc<dyn PagePublisher>,
    #[builder(setter(into))]
    links_path: PathBuf,
    image: ImageConfig,
    rng: Box<dyn RngCore + Send>,
}

type StageFailure = (Stage, PipelineError);

fn at(stage: Stage) -> impl FnOnce(PipelineError) -> StageFailure {
    move |error| (stage, error)
}

impl Pipeline {
    /// Wire the production collaborators from `config`.
    pub fn from_config(config: &Config) -> Self {
        let publisher: Arc<dyn PagePublisher> = if config.dry_run {
            Arc::new(DryRunPublisher)
        } else {
            Arc::new(GraphPublisher::new(config.publisher.clone()))
        };

        Pipeline::builder()
            .feed(Arc::new(RssFeedReader::new(config.feed.clone())))
            .generator(Arc::new(GeminiCopyGenerator::new(config.generator.clone())))
            .publisher(publisher)
            .links_path(config.links.path.clone())
            .image(config.image.clone())
            .rng(Box::new(StdRng::from_os_rng()))
            .build()
    }

    /// Run every stage once. Never panics on stage failure; the outcome says
    /// where the run stopped and why.
    pub async fn run(&mut self) -> RunOutcome {
        match self.try_run().await {
            Ok(outcome) => outcome,
            Err((stage, error)) => {
                match error.kind() {
                    ErrorKind::MissingInput => {
                        warn!(%stage, error = %error, "Pipeline halted: no input available")
                    }
                    ErrorKind::MissingConfiguration => {
                        error!(%stage, error = %error, "Pipeline halted: configuration missing")
                    }
                    ErrorKind::ExternalCall => {
                        error!(%stage, error = %error, "Pipeline halted: external call failed")
                    }
                }
                RunOutcome::Halted { stage, error }
            }
        }
    }

    async fn try_run(&mut self) -> Result<RunOutcome, StageFailure> {
        let headline = headline::fetch_headline(self.feed.as_ref(), self.rng.as_mut())
            .await
            .map_err(at(Stage::Headline))?;
        info!(headline = %headline, "Headline selected");

        let link = links::pick_link(&self.links_path, self.rng.as_mut()).map_err(at(Stage::Link))?;
        info!(link = %link, "Link selected");

        let copy = self
            .generator
            .generate_copy(&headline)
            .await
            .map_err(at(Stage::Generate))?;
        info!(chars = copy.as_str().chars().count(), "Copy generated");

        let image = self
            .image
            .attach
            .then(|| ImageReference::for_headline(&self.image.search_url, &headline));
        if let Some(ref image) = image {
            info!(image_url = %image, "Image URL derived");
        }

        let post = ComposedPost::compose(&copy, &link);
        info!("Final post ready:\n{post}");

        let receipt = self
            .publisher
            .publish(&post, image.as_ref())
            .await
            .map_err(at(Stage::Publish))?;
        info!(
            post_id = %receipt.post_id,
            with_image = receipt.with_image,
            "Post published"
        );

        Ok(RunOutcome::Published {
            headline,
            post,
            image,
            receipt,
        })
    }
}
