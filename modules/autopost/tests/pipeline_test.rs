//! Pipeline scenarios over mock collaborators.
//!
//! Each test: mock feed + temp link file + mock generator/publisher →
//! Pipeline::run() → assert outcome and which stages were reached.
//! No network.

use std::io::Write;
use std::sync::Arc;

use autopost::testing::{mock_pipeline, MockFeed, MockGenerator, MockPublisher, TEST_IMAGE_SEARCH_URL};
use autopost::{Pipeline, RunOutcome, Stage};
use autopost_common::{ImageConfig, PipelineError, Service};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

fn link_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_headline_and_link_compose_expected_post() {
    let feed = Arc::new(MockFeed::with_titles(&["Team A wins championship"]));
    let generator = Arc::new(MockGenerator::replying("Don't miss this! Click now."));
    let publisher = Arc::new(MockPublisher::succeeding());
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = mock_pipeline(
        feed.clone(),
        generator.clone(),
        publisher.clone(),
        links.path(),
        7,
    );
    let outcome = pipeline.run().await;

    let (headline, post, image, receipt) = match outcome {
        RunOutcome::Published {
            headline,
            post,
            image,
            receipt,
        } => (headline, post, image, receipt),
        other => panic!("expected a published outcome, got {other:?}"),
    };

    assert_eq!(headline.as_str(), "Team A wins championship");
    assert_eq!(post.as_str(), "Don't miss this! Click now.\n\nhttp://x.test/a");
    assert_eq!(
        image.as_ref().map(|i| i.as_str()),
        Some("https://img.test/th?q=Team%20A%20wins%20championship")
    );
    assert!(receipt.with_image);

    assert_eq!(generator.headlines(), vec![headline]);
    let posts = publisher.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, post);
    assert_eq!(posts[0].1, image);
}

#[tokio::test]
async fn same_seed_gives_same_choices() {
    let titles = ["One", "Two", "Three", "Four", "Five"];
    let links = link_file(&["https://l.test/1", "https://l.test/2", "https://l.test/3"]);

    let mut posts = Vec::new();
    for _ in 0..2 {
        let publisher = Arc::new(MockPublisher::succeeding());
        let mut pipeline = mock_pipeline(
            Arc::new(MockFeed::with_titles(&titles)),
            Arc::new(MockGenerator::replying("Copy")),
            publisher.clone(),
            links.path(),
            1234,
        );
        assert!(pipeline.run().await.is_published());
        posts.push(publisher.posts().remove(0));
    }

    assert_eq!(posts[0], posts[1]);
}

#[tokio::test]
async fn picks_stay_within_inputs_across_seeds() {
    let titles = ["Alpha", "Beta", "Gamma"];
    let link_lines = ["https://l.test/1", "https://l.test/2"];
    let links = link_file(&link_lines);

    for seed in 0..25 {
        let generator = Arc::new(MockGenerator::replying("Copy"));
        let publisher = Arc::new(MockPublisher::succeeding());
        let mut pipeline = mock_pipeline(
            Arc::new(MockFeed::with_titles(&titles)),
            generator.clone(),
            publisher.clone(),
            links.path(),
            seed,
        );
        pipeline.run().await;

        let headline = generator.headlines().remove(0);
        assert!(titles.contains(&headline.as_str()));

        let (post, _) = publisher.posts().remove(0);
        let link = post.as_str().strip_prefix("Copy\n\n").unwrap();
        assert!(link_lines.contains(&link));
    }
}

#[tokio::test]
async fn text_only_mode_publishes_without_image() {
    let publisher = Arc::new(MockPublisher::succeeding());
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = Pipeline::builder()
        .feed(Arc::new(MockFeed::with_titles(&["Headline"])))
        .generator(Arc::new(MockGenerator::replying("Copy")))
        .publisher(publisher.clone())
        .links_path(links.path())
        .image(ImageConfig {
            search_url: TEST_IMAGE_SEARCH_URL.to_string(),
            attach: false,
        })
        .rng(Box::new(StdRng::seed_from_u64(0)))
        .build();

    let outcome = pipeline.run().await;

    assert!(outcome.is_published());
    assert_eq!(publisher.posts()[0].1, None);
}

// ---------------------------------------------------------------------------
// Short-circuit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_feed_halts_before_anything_else() {
    let generator = Arc::new(MockGenerator::replying("Copy"));
    let publisher = Arc::new(MockPublisher::succeeding());
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = mock_pipeline(
        Arc::new(MockFeed::empty()),
        generator.clone(),
        publisher.clone(),
        links.path(),
        0,
    );
    let outcome = pipeline.run().await;

    assert_eq!(outcome.halted_at(), Some(Stage::Headline));
    assert!(matches!(
        outcome,
        RunOutcome::Halted {
            error: PipelineError::EmptyFeed,
            ..
        }
    ));
    assert_eq!(generator.calls(), 0);
    assert_eq!(publisher.calls(), 0);
}

#[tokio::test]
async fn feed_failure_halts_at_headline() {
    let feed = Arc::new(MockFeed::failing("connection refused"));
    let publisher = Arc::new(MockPublisher::succeeding());
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = mock_pipeline(
        feed.clone(),
        Arc::new(MockGenerator::replying("Copy")),
        publisher.clone(),
        links.path(),
        0,
    );
    let outcome = pipeline.run().await;

    assert_eq!(feed.calls(), 1);
    assert_eq!(outcome.halted_at(), Some(Stage::Headline));
    assert_eq!(publisher.calls(), 0);
}

#[tokio::test]
async fn missing_link_file_halts_before_generation() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(MockGenerator::replying("Copy"));
    let publisher = Arc::new(MockPublisher::succeeding());

    let mut pipeline = mock_pipeline(
        Arc::new(MockFeed::with_titles(&["Headline"])),
        generator.clone(),
        publisher.clone(),
        &dir.path().join("links.txt"),
        0,
    );
    let outcome = pipeline.run().await;

    assert_eq!(outcome.halted_at(), Some(Stage::Link));
    assert!(matches!(
        outcome,
        RunOutcome::Halted {
            error: PipelineError::LinkFileMissing(_),
            ..
        }
    ));
    assert_eq!(generator.calls(), 0);
    assert_eq!(publisher.calls(), 0);
}

#[tokio::test]
async fn blank_link_file_halts_at_link() {
    let generator = Arc::new(MockGenerator::replying("Copy"));
    let links = link_file(&["", "   ", ""]);

    let mut pipeline = mock_pipeline(
        Arc::new(MockFeed::with_titles(&["Headline"])),
        generator.clone(),
        Arc::new(MockPublisher::succeeding()),
        links.path(),
        0,
    );
    let outcome = pipeline.run().await;

    assert!(matches!(
        outcome,
        RunOutcome::Halted {
            stage: Stage::Link,
            error: PipelineError::NoLinks(_),
        }
    ));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn generation_failure_never_publishes() {
    let publisher = Arc::new(MockPublisher::succeeding());
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = mock_pipeline(
        Arc::new(MockFeed::with_titles(&["Headline"])),
        Arc::new(MockGenerator::failing("quota exceeded")),
        publisher.clone(),
        links.path(),
        0,
    );
    let outcome = pipeline.run().await;

    match outcome {
        RunOutcome::Halted {
            stage: Stage::Generate,
            error: PipelineError::External { service, message },
        } => {
            assert_eq!(service, Service::Gemini);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected generate failure, got {other:?}"),
    }
    assert_eq!(publisher.calls(), 0);
}

#[tokio::test]
async fn missing_gemini_key_halts_at_generate() {
    let publisher = Arc::new(MockPublisher::succeeding());
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = mock_pipeline(
        Arc::new(MockFeed::with_titles(&["Headline"])),
        Arc::new(MockGenerator::missing_key()),
        publisher.clone(),
        links.path(),
        0,
    );
    let outcome = pipeline.run().await;

    assert!(matches!(
        outcome,
        RunOutcome::Halted {
            stage: Stage::Generate,
            error: PipelineError::MissingConfig(ref names),
        } if names == &vec!["GEMINI_API_KEY"]
    ));
    assert_eq!(publisher.calls(), 0);
}

#[tokio::test]
async fn publish_stage_failure_halts_after_one_attempt() {
    let publisher = Arc::new(MockPublisher::failing(
        Service::Facebook,
        "Graph API error (status 500): An unknown error occurred",
    ));
    let links = link_file(&["http://x.test/a"]);

    let mut pipeline = mock_pipeline(
        Arc::new(MockFeed::with_titles(&["Headline"])),
        Arc::new(MockGenerator::replying("Copy")),
        publisher.clone(),
        links.path(),
        0,
    );
    let outcome = pipeline.run().await;

    assert_eq!(outcome.halted_at(), Some(Stage::Publish));
    assert_eq!(publisher.calls(), 1);
}
