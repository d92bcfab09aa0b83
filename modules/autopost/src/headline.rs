// Headline source: fetch the configured feed and pick one entry title.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::header::USER_AGENT;
use tracing::{debug, info};

use autopost_common::{FeedConfig, Headline, PipelineError, Service};

use crate::traits::FeedReader;

const FEED_USER_AGENT: &str = "autopost/0.1";

/// Fetch every title from `feed` and pick one uniformly at random.
pub async fn fetch_headline<R: Rng + ?Sized>(
    feed: &dyn FeedReader,
    rng: &mut R,
) -> Result<Headline, PipelineError> {
    let titles = feed.titles().await?;
    select_headline(&titles, rng)
}

/// `EmptyFeed` when there is nothing to choose from.
pub fn select_headline<R: Rng + ?Sized>(
    titles: &[String],
    rng: &mut R,
) -> Result<Headline, PipelineError> {
    titles
        .choose(rng)
        .map(|title| Headline::new(title.as_str()))
        .ok_or(PipelineError::EmptyFeed)
}

/// Parse an RSS, Atom, or JSON feed body into entry titles.
/// Entries without a title are skipped.
pub fn parse_titles(body: &[u8]) -> Result<Vec<String>, PipelineError> {
    let feed = feed_rs::parser::parse(body)
        .map_err(|e| PipelineError::external(Service::Feed, format!("malformed feed: {e}")))?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .filter(|title| !title.trim().is_empty())
        .collect())
}

pub struct RssFeedReader {
    client: reqwest::Client,
    feed_url: String,
}

impl RssFeedReader {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            feed_url: config.feed_url,
        }
    }
}

#[async_trait]
impl FeedReader for RssFeedReader {
    async fn titles(&self) -> Result<Vec<String>, PipelineError> {
        debug!(feed_url = %self.feed_url, "Fetching feed");

        let resp = self
            .client
            .get(&self.feed_url)
            .header(USER_AGENT, FEED_USER_AGENT)
            .send()
            .await
            .map_err(|e| PipelineError::external(Service::Feed, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::external(
                Service::Feed,
                format!("HTTP {status} from {}", self.feed_url),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| PipelineError::external(Service::Feed, e))?;
        let titles = parse_titles(&body)?;

        info!(feed_url = %self.feed_url, entries = titles.len(), "feed: parsed successfully");
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Sports</title>
    <link>https://news.test/</link>
    <description>Top stories</description>
    <item><title>Team A wins championship</title><link>https://news.test/1</link></item>
    <item><link>https://news.test/untitled</link><description>no title</description></item>
    <item><title>Star striker signs new deal</title><link>https://news.test/2</link></item>
  </channel>
</rss>"#;

    #[test]
    fn parse_titles_skips_untitled_entries() {
        let titles = parse_titles(RSS.as_bytes()).unwrap();
        assert_eq!(
            titles,
            vec!["Team A wins championship", "Star striker signs new deal"]
        );
    }

    #[test]
    fn parse_titles_reads_atom() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Scores</title>
  <id>urn:uuid:feed</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>Overtime thriller</title>
    <id>urn:uuid:1</id>
    <updated>2024-01-01T00:00:00Z</updated>
  </entry>
</feed>"#;
        assert_eq!(parse_titles(atom.as_bytes()).unwrap(), vec!["Overtime thriller"]);
    }

    #[test]
    fn parse_titles_rejects_garbage() {
        let err = parse_titles(b"definitely not a feed").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::External {
                service: Service::Feed,
                ..
            }
        ));
    }

    #[test]
    fn select_from_empty_list_is_empty_feed() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_headline(&[], &mut rng).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyFeed));
    }

    #[test]
    fn selection_always_comes_from_the_list() {
        let titles: Vec<String> = (0..7).map(|i| format!("Headline {i}")).collect();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_headline(&titles, &mut rng).unwrap();
            assert!(titles.iter().any(|t| t == picked.as_str()));
        }
    }

    #[test]
    fn selection_is_deterministic_for_a_seed() {
        let titles: Vec<String> = (0..10).map(|i| format!("Headline {i}")).collect();
        let a = select_headline(&titles, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = select_headline(&titles, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }
}
