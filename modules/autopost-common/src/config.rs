use std::path::PathBuf;

/// Google News "Sports" topic, United States edition.
pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp1ZEdvU0FtVnpHZ0pKVGlnQVAB?hl=en-US&gl=US&ceid=US:en";
pub const DEFAULT_LINKS_FILE: &str = "links.txt";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v19.0";
pub const DEFAULT_IMAGE_SEARCH_URL: &str = "https://tse1.mm.bing.net/th?q=";

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub feed_url: String,
}

#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone)]
pub struct PublisherConfig {
    pub page_id: Option<String>,
    pub access_token: Option<String>,
    pub graph_url: String,
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub search_url: String,
    /// When false the post goes out as a text-only feed item.
    pub attach: bool,
}

/// Application configuration loaded from environment variables.
/// Credentials are optional here; each stage reports its own missing keys.
#[derive(Clone)]
pub struct Config {
    pub feed: FeedConfig,
    pub links: LinkConfig,
    pub generator: GeneratorConfig,
    pub publisher: PublisherConfig,
    pub image: ImageConfig,
    pub dry_run: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            feed: FeedConfig {
                feed_url: or("AUTOPOST_FEED_URL", DEFAULT_FEED_URL),
            },
            links: LinkConfig {
                path: PathBuf::from(or("AUTOPOST_LINKS_FILE", DEFAULT_LINKS_FILE)),
            },
            generator: GeneratorConfig {
                api_key: get("GEMINI_API_KEY"),
                model: or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            },
            publisher: PublisherConfig {
                page_id: get("FACEBOOK_PAGE_ID"),
                access_token: get("FACEBOOK_ACCESS_TOKEN"),
                graph_url: or("FACEBOOK_GRAPH_URL", DEFAULT_GRAPH_URL),
            },
            image: ImageConfig {
                search_url: or("AUTOPOST_IMAGE_SEARCH_URL", DEFAULT_IMAGE_SEARCH_URL),
                attach: parse_flag(get("AUTOPOST_ATTACH_IMAGE"), true),
            },
            dry_run: parse_flag(get("AUTOPOST_DRY_RUN"), false),
        }
    }

    pub fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let head: String = val.chars().take(5).collect();
            format!("{}...({} chars)", head, val.chars().count())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => preview(v),
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  AUTOPOST_FEED_URL: {}", self.feed.feed_url);
        tracing::info!("  AUTOPOST_LINKS_FILE: {}", self.links.path.display());
        tracing::info!("  GEMINI_API_KEY: {}", preview_opt(&self.generator.api_key));
        tracing::info!("  GEMINI_MODEL: {}", self.generator.model);
        tracing::info!("  FACEBOOK_PAGE_ID: {}", preview_opt(&self.publisher.page_id));
        tracing::info!(
            "  FACEBOOK_ACCESS_TOKEN: {}",
            preview_opt(&self.publisher.access_token)
        );
        tracing::info!("  AUTOPOST_ATTACH_IMAGE: {}", self.image.attach);
        tracing::info!("  AUTOPOST_DRY_RUN: {}", self.dry_run);
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
