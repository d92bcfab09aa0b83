//! Values handed from one pipeline stage to the next. Each is created once
//! and never mutated.

use std::fmt;

macro_rules! text_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_value!(
    /// Title of one feed entry.
    Headline
);

text_value!(
    /// One trimmed, non-blank line of the link file.
    LinkCandidate
);

text_value!(
    /// Promotional text returned by the language model, already trimmed.
    GeneratedCopy
);

text_value!(
    /// Final text payload: generated copy, a blank line, then the link.
    ComposedPost
);

text_value!(
    /// Image-search URL derived from a headline. Never checked for reachability.
    ImageReference
);

impl ComposedPost {
    pub fn compose(copy: &GeneratedCopy, link: &LinkCandidate) -> Self {
        Self(format!("{}\n\n{}", copy.as_str(), link.as_str()))
    }
}

impl ImageReference {
    /// Append the percent-encoded headline to `search_url`.
    pub fn for_headline(search_url: &str, headline: &Headline) -> Self {
        Self(format!(
            "{search_url}{}",
            urlencoding::encode(headline.as_str())
        ))
    }
}

/// What the publisher reports back after a successful post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub post_id: String,
    pub with_image: bool,
}
