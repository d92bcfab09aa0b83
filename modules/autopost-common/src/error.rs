use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// External collaborator a stage talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Feed,
    Gemini,
    Image,
    Facebook,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Feed => "feed",
            Service::Gemini => "gemini",
            Service::Image => "image",
            Service::Facebook => "facebook",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Feed returned no entries")]
    EmptyFeed,

    #[error("Link file not found: {}", .0.display())]
    LinkFileMissing(PathBuf),

    #[error("Link file {} could not be read: {message}", .path.display())]
    LinkFileUnreadable { path: PathBuf, message: String },

    #[error("No usable links in {}", .0.display())]
    NoLinks(PathBuf),

    #[error("Configuration error: {} not set", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("{service} request failed: {message}")]
    External { service: Service, message: String },
}

/// Coarse failure class, used for log levels and run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    MissingConfiguration,
    ExternalCall,
}

impl PipelineError {
    /// Wrap a collaborator failure, keeping the whole cause chain in the message.
    pub fn external(service: Service, err: impl fmt::Display) -> Self {
        PipelineError::External {
            service,
            message: format!("{err:#}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::EmptyFeed
            | PipelineError::LinkFileMissing(_)
            | PipelineError::LinkFileUnreadable { .. }
            | PipelineError::NoLinks(_) => ErrorKind::MissingInput,
            PipelineError::MissingConfig(_) => ErrorKind::MissingConfiguration,
            PipelineError::External { .. } => ErrorKind::ExternalCall,
        }
    }
}
