// Link picker: one promotional URL per non-blank line of a local file.

use std::io::ErrorKind;
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;

use autopost_common::{LinkCandidate, PipelineError};

/// Every non-blank line, trimmed.
pub fn parse_links(contents: &str) -> Vec<LinkCandidate> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(LinkCandidate::new)
        .collect()
}

pub fn load_links(path: &Path) -> Result<Vec<LinkCandidate>, PipelineError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(parse_links(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(PipelineError::LinkFileMissing(path.to_path_buf()))
        }
        Err(e) => Err(PipelineError::LinkFileUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Load `path` and pick one candidate uniformly at random.
pub fn pick_link<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<LinkCandidate, PipelineError> {
    let links = load_links(path)?;
    tracing::debug!(path = %path.display(), candidates = links.len(), "Loaded links");

    links
        .choose(rng)
        .cloned()
        .ok_or_else(|| PipelineError::NoLinks(path.to_path_buf()))
}
