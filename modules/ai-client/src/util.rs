/// Longest slice of an API error body kept in error messages.
const MAX_ERROR_BYTES: usize = 500;

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Shorten an HTTP error body for logs and error values.
pub fn error_excerpt(body: &str) -> String {
    let body = body.trim();
    let cut = truncate_to_char_boundary(body, MAX_ERROR_BYTES);
    if cut.len() < body.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}
