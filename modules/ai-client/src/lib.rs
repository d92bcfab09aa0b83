pub mod error;
pub mod gemini;
pub mod traits;
pub mod util;

pub use error::AiError;
pub use gemini::{Gemini, GeminiPromptBuilder};
pub use traits::{Agent, Message, MessageRole, PromptBuilder};
pub use util::{error_excerpt, truncate_to_char_boundary};
