// Content generator: ask Gemini for promotional copy about a headline.

use ai_client::{truncate_to_char_boundary, Agent, Gemini, PromptBuilder};
use async_trait::async_trait;
use tracing::debug;

use autopost_common::{GeneratedCopy, GeneratorConfig, Headline, PipelineError, Service};

use crate::traits::CopyGenerator;

/// Fixed instruction wrapped around the headline. The model is told to leave
/// out links and hashtags; its output is not checked for either.
pub fn build_prompt(headline: &Headline) -> String {
    format!(
        "You are a social media expert. Write a short, engaging post in English about this topic: '{headline}'. \
         The post MUST have a strong Call to Action to encourage clicks. \
         Do NOT add any links or hashtags in your response. Just provide the main text."
    )
}

pub struct GeminiCopyGenerator {
    config: GeneratorConfig,
}

impl GeminiCopyGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Fails before any network traffic when the API key is absent.
    fn agent(&self) -> Result<Gemini, PipelineError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| PipelineError::MissingConfig(vec!["GEMINI_API_KEY"]))?;

        Ok(Gemini::new(api_key, self.config.model.as_str())
            .with_base_url(self.config.base_url.as_str()))
    }
}

#[async_trait]
impl CopyGenerator for GeminiCopyGenerator {
    async fn generate_copy(&self, headline: &Headline) -> Result<GeneratedCopy, PipelineError> {
        let agent = self.agent()?;

        let text = agent
            .prompt(build_prompt(headline))
            .send()
            .await
            .map_err(|e| PipelineError::external(Service::Gemini, e))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::external(
                Service::Gemini,
                "response contained only whitespace",
            ));
        }

        debug!(
            model = %self.config.model,
            preview = truncate_to_char_boundary(text, 80),
            "Gemini copy generated"
        );
        Ok(GeneratedCopy::new(text))
    }
}
