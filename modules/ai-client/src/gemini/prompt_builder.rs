use anyhow::Result;
use async_trait::async_trait;

use crate::error::AiError;
use crate::traits::{Message, MessageRole, PromptBuilder};

use super::types::*;
use super::Gemini;

pub struct GeminiPromptBuilder {
    agent: Gemini,
    input: String,
    preamble: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
    messages: Vec<Message>,
}

impl GeminiPromptBuilder {
    pub(crate) fn new(agent: Gemini, input: String) -> Self {
        Self {
            agent,
            input,
            preamble: None,
            temperature: None,
            max_output_tokens: None,
            messages: Vec::new(),
        }
    }

    pub(crate) fn build_request(&self) -> GenerateContentRequest {
        let mut request = GenerateContentRequest::new();

        let mut system = self.preamble.clone().unwrap_or_default();
        for msg in &self.messages {
            match msg.role {
                // Gemini takes a single systemInstruction, merge into it
                MessageRole::System => {
                    if !system.is_empty() {
                        system.push_str("\n\n");
                    }
                    system.push_str(&msg.content);
                }
                MessageRole::User => request = request.content(Content::user(&msg.content)),
                MessageRole::Assistant => request = request.content(Content::model(&msg.content)),
            }
        }
        if !system.is_empty() {
            request = request.system(system);
        }

        if !self.input.is_empty() {
            request = request.content(Content::user(&self.input));
        }

        if let Some(temp) = self.temperature {
            request = request.temperature(temp);
        }
        if let Some(max) = self.max_output_tokens {
            request = request.max_output_tokens(max);
        }

        request
    }
}

#[async_trait]
impl PromptBuilder for GeminiPromptBuilder {
    fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    async fn send(self) -> Result<String> {
        let request = self.build_request();
        let response = self
            .agent
            .client()
            .generate(&self.agent.model, &request)
            .await?;

        response.text().ok_or_else(|| {
            AiError::EmptyResponse(format!(
                "No response from Gemini: {}",
                response.empty_reason()
            ))
            .into()
        })
    }
}
