//! Remote generative responder over an OpenRouter-compatible API.
//!
//! One `chat/completions` request per reply, grounded in the product record
//! through a deterministic system prompt. Any failure — transport, timeout,
//! non-2xx, malformed body — fails over synchronously to the fallback
//! composer, so the caller always receives a valid reply and never observes
//! the remote error. Exactly one attempt, no retry.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::product::ProductRecord;
use crate::responder::fallback;

/// Fixed sampling parameters for the generative call.
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 300;
const TOP_P: f64 = 0.9;

/// Where a reply came from. Both variants are equally valid to the caller;
/// the tag exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback,
}

/// A composed reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Errors from the generative-text boundary. Never escape [`RemoteResponder::respond`].
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response body")]
    MalformedBody,
}

/// Client for the remote generative-text service.
#[derive(Clone)]
pub struct RemoteResponder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl RemoteResponder {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.responder_timeout_ms))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: config.openrouter_base_url.clone(),
            api_key: config.openrouter_api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Answer the user message grounded in the product record.
    ///
    /// On remote failure the reply text equals calling
    /// [`fallback::compose`] directly with the same arguments.
    pub async fn respond(&self, message: &str, record: &ProductRecord) -> Reply {
        match self.try_remote(message, record).await {
            Ok(text) => {
                debug!(url = %record.url, "remote reply generated");
                Reply {
                    text,
                    source: ReplySource::Remote,
                }
            }
            Err(e) => {
                warn!(url = %record.url, error = %e, "remote responder failed, using fallback");
                Reply {
                    text: fallback::compose(message, record),
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    async fn try_remote(
        &self,
        message: &str,
        record: &ProductRecord,
    ) -> Result<String, ResponderError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": build_system_prompt(record) },
                { "role": "user", "content": message },
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "top_p": TOP_P,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "https://pitchbot.app")
            .header("X-Title", "Pitchbot")
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(ResponderError::Status(status));
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|_| ResponderError::MalformedBody)?;
        value["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(ResponderError::MalformedBody)
    }
}

/// Build the grounding prompt: the record restated field by field, followed
/// by the fixed behavioral instructions. Deterministic.
pub fn build_system_prompt(record: &ProductRecord) -> String {
    format!(
        "Você é um assistente de vendas experiente e especializado no produto \"{title}\".\n\
         \n\
         INFORMAÇÕES DO PRODUTO:\n\
         - Título: {title}\n\
         - Descrição: {description}\n\
         - Preço: {price}\n\
         - Benefícios: {benefits}\n\
         - Depoimentos: {testimonials}\n\
         - Call-to-Action: {cta}\n\
         \n\
         INSTRUÇÕES:\n\
         1. Responda APENAS sobre este produto específico\n\
         2. Seja persuasivo mas honesto\n\
         3. Foque nos benefícios e resultados\n\
         4. Use linguagem amigável e profissional\n\
         5. Incentive a ação (compra) quando apropriado\n\
         6. Se não souber algo específico, seja honesto\n\
         7. Mantenha respostas concisas (máximo 3 parágrafos)\n\
         \n\
         Responda às perguntas do cliente com base nessas informações.",
        title = record.title,
        description = record.description,
        price = record.price,
        benefits = record.benefits.join(", "),
        testimonials = record.testimonials.join(" | "),
        cta = record.cta,
    )
}
