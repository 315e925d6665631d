use std::env;
use std::time::Duration;

use anyhow::{Result, anyhow};
use rand::seq::SliceRandom;
use reqwest::Client;
use tokio::time::sleep;

use amora_core::users::dto::UserRecord;

use super::dto::{
    GenerateTextRequest, GeneratedReply, SamplingParams, StatusResponse, SubmitResponse,
};
use super::prompt::{MessageContext, build_prompt, response_length, temperature};
use super::sanitize::clean_response;

/// Providers tried in order; the first one that yields a usable reply wins.
const MODELS: [&str; 5] = [
    "koboldcpp/LLaMA2-13B-Tiefighter",
    "koboldcpp/Nous-Hermes-2-Mistral-7B-DPO",
    "koboldcpp/Mistral-7B-Instruct-v0.3",
    "koboldcpp/Llama-3-8B-Instruct",
    "koboldcpp/LLaMA2-13B-Psyfighter2",
];

const FALLBACK_REPLIES: [&str; 2] = [
    "Baby, thoda connection issue ho raha hai... try again? 🥺💕",
    "Jaan, technical problem aa rahi hai... message phir se send karo? 😘💖",
];

const DEFAULT_API_URL: &str = "https://aihorde.net/api/v2";
const CLIENT_AGENT: &str = "AmoraBot:2.0:telegram";
const POLL_INTERVAL: Duration = Duration::from_secs(3);
const MAX_POLL_ATTEMPTS: u32 = 40;
/// Sanitized replies at or under this length read as truncation
/// artifacts; try the next model instead.
const MIN_REPLY_LEN: usize = 15;

#[derive(Clone)]
pub struct Generator {
    client: Client,
    api_key: String,
    base_url: String,
    bot_name: String,
}

impl Generator {
    pub fn new(api_key: String, bot_name: String) -> Self {
        let base_url = env::var("HORDE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(api_key, bot_name, base_url)
    }

    pub fn with_base_url(api_key: String, bot_name: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key,
            base_url,
            bot_name,
        }
    }

    /// Generate a chat reply. Never fails: once every model is exhausted
    /// the reply is one of the canned lines, flagged so the caller can
    /// decide whether it still costs a credit.
    pub async fn chat(&self, user_message: &str, user: &UserRecord) -> GeneratedReply {
        let context = MessageContext::classify(user_message);
        let prompt = build_prompt(user.chat_mood, &context, &self.bot_name, user_message);
        let params = SamplingParams::conversational(
            response_length(&context),
            temperature(user.chat_mood, &context),
        );

        for (i, model) in MODELS.iter().enumerate() {
            log::info!(
                "Trying conversational model {}/{}: {}",
                i + 1,
                MODELS.len(),
                model
            );
            match self.try_model(model, &prompt, params.clone()).await {
                Ok(Some(text)) => return GeneratedReply {
                    text,
                    fallback: false,
                },
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Model {} failed: {}", model, e);
                    continue;
                }
            }
        }

        log::warn!("All generation models exhausted; serving a fallback reply");
        let text = FALLBACK_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_REPLIES[0])
            .to_string();
        GeneratedReply {
            text,
            fallback: true,
        }
    }

    /// Submit to one model, poll it to completion, and sanitize what
    /// comes back. `Ok(None)` means "nothing usable, try the next one".
    async fn try_model(
        &self,
        model: &str,
        prompt: &str,
        params: SamplingParams,
    ) -> Result<Option<String>> {
        let request = GenerateTextRequest {
            prompt: prompt.to_string(),
            params,
            trusted_workers: false,
            slow_workers: true,
            models: vec![model.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/generate/text/async", self.base_url))
            .header("apikey", &self.api_key)
            .header("Client-Agent", CLIENT_AGENT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("submit failed with status {}", response.status()));
        }

        let submit: SubmitResponse = response.json().await?;
        let Some(request_id) = submit.id else {
            log::warn!("Model {} returned no request id", model);
            return Ok(None);
        };
        log::info!("Model {} - request id: {}", model, request_id);

        let Some(raw) = self.poll(&request_id, model).await? else {
            return Ok(None);
        };

        Ok(clean_response(&raw, &self.bot_name).filter(|text| text.len() > MIN_REPLY_LEN))
    }

    /// Bounded status polling: gives up on fault or after the attempt cap.
    /// A failed status check is retried on the next tick rather than
    /// abandoning the request.
    async fn poll(&self, request_id: &str, model: &str) -> Result<Option<String>> {
        for _ in 0..MAX_POLL_ATTEMPTS {
            sleep(POLL_INTERVAL).await;

            let response = match self
                .client
                .get(format!(
                    "{}/generate/text/status/{}",
                    self.base_url, request_id
                ))
                .header("apikey", &self.api_key)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("Status check error for {}: {}", model, e);
                    continue;
                }
            };

            let status: StatusResponse = match response.json().await {
                Ok(status) => status,
                Err(e) => {
                    log::warn!("Unreadable status for {}: {}", model, e);
                    continue;
                }
            };

            if status.faulted {
                log::warn!("Model {} faulted", model);
                return Ok(None);
            }
            if status.done {
                return Ok(status.generations.into_iter().next().map(|g| g.text));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amora_core::users::dto::{ChatMood, PremiumStatus, UserRecord};
    use chrono::Utc;

    fn test_user() -> UserRecord {
        let now = Utc::now();
        UserRecord {
            telegram_id: 1,
            referral_code: "ab12cd34".to_string(),
            referred_by: None,
            referred_users: Vec::new(),
            messages_left: 5,
            images_left: 1,
            premium_status: PremiumStatus::Free,
            total_spent: 0,
            chat_mood: ChatMood::Normal,
            has_joined_channel: true,
            awaiting_utr: false,
            awaiting_screenshot: false,
            pending_payment_id: None,
            pending_utr: None,
            joined_at: now,
            last_active: now,
        }
    }

    #[tokio::test]
    async fn unreachable_provider_still_yields_a_reply() {
        // Nothing listens here, so every submit fails and the gateway
        // must fall through to a canned line instead of erroring.
        let generator = Generator::with_base_url(
            "test-key".to_string(),
            "Amora".to_string(),
            "http://127.0.0.1:1/api/v2".to_string(),
        );
        let reply = generator.chat("hello", &test_user()).await;
        assert!(reply.fallback);
        assert!(!reply.text.is_empty());
        assert!(FALLBACK_REPLIES.contains(&reply.text.as_str()));
    }
}
