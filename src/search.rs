//! Lender search backed by the Gemini API
//!
//! Given a loan category, asks the LLM for banks or financial institutions
//! that typically offer it and returns the names as an ordered list.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::error::LendBotError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{error, info};

/// Lender search capability. The engine only sees this trait, so tests can
/// substitute a double for the network client.
#[async_trait]
pub trait LenderSearch: Send + Sync {
    /// Return an ordered list of lender names for the given loan category.
    async fn search(&self, category: &str) -> crate::Result<Vec<String>>;
}

/// Reusable Gemini client (connection-pooled)
pub struct GeminiSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiSearchClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent".to_string(),
        }
    }

    /// Build a client from the environment. Missing `GEMINI_API_KEY` is a
    /// configuration error the binary reports once at startup.
    pub fn from_env() -> crate::Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            LendBotError::ConfigError(
                "API Key is not set. Please set the GEMINI_API_KEY environment variable."
                    .to_string(),
            )
        })?;

        if api_key.is_empty() {
            return Err(LendBotError::ConfigError(
                "API Key is not set. Please set the GEMINI_API_KEY environment variable."
                    .to_string(),
            ));
        }

        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl LenderSearch for GeminiSearchClient {
    async fn search(&self, category: &str) -> crate::Result<Vec<String>> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let prompt = format!(
            "A user is looking for a {category}. What are some banks or \
             financial institutions that typically offer {category}s?"
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                top_p: 0.9,
                top_k: 40,
                max_output_tokens: 1024,
            },
        };

        info!(category = %category, "Calling Gemini API for lender search");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                LendBotError::SearchError(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error response ({}): {}", status, error_text);
            return Err(LendBotError::SearchError(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            LendBotError::LlmError(format!("Gemini parse error: {}", e))
        })?;

        let generated_text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| {
                LendBotError::SearchError("Empty response from Gemini".to_string())
            })?;

        let lenders = parse_lender_list(generated_text);

        info!(count = lenders.len(), "Gemini lender search complete");

        Ok(lenders)
    }
}

/// Split generated text into one lender name per line, dropping blanks and
/// list-bullet prefixes.
fn parse_lender_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches(['-', '*']).trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "A user is looking for a Gold Loan.".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                top_p: 0.9,
                top_k: 40,
                max_output_tokens: 1024,
            },
        };

        let json = serde_json::to_string(&request);
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Gold Loan"));
    }

    #[test]
    fn test_parse_lender_list() {
        let text = "- HDFC Bank\n\n* ICICI Bank\n  Muthoot Finance  \n\n";
        assert_eq!(
            parse_lender_list(text),
            vec!["HDFC Bank", "ICICI Bank", "Muthoot Finance"]
        );
    }

    #[test]
    fn test_parse_lender_list_empty() {
        assert!(parse_lender_list("").is_empty());
        assert!(parse_lender_list("\n  \n-\n").is_empty());
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var("GEMINI_API_KEY");

        let result = GeminiSearchClient::from_env();
        assert!(result.is_err());
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("GEMINI_API_KEY"));
    }
}
