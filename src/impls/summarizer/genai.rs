use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::summarizer::{SummarizeRequest, Summarizer, Summary};
use crate::error::Error;

pub const API_URL_VAR: &str = "GENAI_API_URL";
pub const API_KEY_VAR: &str = "GENAI_API_KEY";
pub const MODEL_VAR: &str = "GENAI_MODEL";

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Hosted text-generation client. One JSON round trip per request, no retry
/// and no streaming.
#[derive(Clone)]
pub struct GenAi {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GenAi {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        GenAi {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let api_key = dotenv::var(API_KEY_VAR).map_err(|_| Error::ServerError(format!("environment variable {} not been set", API_KEY_VAR)))?;
        let base_url = dotenv::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = dotenv::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(GenAi::new(base_url, api_key, model))
    }

    fn prompt(request: &SummarizeRequest) -> String {
        format!(
            "You are an expert survey analyst. You will be provided with a set of survey responses \
             in JSON format, and the primary research question the survey aimed to answer. Your task \
             is to summarize the responses, identifying key trends and insights that address the \
             research question.\n\nResearch Question: {}\n\nSurvey Responses: {}\n\nSummary: ",
            request.research_question, request.responses
        )
    }
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
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl Summarizer for GenAi {
    async fn summarize(&self, request: &SummarizeRequest) -> Result<Summary, Error> {
        let url = format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::prompt(request),
                }],
            }],
        };
        debug!("summarizing {} bytes of responses with {}", request.responses.len(), self.model);
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Summarizer(format!("generation API responded with status {}", status)));
        }
        let reply: GenerateContentResponse = response.json().await?;
        let summary = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::Summarizer("generation API returned no candidates".into()))?;
        Ok(Summary { summary })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_prompt_carries_question_and_responses() {
        let prompt = GenAi::prompt(&SummarizeRequest {
            responses: r#"[{"questionId": "q1", "answer": "Very satisfied"}]"#.into(),
            research_question: "What are the main drivers of customer satisfaction?".into(),
        });
        assert!(prompt.contains("Research Question: What are the main drivers of customer satisfaction?"));
        assert!(prompt.contains(r#"Survey Responses: [{"questionId": "q1", "answer": "Very satisfied"}]"#));
    }

    #[test]
    fn test_reply_parsing() {
        let reply: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Respondents like Feature A."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply.candidates[0].content.parts[0].text, "Respondents like Feature A.");

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.candidates.is_empty());
    }
}
