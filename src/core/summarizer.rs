use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Input for the response-summarization collaborator. `responses` is the raw
/// JSON text pasted by the user; it is validated before any call goes out.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub responses: String,
    pub research_question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
}

/// Hosted text-generation collaborator. One round trip, no retry, no
/// streaming.
pub trait Summarizer {
    async fn summarize(&self, request: &SummarizeRequest) -> Result<Summary, Error>;
}
