use crate::core::summarizer::{SummarizeRequest, Summarizer, Summary};
use crate::error::Error;

/// Validates the summarization input and runs one round trip against the
/// generation collaborator. Both checks abort before anything leaves the
/// process: empty fields and malformed JSON never reach the collaborator.
pub async fn summarize_responses<A>(ai: &A, request: SummarizeRequest) -> Result<Summary, Error>
where
    A: Summarizer,
{
    if request.research_question.trim().is_empty() || request.responses.trim().is_empty() {
        return Err(Error::MissingInformation(
            "please provide both a research question and survey responses".into(),
        ));
    }
    serde_json::from_str::<serde_json::Value>(&request.responses)?;
    ai.summarize(&request).await
}
