use std::collections::HashSet;

use crate::core::models::response::{Insert as ResponseInsert, Query as ResponseQuery, RewardStatus, Submit, SurveyResponse};
use crate::core::models::survey::SurveyStatus;
use crate::core::ports::repository::{ResponseCommon, Store, SurveyCommon};
use crate::error::Error;
use crate::request::Pagination;

/// Accepts one respondent submission for an active survey. Every answer must
/// reference a question that exists in the survey.
pub async fn submit_response<S>(store: &mut S, survey_id: &str, submission: Submit) -> Result<String, Error>
where
    S: Store,
{
    let survey = SurveyCommon::get(store, survey_id).await?.ok_or_else(|| Error::NotFound("survey".into()))?;
    if survey.status != SurveyStatus::Active {
        return Err(Error::BusinessError("survey is not accepting responses".into()));
    }
    let known: HashSet<&str> = survey.questions.iter().map(|q| q.id.as_str()).collect();
    if let Some(answer) = submission.answers.iter().find(|a| !known.contains(a.question_id.as_str())) {
        return Err(Error::BusinessError(format!("answer references unknown question {}", answer.question_id)));
    }
    ResponseCommon::insert(
        store,
        ResponseInsert {
            survey_id: survey_id.to_string(),
            respondent_id: submission.respondent_id,
            answers: submission.answers,
            is_verified: Some(false),
            reward_status: Some(RewardStatus::Pending),
        },
    )
    .await
}

pub async fn list_responses<S>(store: &mut S, query: ResponseQuery, pagination: Pagination) -> Result<(Vec<SurveyResponse>, i64), Error>
where
    S: Store,
{
    let total = ResponseCommon::count(store, &query).await?;
    let responses = ResponseCommon::query(store, &query, Some(pagination)).await?;
    Ok((responses, total))
}
