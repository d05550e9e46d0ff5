use log::{info, warn};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use crate::core::models::survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyDraft, SurveyStatus, Update as SurveyUpdate};
use crate::core::ports::repository::{Store, SurveyCommon};
use crate::error::Error;
use crate::request::Pagination;

/// Persists a freshly authored draft and returns the assigned id. Whatever
/// status the caller put on the draft, a newly saved survey starts as a
/// draft.
pub async fn create_survey<S>(store: &mut S, created_by: &str, draft: SurveyDraft) -> Result<String, Error>
where
    S: Store,
{
    let id = SurveyCommon::insert(
        store,
        SurveyInsert {
            title: draft.title,
            description: draft.description,
            questions: draft.questions,
            privacy_terms: draft.privacy_terms,
            status: SurveyStatus::Draft,
            created_by: created_by.to_string(),
        },
    )
    .await?;
    info!("survey {} saved as draft", id);
    Ok(id)
}

pub async fn survey_detail<S>(store: &mut S, id: &str) -> Result<Survey, Error>
where
    S: Store,
{
    SurveyCommon::get(store, id).await?.ok_or_else(|| Error::NotFound("survey".into()))
}

pub async fn list_surveys<S>(store: &mut S, query: SurveyQuery, pagination: Pagination) -> Result<(Vec<Survey>, i64), Error>
where
    S: Store,
{
    let total = SurveyCommon::count(store, &query).await?;
    let surveys = SurveyCommon::query(store, &query, Some(pagination)).await?;
    Ok((surveys, total))
}

/// Replaces title, description, questions and privacy terms of a draft.
/// Surveys that already left draft are immutable here.
pub async fn update_survey<S>(store: &mut S, id: &str, draft: SurveyDraft) -> Result<(), Error>
where
    S: Store,
{
    let survey = survey_detail(store, id).await?;
    if survey.status != SurveyStatus::Draft {
        return Err(Error::BusinessError("only draft surveys can be edited".into()));
    }
    SurveyCommon::update(
        store,
        id,
        SurveyUpdate {
            title: draft.title,
            description: draft.description,
            questions: draft.questions,
            privacy_terms: draft.privacy_terms,
        },
    )
    .await
}

pub async fn delete_survey<S>(store: &mut S, id: &str) -> Result<bool, Error>
where
    S: Store,
{
    SurveyCommon::delete(store, id).await
}

/// Draft -> Active. Assigns the shareable link and returns it. Publish
/// findings are logged, never enforced.
pub async fn activate_survey<S>(store: &mut S, id: &str) -> Result<String, Error>
where
    S: Store,
{
    let survey = survey_detail(store, id).await?;
    if survey.status != SurveyStatus::Draft {
        return Err(Error::BusinessError("only draft surveys can be activated".into()));
    }
    for problem in survey.to_draft().publish_problems() {
        warn!("survey {} published with finding: {}", id, problem);
    }
    let link = unique_link();
    SurveyCommon::set_status(store, id, SurveyStatus::Active, Some(link.clone())).await?;
    info!("survey {} activated at {}", id, link);
    Ok(link)
}

/// Active -> Closed. The shareable link stays on the record.
pub async fn close_survey<S>(store: &mut S, id: &str) -> Result<(), Error>
where
    S: Store,
{
    let survey = survey_detail(store, id).await?;
    if survey.status != SurveyStatus::Active {
        return Err(Error::BusinessError("only active surveys can be closed".into()));
    }
    SurveyCommon::set_status(store, id, SurveyStatus::Closed, None).await
}

fn unique_link() -> String {
    let slug: String = thread_rng().sample_iter(&Alphanumeric).take(8).map(char::from).collect();
    format!("https://surveyspark.app/s/{}", slug.to_lowercase())
}
