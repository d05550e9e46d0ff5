use actix_web::web::{Data, Json, Query};
use serde::Deserialize;

use crate::core::models::response::{Query as ResponseQuery, SurveyResponse};
use crate::core::services;
use crate::database::memory::MemoryStore;
use crate::error::Error;
use crate::request::Pagination;
use crate::response::{BatchResponse, List};

#[derive(Debug, Deserialize)]
pub struct Filter {
    pub survey_id: Option<String>,
    pub search: Option<String>,
}

/// Rewards-view listing: filter by survey and respondent search term.
pub async fn list(Query(filter): Query<Filter>, Query(pagination): Query<Pagination>, store: Data<MemoryStore>) -> Result<Json<List<SurveyResponse>>, Error> {
    let mut store = store.get_ref().clone();
    let (responses, total) = services::response::list_responses(
        &mut store,
        ResponseQuery {
            survey_id_eq: filter.survey_id,
            respondent_like: filter.search,
        },
        pagination,
    )
    .await?;
    Ok(Json(List::new(responses, total)))
}

/// Selection of response ids from the rewards table.
#[derive(Debug, Deserialize)]
pub struct Selection {
    pub ids: Vec<String>,
}

pub async fn verify(Json(selection): Json<Selection>, store: Data<MemoryStore>) -> Result<Json<BatchResponse>, Error> {
    let mut store = store.get_ref().clone();
    let affected = services::reward::verify_responses(&mut store, &selection.ids).await?;
    Ok(Json(BatchResponse { affected }))
}

pub async fn issue(Json(selection): Json<Selection>, store: Data<MemoryStore>) -> Result<Json<BatchResponse>, Error> {
    let mut store = store.get_ref().clone();
    let affected = services::reward::issue_rewards(&mut store, &selection.ids).await?;
    Ok(Json(BatchResponse { affected }))
}

pub async fn mark_not_eligible(Json(selection): Json<Selection>, store: Data<MemoryStore>) -> Result<Json<BatchResponse>, Error> {
    let mut store = store.get_ref().clone();
    let affected = services::reward::mark_not_eligible(&mut store, &selection.ids).await?;
    Ok(Json(BatchResponse { affected }))
}
