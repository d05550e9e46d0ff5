use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::context::UserInfo;
use crate::core::models::survey::{Query as SurveyQuery, Survey, SurveyDraft, SurveyStatus};
use crate::core::services;
use crate::database::memory::MemoryStore;
use crate::error::Error;
use crate::request::Pagination;
use crate::response::{CreateResponse, DeleteResponse, List};

#[derive(Debug, Deserialize)]
pub struct Filter {
    pub status: Option<SurveyStatus>,
    pub created_by: Option<String>,
}

pub async fn create(user_info: UserInfo, Json(draft): Json<SurveyDraft>, store: Data<MemoryStore>) -> Result<Json<CreateResponse>, Error> {
    let mut store = store.get_ref().clone();
    let id = services::survey::create_survey(&mut store, &user_info.id, draft).await?;
    Ok(Json(CreateResponse { id }))
}

pub async fn list(Query(filter): Query<Filter>, Query(pagination): Query<Pagination>, store: Data<MemoryStore>) -> Result<Json<List<Survey>>, Error> {
    let mut store = store.get_ref().clone();
    let (surveys, total) = services::survey::list_surveys(
        &mut store,
        SurveyQuery {
            status_eq: filter.status,
            created_by_eq: filter.created_by,
        },
        pagination,
    )
    .await?;
    Ok(Json(List::new(surveys, total)))
}

pub async fn detail(survey_id: Path<(String,)>, store: Data<MemoryStore>) -> Result<Json<Survey>, Error> {
    let mut store = store.get_ref().clone();
    let survey = services::survey::survey_detail(&mut store, &survey_id.into_inner().0).await?;
    Ok(Json(survey))
}

pub async fn update(survey_id: Path<(String,)>, Json(draft): Json<SurveyDraft>, store: Data<MemoryStore>) -> Result<HttpResponse, Error> {
    let mut store = store.get_ref().clone();
    services::survey::update_survey(&mut store, &survey_id.into_inner().0, draft).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn delete_survey(survey_id: Path<(String,)>, store: Data<MemoryStore>) -> Result<Json<DeleteResponse>, Error> {
    let mut store = store.get_ref().clone();
    let deleted = services::survey::delete_survey(&mut store, &survey_id.into_inner().0).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateResponse {
    pub id: String,
    pub unique_link: String,
}

pub async fn activate(survey_id: Path<(String,)>, store: Data<MemoryStore>) -> Result<Json<ActivateResponse>, Error> {
    let mut store = store.get_ref().clone();
    let id = survey_id.into_inner().0;
    let unique_link = services::survey::activate_survey(&mut store, &id).await?;
    Ok(Json(ActivateResponse { id, unique_link }))
}

pub async fn close(survey_id: Path<(String,)>, store: Data<MemoryStore>) -> Result<HttpResponse, Error> {
    let mut store = store.get_ref().clone();
    services::survey::close_survey(&mut store, &survey_id.into_inner().0).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}
