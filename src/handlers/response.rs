use actix_web::web::{Data, Json, Path, Query};

use crate::core::models::response::{Query as ResponseQuery, Submit, SurveyResponse};
use crate::core::services;
use crate::database::memory::MemoryStore;
use crate::error::Error;
use crate::request::Pagination;
use crate::response::{CreateResponse, List};

pub async fn submit(survey_id: Path<(String,)>, Json(submission): Json<Submit>, store: Data<MemoryStore>) -> Result<Json<CreateResponse>, Error> {
    let mut store = store.get_ref().clone();
    let id = services::response::submit_response(&mut store, &survey_id.into_inner().0, submission).await?;
    Ok(Json(CreateResponse { id }))
}

pub async fn list_by_survey(survey_id: Path<(String,)>, Query(pagination): Query<Pagination>, store: Data<MemoryStore>) -> Result<Json<List<SurveyResponse>>, Error> {
    let mut store = store.get_ref().clone();
    let survey_id = survey_id.into_inner().0;
    // listing responses of a missing survey is a 404, not an empty list
    services::survey::survey_detail(&mut store, &survey_id).await?;
    let (responses, total) = services::response::list_responses(
        &mut store,
        ResponseQuery {
            survey_id_eq: Some(survey_id),
            ..ResponseQuery::default()
        },
        pagination,
    )
    .await?;
    Ok(Json(List::new(responses, total)))
}
