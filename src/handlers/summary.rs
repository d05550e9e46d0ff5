use actix_web::web::{Data, Json, Path};

use crate::core::services;
use crate::core::summarizer::{SummarizeRequest, Summarizer, Summary};
use crate::database::memory::MemoryStore;
use crate::error::Error;

/// AI summary for one survey's pasted responses. Input is validated before
/// the generation collaborator is invoked.
pub async fn summarize<A>(survey_id: Path<(String,)>, Json(request): Json<SummarizeRequest>, ai: Data<A>, store: Data<MemoryStore>) -> Result<Json<Summary>, Error>
where
    A: Summarizer + 'static,
{
    let mut store = store.get_ref().clone();
    services::survey::survey_detail(&mut store, &survey_id.into_inner().0).await?;
    let summary = services::summary::summarize_responses(ai.get_ref(), request).await?;
    Ok(Json(summary))
}
