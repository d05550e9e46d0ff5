use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::context::UserInfo;
use crate::core::editor::SurveyEditor;
use crate::core::ids::UuidGenerator;
use crate::core::models::question::{Question, QuestionOption, QuestionType};
use crate::core::models::survey::{PrivacyTerms, SurveyStatus};
use crate::core::services;
use crate::database::memory::{EditorSessions, MemoryStore};
use crate::error::Error;
use crate::response::CreateResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub editor_id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub privacy_terms: PrivacyTerms,
    pub privacy_section_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<String>,
}

fn view(editor_id: &str, editor: &SurveyEditor<UuidGenerator>) -> EditorView {
    EditorView {
        editor_id: editor_id.to_string(),
        title: editor.title().to_string(),
        description: editor.description().to_string(),
        questions: editor.questions().to_vec(),
        privacy_terms: editor.privacy_terms().clone(),
        privacy_section_visible: editor.privacy_section_visible(),
        survey_id: editor.survey_id().map(str::to_string),
    }
}

pub async fn create(sessions: Data<EditorSessions>) -> Result<Json<CreateResponse>, Error> {
    let id = sessions.open(SurveyEditor::new(UuidGenerator))?;
    Ok(Json(CreateResponse { id }))
}

/// Seeds an editing session from an existing draft survey.
pub async fn open_survey(survey_id: Path<(String,)>, store: Data<MemoryStore>, sessions: Data<EditorSessions>) -> Result<Json<CreateResponse>, Error> {
    let mut store = store.get_ref().clone();
    let survey = services::survey::survey_detail(&mut store, &survey_id.into_inner().0).await?;
    if survey.status != SurveyStatus::Draft {
        return Err(Error::BusinessError("only draft surveys can be edited".into()));
    }
    let id = sessions.open(SurveyEditor::for_survey(&survey, UuidGenerator))?;
    Ok(Json(CreateResponse { id }))
}

pub async fn detail(editor_id: Path<(String,)>, sessions: Data<EditorSessions>) -> Result<Json<EditorView>, Error> {
    let editor_id = editor_id.into_inner().0;
    let state = sessions.with(&editor_id, |editor| Ok(view(&editor_id, editor)))?;
    Ok(Json(state))
}

#[derive(Debug, Deserialize)]
pub struct DetailsUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn update_details(editor_id: Path<(String,)>, Json(details): Json<DetailsUpdate>, sessions: Data<EditorSessions>) -> Result<HttpResponse, Error> {
    sessions.with(&editor_id.into_inner().0, |editor| {
        if let Some(title) = details.title {
            editor.set_title(title);
        }
        if let Some(description) = details.description {
            editor.set_description(description);
        }
        Ok(())
    })?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

#[derive(Debug, Deserialize)]
pub struct AddQuestionRequest {
    #[serde(rename = "type")]
    pub type_: QuestionType,
}

pub async fn add_question(editor_id: Path<(String,)>, Json(request): Json<AddQuestionRequest>, sessions: Data<EditorSessions>) -> Result<Json<Question>, Error> {
    let question = sessions.with(&editor_id.into_inner().0, |editor| Ok(editor.add_question(request.type_).clone()))?;
    Ok(Json(question))
}

pub async fn update_question(path: Path<(String, usize)>, Json(question): Json<Question>, sessions: Data<EditorSessions>) -> Result<HttpResponse, Error> {
    let (editor_id, index) = path.into_inner();
    sessions.with(&editor_id, |editor| editor.update_question(index, question))?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn remove_question(path: Path<(String, usize)>, sessions: Data<EditorSessions>) -> Result<Json<Question>, Error> {
    let (editor_id, index) = path.into_inner();
    let removed = sessions.with(&editor_id, |editor| editor.remove_question(index))?;
    Ok(Json(removed))
}

pub async fn move_question(path: Path<(String, usize, usize)>, sessions: Data<EditorSessions>) -> Result<HttpResponse, Error> {
    let (editor_id, from, to) = path.into_inner();
    sessions.with(&editor_id, |editor| editor.move_question(from, to))?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn enable_privacy(editor_id: Path<(String,)>, sessions: Data<EditorSessions>) -> Result<HttpResponse, Error> {
    sessions.with(&editor_id.into_inner().0, |editor| {
        editor.enable_privacy_section();
        Ok(())
    })?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn set_privacy(editor_id: Path<(String,)>, Json(terms): Json<PrivacyTerms>, sessions: Data<EditorSessions>) -> Result<HttpResponse, Error> {
    sessions.with(&editor_id.into_inner().0, |editor| {
        editor.set_privacy_terms(terms);
        Ok(())
    })?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn add_option(path: Path<(String, usize)>, sessions: Data<EditorSessions>) -> Result<Json<QuestionOption>, Error> {
    let (editor_id, index) = path.into_inner();
    let option = sessions.with(&editor_id, |editor| editor.add_option(index).cloned())?;
    Ok(Json(option))
}

#[derive(Debug, Deserialize)]
pub struct OptionText {
    pub text: String,
}

pub async fn update_option(path: Path<(String, usize, usize)>, Json(body): Json<OptionText>, sessions: Data<EditorSessions>) -> Result<HttpResponse, Error> {
    let (editor_id, index, opt_index) = path.into_inner();
    sessions.with(&editor_id, |editor| editor.update_option(index, opt_index, body.text))?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn remove_option(path: Path<(String, usize, usize)>, sessions: Data<EditorSessions>) -> Result<Json<QuestionOption>, Error> {
    let (editor_id, index, opt_index) = path.into_inner();
    let removed = sessions.with(&editor_id, |editor| editor.remove_option(index, opt_index))?;
    Ok(Json(removed))
}

/// Snapshots the session into a draft record and hands it to the store. On
/// success the session is gone and the client navigates to the returned
/// survey id; on failure the session is kept so the user can retry.
pub async fn save(editor_id: Path<(String,)>, user_info: UserInfo, sessions: Data<EditorSessions>, store: Data<MemoryStore>) -> Result<Json<CreateResponse>, Error> {
    let editor_id = editor_id.into_inner().0;
    let editor = sessions.close(&editor_id)?;
    let draft = editor.draft();
    let target = editor.survey_id().map(str::to_string);
    let mut store = store.get_ref().clone();
    let result = match &target {
        Some(id) => services::survey::update_survey(&mut store, id, draft).await.map(|_| id.clone()),
        None => services::survey::create_survey(&mut store, &user_info.id, draft).await,
    };
    match result {
        Ok(id) => Ok(Json(CreateResponse { id })),
        Err(err) => {
            sessions.restore(editor_id, editor)?;
            Err(err)
        }
    }
}
