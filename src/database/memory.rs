use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use uuid::Uuid;

use crate::core::editor::SurveyEditor;
use crate::core::ids::UuidGenerator;
use crate::core::models::question::{Question, QuestionKind, QuestionOption, ScaleBounds};
use crate::core::models::response::{Answer, Insert as ResponseInsert, Query as ResponseQuery, RewardStatus, SurveyResponse};
use crate::core::models::survey::{Insert as SurveyInsert, PrivacyTerms, Query as SurveyQuery, Survey, SurveyStatus, Update as SurveyUpdate};
use crate::core::ports::repository::{ResponseCommon, Store, SurveyCommon};
use crate::error::Error;
use crate::request::Pagination;

#[derive(Debug, Default)]
struct Inner {
    surveys: HashMap<String, Survey>,
    responses: HashMap<String, SurveyResponse>,
}

/// The persistence collaborator. Everything lives in one shared map; clones
/// are cheap handles onto the same data, one handle per request.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<Inner>, Error> {
        self.inner.lock().map_err(|_| Error::ServerError("store mutex poisoned".into()))
    }

    /// Store preloaded with the demo surveys and responses.
    pub fn seeded() -> Self {
        let store = MemoryStore::default();
        {
            let mut inner = store.inner.lock().expect("fresh store mutex");
            for survey in seed_surveys() {
                inner.surveys.insert(survey.id.clone(), survey);
            }
            for response in seed_responses() {
                inner.responses.insert(response.id.clone(), response);
            }
        }
        store
    }
}

fn paginate<T>(items: Vec<T>, pagination: Option<Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => {
            let offset = ((p.page - 1).max(0) * p.size).max(0) as usize;
            items.into_iter().skip(offset).take(p.size.max(0) as usize).collect()
        }
        None => items,
    }
}

fn survey_matches(survey: &Survey, query: &SurveyQuery) -> bool {
    if let Some(status) = query.status_eq {
        if survey.status != status {
            return false;
        }
    }
    if let Some(creator) = &query.created_by_eq {
        if &survey.created_by != creator {
            return false;
        }
    }
    true
}

fn response_matches(response: &SurveyResponse, query: &ResponseQuery) -> bool {
    if let Some(survey_id) = &query.survey_id_eq {
        if &response.survey_id != survey_id {
            return false;
        }
    }
    if let Some(term) = &query.respondent_like {
        let needle = term.to_lowercase();
        let respondent_hit = response
            .respondent_id
            .as_deref()
            .map(|r| r.to_lowercase().contains(&needle))
            .unwrap_or(false);
        if !respondent_hit && !response.id.contains(term.as_str()) {
            return false;
        }
    }
    true
}

impl SurveyCommon for MemoryStore {
    async fn insert(&mut self, data: SurveyInsert) -> Result<String, Error> {
        let now = Utc::now();
        let id = format!("survey_{}", Uuid::new_v4().simple());
        let survey = Survey {
            id: id.clone(),
            title: data.title,
            description: data.description,
            questions: data.questions,
            privacy_terms: data.privacy_terms,
            created_at: now,
            updated_at: now,
            created_by: data.created_by,
            unique_link: None,
            status: data.status,
        };
        self.lock()?.surveys.insert(id.clone(), survey);
        Ok(id)
    }

    async fn get(&mut self, id: &str) -> Result<Option<Survey>, Error> {
        Ok(self.lock()?.surveys.get(id).cloned())
    }

    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error> {
        let surveys = self
            .lock()?
            .surveys
            .values()
            .filter(|s| survey_matches(s, query))
            .cloned()
            .sorted_by_key(|s| s.created_at)
            .collect();
        Ok(paginate(surveys, pagination))
    }

    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error> {
        Ok(self.lock()?.surveys.values().filter(|s| survey_matches(s, query)).count() as i64)
    }

    async fn update(&mut self, id: &str, data: SurveyUpdate) -> Result<(), Error> {
        let mut inner = self.lock()?;
        let survey = inner.surveys.get_mut(id).ok_or_else(|| Error::NotFound("survey".into()))?;
        survey.title = data.title;
        survey.description = data.description;
        survey.questions = data.questions;
        survey.privacy_terms = data.privacy_terms;
        survey.updated_at = Utc::now();
        Ok(())
    }

    async fn set_status(&mut self, id: &str, status: SurveyStatus, unique_link: Option<String>) -> Result<(), Error> {
        let mut inner = self.lock()?;
        let survey = inner.surveys.get_mut(id).ok_or_else(|| Error::NotFound("survey".into()))?;
        survey.status = status;
        if unique_link.is_some() {
            survey.unique_link = unique_link;
        }
        survey.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&mut self, id: &str) -> Result<bool, Error> {
        Ok(self.lock()?.surveys.remove(id).is_some())
    }
}

impl ResponseCommon for MemoryStore {
    async fn insert(&mut self, data: ResponseInsert) -> Result<String, Error> {
        let id = format!("resp_{}", Uuid::new_v4().simple());
        let response = SurveyResponse {
            id: id.clone(),
            survey_id: data.survey_id,
            respondent_id: data.respondent_id,
            answers: data.answers,
            submitted_at: Utc::now(),
            is_verified: data.is_verified,
            reward_status: data.reward_status,
        };
        self.lock()?.responses.insert(id.clone(), response);
        Ok(id)
    }

    async fn get(&mut self, id: &str) -> Result<Option<SurveyResponse>, Error> {
        Ok(self.lock()?.responses.get(id).cloned())
    }

    async fn query(&mut self, query: &ResponseQuery, pagination: Option<Pagination>) -> Result<Vec<SurveyResponse>, Error> {
        let responses = self
            .lock()?
            .responses
            .values()
            .filter(|r| response_matches(r, query))
            .cloned()
            .sorted_by_key(|r| r.submitted_at)
            .collect();
        Ok(paginate(responses, pagination))
    }

    async fn count(&mut self, query: &ResponseQuery) -> Result<i64, Error> {
        Ok(self.lock()?.responses.values().filter(|r| response_matches(r, query)).count() as i64)
    }

    async fn update(&mut self, response: SurveyResponse) -> Result<(), Error> {
        let mut inner = self.lock()?;
        if !inner.responses.contains_key(&response.id) {
            return Err(Error::NotFound("response".into()));
        }
        inner.responses.insert(response.id.clone(), response);
        Ok(())
    }
}

impl Store for MemoryStore {}

/// Registry of live editing sessions, one `SurveyEditor` per open editor.
#[derive(Clone, Default)]
pub struct EditorSessions {
    inner: Arc<Mutex<HashMap<String, SurveyEditor<UuidGenerator>>>>,
}

impl EditorSessions {
    fn lock(&self) -> Result<MutexGuard<HashMap<String, SurveyEditor<UuidGenerator>>>, Error> {
        self.inner.lock().map_err(|_| Error::ServerError("session mutex poisoned".into()))
    }

    pub fn open(&self, editor: SurveyEditor<UuidGenerator>) -> Result<String, Error> {
        let id = format!("editor_{}", Uuid::new_v4().simple());
        self.lock()?.insert(id.clone(), editor);
        Ok(id)
    }

    /// Runs one editing operation against the session, holding the registry
    /// lock for the duration of the synchronous mutation.
    pub fn with<R>(&self, id: &str, f: impl FnOnce(&mut SurveyEditor<UuidGenerator>) -> Result<R, Error>) -> Result<R, Error> {
        let mut sessions = self.lock()?;
        let editor = sessions.get_mut(id).ok_or_else(|| Error::NotFound("editing session".into()))?;
        f(editor)
    }

    /// Removes the session, handing the editor back to the caller.
    pub fn close(&self, id: &str) -> Result<SurveyEditor<UuidGenerator>, Error> {
        self.lock()?.remove(id).ok_or_else(|| Error::NotFound("editing session".into()))
    }

    /// Puts an editor back after a failed save so the client can retry.
    pub fn restore(&self, id: String, editor: SurveyEditor<UuidGenerator>) -> Result<(), Error> {
        self.lock()?.insert(id, editor);
        Ok(())
    }
}

fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).expect("seed timestamp is valid").with_timezone(&Utc)
}

fn seed_surveys() -> Vec<Survey> {
    vec![
        Survey {
            id: "survey_123".into(),
            title: "Customer Satisfaction Q3".into(),
            description: Some("Gather feedback on customer satisfaction for the third quarter.".into()),
            questions: vec![
                Question {
                    id: "q1".into(),
                    text: "How satisfied are you with our product?".into(),
                    is_required: true,
                    kind: QuestionKind::LikertScale {
                        scale: ScaleBounds {
                            scale_min: 1,
                            scale_max: 5,
                            min_label: "Very Unsatisfied".into(),
                            max_label: "Very Satisfied".into(),
                        },
                    },
                },
                Question {
                    id: "q2".into(),
                    text: "What features do you use most often?".into(),
                    is_required: true,
                    kind: QuestionKind::MultipleChoice {
                        options: vec![
                            QuestionOption {
                                id: "opt1".into(),
                                text: "Feature A".into(),
                                value: None,
                            },
                            QuestionOption {
                                id: "opt2".into(),
                                text: "Feature B".into(),
                                value: None,
                            },
                            QuestionOption {
                                id: "opt3".into(),
                                text: "Feature C".into(),
                                value: None,
                            },
                        ],
                    },
                },
                Question {
                    id: "q3".into(),
                    text: "Any suggestions for improvement?".into(),
                    is_required: false,
                    kind: QuestionKind::OpenEnded,
                },
            ],
            privacy_terms: PrivacyTerms {
                enabled: true,
                text: "Your responses are anonymous and will be used for internal improvement purposes only.".into(),
            },
            created_at: ts("2023-07-15T10:00:00Z"),
            updated_at: ts("2023-07-18T14:30:00Z"),
            created_by: "user_abc".into(),
            unique_link: Some("https://surveyspark.app/s/cust-sat-q3".into()),
            status: SurveyStatus::Active,
        },
        Survey {
            id: "survey_456".into(),
            title: "New Feature Feedback".into(),
            description: Some("Collect opinions about the new feature X.".into()),
            questions: vec![],
            privacy_terms: PrivacyTerms::default(),
            created_at: ts("2023-08-01T09:00:00Z"),
            updated_at: ts("2023-08-02T11:00:00Z"),
            created_by: "user_abc".into(),
            unique_link: Some("https://surveyspark.app/s/feature-x-feedback".into()),
            status: SurveyStatus::Closed,
        },
        Survey {
            id: "survey_789".into(),
            title: "Employee Engagement Survey".into(),
            description: Some("Annual survey to measure employee engagement.".into()),
            questions: vec![],
            privacy_terms: PrivacyTerms {
                enabled: true,
                text: "Participation is anonymous.".into(),
            },
            created_at: ts("2023-08-10T16:00:00Z"),
            updated_at: ts("2023-08-10T16:00:00Z"),
            created_by: "user_abc".into(),
            unique_link: None,
            status: SurveyStatus::Draft,
        },
    ]
}

fn seed_responses() -> Vec<SurveyResponse> {
    let answers: Vec<Answer> = vec![];
    vec![
        SurveyResponse {
            id: "resp_001".into(),
            survey_id: "survey_123".into(),
            respondent_id: Some("user_xyz".into()),
            answers: answers.clone(),
            submitted_at: ts("2023-07-20T10:00:00Z"),
            is_verified: Some(false),
            reward_status: Some(RewardStatus::Pending),
        },
        SurveyResponse {
            id: "resp_002".into(),
            survey_id: "survey_123".into(),
            respondent_id: Some("user_abc".into()),
            answers: answers.clone(),
            submitted_at: ts("2023-07-21T11:30:00Z"),
            is_verified: Some(true),
            reward_status: Some(RewardStatus::Issued),
        },
        SurveyResponse {
            id: "resp_003".into(),
            survey_id: "survey_456".into(),
            respondent_id: Some("user_def".into()),
            answers: answers.clone(),
            submitted_at: ts("2023-08-05T14:15:00Z"),
            is_verified: Some(false),
            reward_status: Some(RewardStatus::Pending),
        },
        SurveyResponse {
            id: "resp_004".into(),
            survey_id: "survey_123".into(),
            respondent_id: Some("user_ghi".into()),
            answers,
            submitted_at: ts("2023-07-22T09:00:00Z"),
            is_verified: Some(false),
            reward_status: Some(RewardStatus::NotEligible),
        },
    ]
}
