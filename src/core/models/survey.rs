use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::question::{Question, QuestionKind};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrivacyTerms {
    pub enabled: bool,
    /// Kept verbatim when the section is disabled, so re-enabling restores it.
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Draft,
    Active,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub privacy_terms: PrivacyTerms,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    /// Assigned when the survey leaves draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_link: Option<String>,
    pub status: SurveyStatus,
}

impl Survey {
    /// Draft-shaped view of a stored survey, used to seed an editing session
    /// and to run publish checks.
    pub fn to_draft(&self) -> SurveyDraft {
        SurveyDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.clone(),
            privacy_terms: self.privacy_terms.clone(),
            status: self.status,
        }
    }
}

/// Serialized editor state, handed to the store on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub privacy_terms: PrivacyTerms,
    pub status: SurveyStatus,
}

impl SurveyDraft {
    /// Advisory findings a survey should resolve before going live. Nothing
    /// in the editing or save path enforces these.
    pub fn publish_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("survey title is empty".to_string());
        }
        for (i, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                problems.push(format!("question {} has no text", i + 1));
            }
            match &question.kind {
                QuestionKind::MultipleChoice { options } if options.is_empty() => {
                    problems.push(format!("question {} has no options", i + 1));
                }
                QuestionKind::LikertScale { scale } | QuestionKind::Scaled { scale } if scale.scale_min >= scale.scale_max => {
                    problems.push(format!("question {} has an inverted scale ({}..{})", i + 1, scale.scale_min, scale.scale_max));
                }
                _ => {}
            }
        }
        problems
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insert {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub privacy_terms: PrivacyTerms,
    pub status: SurveyStatus,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct Update {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub privacy_terms: PrivacyTerms,
}

#[derive(Debug, Default)]
pub struct Query {
    pub status_eq: Option<SurveyStatus>,
    pub created_by_eq: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::question::ScaleBounds;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&SurveyStatus::Draft).unwrap(), r#""draft""#);
        assert_eq!(serde_json::from_str::<SurveyStatus>(r#""closed""#).unwrap(), SurveyStatus::Closed);
    }

    #[test]
    fn test_publish_problems_flags_inverted_scale() {
        let draft = SurveyDraft {
            title: "T".into(),
            description: None,
            questions: vec![Question {
                id: "q1".into(),
                text: "Rate".into(),
                is_required: false,
                kind: QuestionKind::Scaled {
                    scale: ScaleBounds {
                        scale_min: 5,
                        scale_max: 1,
                        ..ScaleBounds::default()
                    },
                },
            }],
            privacy_terms: PrivacyTerms::default(),
            status: SurveyStatus::Draft,
        };
        let problems = draft.publish_problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("inverted scale"));
    }

    #[test]
    fn test_publish_problems_clean_draft() {
        let draft = SurveyDraft {
            title: "Customer Satisfaction".into(),
            description: Some("Q3".into()),
            questions: vec![Question {
                id: "q1".into(),
                text: "Any suggestions?".into(),
                is_required: false,
                kind: QuestionKind::OpenEnded,
            }],
            privacy_terms: PrivacyTerms::default(),
            status: SurveyStatus::Draft,
        };
        assert!(draft.publish_problems().is_empty());
    }
}
