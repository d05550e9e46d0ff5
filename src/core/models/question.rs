use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ids::IdGenerator;

/// Palette token for the five supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    OpenEnded,
    ClosedEnded,
    MultipleChoice,
    LikertScale,
    Scaled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl QuestionOption {
    pub fn empty(id: String) -> Self {
        QuestionOption {
            id,
            text: String::new(),
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleBounds {
    pub scale_min: i32,
    pub scale_max: i32,
    #[serde(default)]
    pub min_label: String,
    #[serde(default)]
    pub max_label: String,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        ScaleBounds {
            scale_min: 1,
            scale_max: 5,
            min_label: String::new(),
            max_label: String::new(),
        }
    }
}

/// Variant payloads keyed by `type` on the wire. A kind carries exactly the
/// fields its variant needs, so options on an open-ended question are
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    OpenEnded,
    /// Implicit Yes/No.
    ClosedEnded,
    MultipleChoice {
        options: Vec<QuestionOption>,
    },
    LikertScale {
        #[serde(flatten)]
        scale: ScaleBounds,
    },
    Scaled {
        #[serde(flatten)]
        scale: ScaleBounds,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::OpenEnded => QuestionType::OpenEnded,
            QuestionKind::ClosedEnded => QuestionType::ClosedEnded,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::LikertScale { .. } => QuestionType::LikertScale,
            QuestionKind::Scaled { .. } => QuestionType::Scaled,
        }
    }

    pub fn options(&self) -> Option<&Vec<QuestionOption>> {
        match self {
            QuestionKind::MultipleChoice { options } => Some(options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<QuestionOption>> {
        match self {
            QuestionKind::MultipleChoice { options } => Some(options),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub is_required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Default-initialized question of the requested kind: multiple-choice
    /// starts with one empty option, scale-bearing kinds with a 1..5 scale
    /// and empty labels, open/closed with nothing extra.
    pub fn with_defaults<G: IdGenerator>(type_: QuestionType, ids: &mut G) -> Self {
        let id = ids.next_id();
        let kind = match type_ {
            QuestionType::OpenEnded => QuestionKind::OpenEnded,
            QuestionType::ClosedEnded => QuestionKind::ClosedEnded,
            QuestionType::MultipleChoice => QuestionKind::MultipleChoice {
                options: vec![QuestionOption::empty(ids.next_id())],
            },
            QuestionType::LikertScale => QuestionKind::LikertScale {
                scale: ScaleBounds::default(),
            },
            QuestionType::Scaled => QuestionKind::Scaled {
                scale: ScaleBounds::default(),
            },
        };
        Question {
            id,
            text: String::new(),
            is_required: false,
            kind,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::ids::SequenceGenerator;

    #[test]
    fn test_defaults_per_kind() {
        let mut ids = SequenceGenerator::default();

        let q = Question::with_defaults(QuestionType::OpenEnded, &mut ids);
        assert_eq!(q.id, "seq-1");
        assert_eq!(q.kind, QuestionKind::OpenEnded);
        assert!(!q.is_required);
        assert!(q.text.is_empty());

        let q = Question::with_defaults(QuestionType::MultipleChoice, &mut ids);
        let options = q.kind.options().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, "seq-3");
        assert!(options[0].text.is_empty());

        let q = Question::with_defaults(QuestionType::LikertScale, &mut ids);
        match q.kind {
            QuestionKind::LikertScale { scale } => {
                assert_eq!(scale.scale_min, 1);
                assert_eq!(scale.scale_max, 5);
                assert!(scale.min_label.is_empty());
                assert!(scale.max_label.is_empty());
            }
            other => panic!("unexpected kind: {:?}", other),
        }

        let q = Question::with_defaults(QuestionType::Scaled, &mut ids);
        assert_eq!(q.kind.question_type(), QuestionType::Scaled);
    }

    #[test]
    fn test_wire_shape_scaled() {
        let q = Question {
            id: "q1".into(),
            text: "Rate us".into(),
            is_required: true,
            kind: QuestionKind::Scaled {
                scale: ScaleBounds {
                    scale_min: 1,
                    scale_max: 10,
                    min_label: "Not at all likely".into(),
                    max_label: "Extremely likely".into(),
                },
            },
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "scaled");
        assert_eq!(value["isRequired"], true);
        assert_eq!(value["scaleMin"], 1);
        assert_eq!(value["scaleMax"], 10);
        assert_eq!(value["maxLabel"], "Extremely likely");
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_wire_shape_open_ended_has_no_scale_fields() {
        let q = Question {
            id: "q2".into(),
            text: "Any suggestions?".into(),
            is_required: false,
            kind: QuestionKind::OpenEnded,
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "open-ended");
        assert!(value.get("scaleMin").is_none());
        assert!(value.get("options").is_none());

        let parsed: Question = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, q);
    }
}
