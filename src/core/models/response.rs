use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardStatus {
    Pending,
    Issued,
    NotEligible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    /// Absent for anonymous responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_id: Option<String>,
    pub answers: Vec<Answer>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_status: Option<RewardStatus>,
}

/// Respondent-facing submission body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submit {
    #[serde(default)]
    pub respondent_id: Option<String>,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insert {
    pub survey_id: String,
    pub respondent_id: Option<String>,
    pub answers: Vec<Answer>,
    pub is_verified: Option<bool>,
    pub reward_status: Option<RewardStatus>,
}

#[derive(Debug, Default)]
pub struct Query {
    pub survey_id_eq: Option<String>,
    /// Case-insensitive match against the respondent id, or a plain
    /// substring of the response id (the rewards-page search box).
    pub respondent_like: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reward_status_wire_format() {
        assert_eq!(serde_json::to_string(&RewardStatus::NotEligible).unwrap(), r#""not_eligible""#);
        assert_eq!(serde_json::from_str::<RewardStatus>(r#""pending""#).unwrap(), RewardStatus::Pending);
    }

    #[test]
    fn test_anonymous_response_omits_respondent() {
        let response = SurveyResponse {
            id: "resp_001".into(),
            survey_id: "survey_123".into(),
            respondent_id: None,
            answers: vec![],
            submitted_at: Utc::now(),
            is_verified: Some(false),
            reward_status: Some(RewardStatus::Pending),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("respondentId").is_none());
        assert_eq!(value["rewardStatus"], "pending");
    }
}
