use log::info;

use crate::core::models::response::RewardStatus;
use crate::core::ports::repository::{ResponseCommon, Store};
use crate::error::Error;

/// Marks the given responses as verified. Unknown ids are skipped, matching
/// the selection-based flow in the rewards view.
pub async fn verify_responses<S>(store: &mut S, ids: &[String]) -> Result<i64, Error>
where
    S: Store,
{
    let mut affected = 0;
    for id in ids {
        if let Some(mut response) = ResponseCommon::get(store, id).await? {
            response.is_verified = Some(true);
            ResponseCommon::update(store, response).await?;
            affected += 1;
        }
    }
    info!("{} responses marked as verified", affected);
    Ok(affected)
}

/// Issues rewards for the given responses. A reward is only ever issued for
/// a verified response still in the pending state; everything else is
/// skipped.
pub async fn issue_rewards<S>(store: &mut S, ids: &[String]) -> Result<i64, Error>
where
    S: Store,
{
    let mut affected = 0;
    for id in ids {
        if let Some(mut response) = ResponseCommon::get(store, id).await? {
            if response.is_verified == Some(true) && response.reward_status == Some(RewardStatus::Pending) {
                response.reward_status = Some(RewardStatus::Issued);
                ResponseCommon::update(store, response).await?;
                affected += 1;
            }
        }
    }
    info!("rewards issued for {} responses", affected);
    Ok(affected)
}

/// Takes pending responses out of the reward pool.
pub async fn mark_not_eligible<S>(store: &mut S, ids: &[String]) -> Result<i64, Error>
where
    S: Store,
{
    let mut affected = 0;
    for id in ids {
        if let Some(mut response) = ResponseCommon::get(store, id).await? {
            if response.reward_status == Some(RewardStatus::Pending) {
                response.reward_status = Some(RewardStatus::NotEligible);
                ResponseCommon::update(store, response).await?;
                affected += 1;
            }
        }
    }
    Ok(affected)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::response::Insert as ResponseInsert;
    use crate::database::memory::MemoryStore;

    async fn pending_response(store: &mut MemoryStore, respondent: &str) -> String {
        ResponseCommon::insert(
            store,
            ResponseInsert {
                survey_id: "survey_123".into(),
                respondent_id: Some(respondent.into()),
                answers: vec![],
                is_verified: Some(false),
                reward_status: Some(RewardStatus::Pending),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_issue_requires_verification() {
        let mut store = MemoryStore::default();
        let id = pending_response(&mut store, "user_xyz").await;

        // unverified: nothing issued
        assert_eq!(issue_rewards(&mut store, &[id.clone()]).await.unwrap(), 0);
        let response = ResponseCommon::get(&mut store, &id).await.unwrap().unwrap();
        assert_eq!(response.reward_status, Some(RewardStatus::Pending));

        assert_eq!(verify_responses(&mut store, &[id.clone()]).await.unwrap(), 1);
        assert_eq!(issue_rewards(&mut store, &[id.clone()]).await.unwrap(), 1);
        let response = ResponseCommon::get(&mut store, &id).await.unwrap().unwrap();
        assert_eq!(response.is_verified, Some(true));
        assert_eq!(response.reward_status, Some(RewardStatus::Issued));

        // issuing again is a no-op
        assert_eq!(issue_rewards(&mut store, &[id]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let mut store = MemoryStore::default();
        let id = pending_response(&mut store, "user_xyz").await;
        let affected = verify_responses(&mut store, &[id, "resp_missing".into()]).await.unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn test_not_eligible_leaves_issued_alone() {
        let mut store = MemoryStore::default();
        let issued = pending_response(&mut store, "user_abc").await;
        verify_responses(&mut store, &[issued.clone()]).await.unwrap();
        issue_rewards(&mut store, &[issued.clone()]).await.unwrap();

        let pending = pending_response(&mut store, "user_def").await;
        let affected = mark_not_eligible(&mut store, &[issued.clone(), pending.clone()]).await.unwrap();
        assert_eq!(affected, 1);
        let response = ResponseCommon::get(&mut store, &issued).await.unwrap().unwrap();
        assert_eq!(response.reward_status, Some(RewardStatus::Issued));
        let response = ResponseCommon::get(&mut store, &pending).await.unwrap().unwrap();
        assert_eq!(response.reward_status, Some(RewardStatus::NotEligible));
    }
}
