//! Rewards shop of a student, and buying from it.
//! URL: {student_api_base}/rewards/{student_id}
//! URL: {student_api_base}/purchase/{item_id}

use super::response::{ApiResponse, EmptyMeta, NumberOrString};
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Reward {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub photo: String,
    pub price: i64,
    pub stock_control: bool,
    pub stock: i64,
    pub can_purchase: bool,
    pub unable_to_purchase_reason: String,
    pub once_per_pupil: bool,
    pub purchased: bool,
    pub purchased_count: NumberOrString,
    pub price_balance_difference: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RewardsMeta {
    pub pupil_score_balance: i64,
}

pub type RewardsResponse = ApiResponse<Vec<Reward>, RewardsMeta>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RewardPurchase {
    /// `"yes"` or `"no"`
    pub single_purchase: String,
    pub order_id: i64,
    /// Points left after the purchase.
    pub balance: i64,
}

pub type RewardPurchaseResponse = ApiResponse<RewardPurchase, EmptyMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<RewardsResponse> {
    let request = ApiRequest::get(format!("/rewards/{}", session.subject_id()));
    session.request(request).await
}

pub(crate) async fn purchase(session: &mut Session, item_id: i64) -> Result<RewardPurchaseResponse> {
    let request = ApiRequest::post(format!("/purchase/{item_id}"))
        .form([("pupil_id", session.subject_id().to_string())]);
    session.request(request).await
}
