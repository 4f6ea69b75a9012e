//! Behaviour points over time and per reason.
//! URL: {api_base}/behaviour/{student_id}

use super::response::ApiResponse;
use super::DateRangeOptions;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BehaviourTimelinePoint {
    pub positive: i64,
    pub negative: i64,
    /// Label of the bucket, e.g. `"Mon"`
    pub name: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BehaviourData {
    pub timeline: Vec<BehaviourTimelinePoint>,
    /// Reason to number of points.
    pub positive_reasons: HashMap<String, i64>,
    pub negative_reasons: HashMap<String, i64>,
    pub other_positive: Vec<String>,
    pub other_negative: Vec<String>,
    pub other_positive_count: Vec<HashMap<String, i64>>,
    pub other_negative_count: Vec<HashMap<String, i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BehaviourMeta {
    pub start_date: String,
    pub end_date: String,
    pub step_size: String,
}

pub type BehaviourResponse = ApiResponse<BehaviourData, BehaviourMeta>;

pub(crate) async fn from_req(
    session: &mut Session,
    options: &DateRangeOptions,
) -> Result<BehaviourResponse> {
    let request = options.apply(ApiRequest::get(format!(
        "/behaviour/{}",
        session.subject_id()
    )));
    session.request(request).await
}
