//! One page of the activity feed. Pages are walked with `last_id`.
//! URL: {api_base}/activity/{student_id}

use super::response::ApiResponse;
use super::DATE_FMT;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Detention,
    Notice,
    AttendanceEvent,
    Question,
    Event,
    Behaviour,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Blank,
    Negative,
    Absent,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityPoint {
    /// Increases along the feed, used as the pagination cursor.
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<ActivityType>,
    /// `None` when the point carries no polarity.
    pub polarity: Option<Polarity>,
    pub reason: String,
    pub score: i64,
    /// e.g. `2024-03-04 09:12:00`
    pub timestamp: String,
    pub timestamp_custom_time: Option<String>,
    /// Display hints such as `border_color` and `custom_class`.
    pub style: HashMap<String, Option<String>>,
    pub pupil_name: String,
    pub lesson_name: Option<String>,
    pub teacher_name: Option<String>,
    pub room_name: Option<String>,
    pub note: Option<String>,
    #[serde(rename = "_can_delete")]
    pub can_delete: bool,
    pub badges: String,
    pub detention_date: Option<String>,
    pub detention_time: Option<String>,
    pub detention_location: Option<String>,
    pub detention_type: Option<String>,
}

/// The server sends the last id, or `false` at the end of the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LastId {
    Id(i64),
    Flag(bool),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityMeta {
    pub start_date: String,
    pub end_date: String,
    pub last_id: Option<LastId>,
    pub step_size: String,
    pub detention_alias_uc: String,
}

pub type ActivityResponse = ApiResponse<Vec<ActivityPoint>, ActivityMeta>;

#[derive(Debug, Clone, Default)]
pub struct ActivityOptions {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Id of the last point of the previous page.
    pub last_id: Option<i64>,
}

pub(crate) async fn from_req(
    session: &mut Session,
    options: &ActivityOptions,
) -> Result<ActivityResponse> {
    let request = ApiRequest::get(format!("/activity/{}", session.subject_id()))
        .query_opt("from", options.from.map(|d| d.format(DATE_FMT).to_string()))
        .query_opt("to", options.to.map(|d| d.format(DATE_FMT).to_string()))
        .query_opt("last_id", options.last_id.map(|id| id.to_string()));

    session.request(request).await
}
