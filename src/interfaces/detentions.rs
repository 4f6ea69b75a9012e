//! Detentions, past and upcoming.
//! URL: {api_base}/detentions/{student_id}

use super::response::{ApiResponse, NumberOrString};
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attended {
    Yes,
    No,
    Upscaled,
    Pending,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionPupil {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// School display options such as `opt_notes_names`, `"yes"` or `"no"`.
    pub school: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionSubject {
    pub id: NumberOrString,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionLesson {
    pub id: i64,
    pub name: String,
    pub subject: Option<DetentionSubject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionReason {
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionTeacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionType {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Detention {
    pub id: i64,
    pub attended: Option<Attended>,
    pub date: Option<String>,
    /// Minutes
    pub length: Option<i64>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub time: Option<String>,
    pub pupil: DetentionPupil,
    pub lesson: Option<DetentionLesson>,
    pub lesson_pupil_behaviour: DetentionReason,
    pub teacher: Option<DetentionTeacher>,
    pub detention_type: Option<DetentionType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionsMeta {
    pub detention_alias_plural: String,
}

pub type DetentionsResponse = ApiResponse<Vec<Detention>, DetentionsMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<DetentionsResponse> {
    let request = ApiRequest::get(format!("/detentions/{}", session.subject_id()));
    session.request(request).await
}
