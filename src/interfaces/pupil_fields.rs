//! Custom fields the school shows on the student's profile.
//! URL: {api_base}/customfields/{student_id}

use super::response::{ApiResponse, EmptyMeta};
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PupilField {
    pub id: i64,
    pub name: String,
    pub graphic: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PupilFieldsData {
    pub note: String,
    pub fields: Vec<PupilField>,
}

pub type PupilFieldsResponse = ApiResponse<PupilFieldsData, EmptyMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<PupilFieldsResponse> {
    let request = ApiRequest::get(format!("/customfields/{}", session.subject_id()));
    session.request(request).await
}
