//! Looking up the code a student logs in with.
//! URL: {student_api_base}/getcode

use super::response::{ApiResponse, EmptyMeta};
use super::DATE_FMT;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentCode {
    pub code: String,
}

pub type StudentCodeResponse = ApiResponse<StudentCode, EmptyMeta>;

pub(crate) async fn from_req(
    session: &mut Session,
    date_of_birth: NaiveDate,
) -> Result<StudentCodeResponse> {
    let request = ApiRequest::post("/getcode")
        .form([("date", date_of_birth.format(DATE_FMT).to_string())]);
    session.request(request).await
}
