//! Pupils attached to a parent account.
//! URL: {parent_api_base}/pupils

use super::response::{ApiResponse, EmptyMeta};
use super::student_info::Student;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;

/// A child record as a parent sees it: the student fields plus school info
/// and engagement counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pupil {
    #[serde(flatten)]
    pub student: Student,
    pub school_name: String,
    pub school_logo: String,
    pub timezone: String,
    pub display_covid_tests: bool,
    pub can_record_covid_tests: bool,
    pub detention_yes_count: i64,
    pub detention_no_count: i64,
    pub detention_pending_count: i64,
    pub detention_upscaled_count: i64,
    pub homework_todo_count: i64,
    pub homework_late_count: i64,
    pub homework_not_completed_count: i64,
    pub homework_excused_count: i64,
    pub homework_completed_count: i64,
    pub homework_submitted_count: i64,
}

impl Pupil {
    pub fn id(&self) -> i64 {
        self.student.id
    }

    pub fn name(&self) -> &str {
        &self.student.name
    }
}

pub type PupilsResponse = ApiResponse<Vec<Pupil>, EmptyMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<PupilsResponse> {
    session.request(ApiRequest::get("/pupils")).await
}
