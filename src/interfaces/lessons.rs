//! Timetable of one day.
//! URL: {api_base}/timetable/{student_id}?date=YYYY-MM-DD

use super::response::ApiResponse;
use super::DATE_FMT;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Lesson {
    pub teacher_name: String,
    pub teacher_id: String,
    pub lesson_name: String,
    pub subject_name: String,
    pub is_alternative_lesson: bool,
    pub is_break: bool,
    pub period_name: String,
    pub period_number: String,
    pub room_name: String,
    pub date: String,
    /// e.g. `2024-03-04T09:00:00+00:00`
    pub start_time: String,
    pub end_time: String,
    pub key: i64,
    pub note_abstract: String,
    pub note: String,
    pub pupil_note_abstract: String,
    pub pupil_note: String,
    pub pupil_note_raw: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeriodMeta {
    pub number: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LessonsMeta {
    pub dates: Vec<String>,
    pub timetable_dates: Vec<String>,
    pub periods: Vec<PeriodMeta>,
    pub start_time: String,
    pub end_time: String,
}

pub type LessonsResponse = ApiResponse<Vec<Lesson>, LessonsMeta>;

pub(crate) async fn from_req(session: &mut Session, date: NaiveDate) -> Result<LessonsResponse> {
    let request = ApiRequest::get(format!("/timetable/{}", session.subject_id()))
        .query("date", date.format(DATE_FMT).to_string());
    session.request(request).await
}
