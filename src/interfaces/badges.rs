//! Event badges the student has earned.
//! URL: {api_base}/eventbadges/{student_id}

use super::response::{ApiResponse, EmptyMeta};
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BadgeTeacher {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LessonPupilBehaviour {
    pub reason: String,
    pub score: i64,
    pub icon: String,
    pub polarity: String,
    pub timestamp: String,
    pub teacher: BadgeTeacher,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventLabel {
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PupilEvent {
    pub timestamp: String,
    pub lesson_pupil_behaviour: LessonPupilBehaviour,
    pub event: EventLabel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PupilBadge {
    pub pupil_event: PupilEvent,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub colour: String,
    pub created_date: String,
    pub pupil_badges: Vec<PupilBadge>,
    pub icon_url: String,
}

pub type BadgesResponse = ApiResponse<Vec<Badge>, EmptyMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<BadgesResponse> {
    let request = ApiRequest::get(format!("/eventbadges/{}", session.subject_id()));
    session.request(request).await
}
