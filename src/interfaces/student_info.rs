//! Account info, returned by the ping endpoint when asked to include data.
//! URL: {api_base}/ping

use super::response::ApiResponse;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;

/// A student record and what the school lets them see.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
    pub display_behaviour: bool,
    pub display_parent_behaviour: bool,
    pub display_homework: bool,
    pub display_rewards: bool,
    pub display_detentions: bool,
    pub display_report_cards: bool,
    pub display_classes: bool,
    pub display_announcements: bool,
    pub display_attendance: bool,
    /// e.g. `"instance"`
    pub display_attendance_type: String,
    pub display_attendance_percentage: bool,
    pub display_activity: bool,
    pub display_mental_health: bool,
    pub display_timetable: bool,
    pub is_disabled: bool,
    pub display_two_way_communications: bool,
    pub display_absences: bool,
    pub can_upload_attachments: Option<bool>,
    pub display_event_badges: bool,
    pub display_avatars: bool,
    pub display_concern_submission: bool,
    pub display_custom_fields: bool,
    pub pupil_concerns_help_text: String,
    pub allow_pupils_add_timetable_notes: bool,
    pub announcements_count: i64,
    pub messages_count: i64,
    pub pusher_channel_name: String,
    pub has_birthday: bool,
    pub has_new_survey: bool,
    pub survey_id: Option<i64>,
    pub detention_alias_plural_uc: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentInfoData {
    pub user: Student,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentInfoMeta {
    pub version: String,
    pub session_id: Option<String>,
}

pub type StudentInfoResponse = ApiResponse<StudentInfoData, StudentInfoMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<StudentInfoResponse> {
    session
        .request(ApiRequest::post("/ping").form([("include_data", "true")]))
        .await
}
