//! School announcements, optionally asking parents for consent.
//! URL: {api_base}/announcements/{student_id}

use super::response::{ApiResponse, EmptyMeta, NumberOrString};
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnouncementConsent {
    /// `"yes"` or `"no"`
    pub consent_given: String,
    pub comment: Option<String>,
    pub parent_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsentPupil {
    pub id: NumberOrString,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnouncementPupilConsent {
    pub pupil: ConsentPupil,
    pub can_change_consent: bool,
    pub consent: Option<AnnouncementConsent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnouncementAttachment {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    /// HTML
    pub description: Option<String>,
    pub school_name: String,
    pub teacher_name: String,
    pub school_logo: Option<String>,
    /// The yes/no flags below are sent as `"yes"` or `"no"`.
    pub sticky: String,
    pub state: Option<String>,
    pub timestamp: String,
    pub attachments: Vec<AnnouncementAttachment>,
    pub for_pupils: Vec<String>,
    pub comment_visibility: String,
    pub allow_comments: String,
    pub allow_reactions: String,
    pub allow_consent: String,
    pub priority_pinned: String,
    pub requires_consent: String,
    pub can_change_consent: bool,
    pub consent: Option<AnnouncementConsent>,
    pub pupil_consents: Vec<AnnouncementPupilConsent>,
}

pub type AnnouncementsResponse = ApiResponse<Vec<Announcement>, EmptyMeta>;

pub(crate) async fn from_req(session: &mut Session) -> Result<AnnouncementsResponse> {
    let request = ApiRequest::get(format!("/announcements/{}", session.subject_id()));
    session.request(request).await
}
