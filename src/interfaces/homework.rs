//! Homework set for the student, with completion status.
//! URL: {api_base}/homeworks/{student_id}

use super::response::ApiResponse;
use super::DATE_FMT;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use chrono::NaiveDate;
use serde::Deserialize;

/// Which date `from`/`to` filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayDate {
    DueDate,
    #[default]
    IssueDate,
}

impl DisplayDate {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayDate::DueDate => "due_date",
            DisplayDate::IssueDate => "issue_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkState {
    NotCompleted,
    Late,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeacherValidatedAttachment {
    pub id: i64,
    pub file_name: String,
    pub file: String,
    pub validated_file: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeacherValidatedLink {
    pub link: String,
    pub validated_link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentAttachment {
    pub id: i64,
    pub file_name: String,
    pub file: String,
    pub validated_file: String,
    pub teacher_note: String,
    pub teacher_homework_attachments: Vec<TeacherValidatedAttachment>,
    pub can_delete: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HomeworkStatus {
    pub id: i64,
    pub state: Option<HomeworkState>,
    pub mark: Option<String>,
    pub mark_relative: i64,
    /// `"yes"` or `"no"`
    pub ticked: String,
    pub allow_attachments: bool,
    pub allow_marking_completed: bool,
    pub first_seen_date: Option<String>,
    pub last_seen_date: Option<String>,
    pub attachments: Vec<StudentAttachment>,
    pub has_feedback: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Homework {
    pub lesson: String,
    pub subject: String,
    pub teacher: String,
    pub homework_type: String,
    pub id: i64,
    pub title: String,
    pub meta_title: String,
    /// HTML
    pub description: String,
    pub issue_date: String,
    pub due_date: String,
    pub completion_time_unit: String,
    pub completion_time_value: String,
    pub publish_time: String,
    pub status: HomeworkStatus,
    pub validated_links: Vec<TeacherValidatedLink>,
    pub validated_attachments: Vec<TeacherValidatedAttachment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HomeworksMeta {
    pub start_date: String,
    pub end_date: String,
    pub display_type: Option<DisplayDate>,
    pub max_files_allowed: i64,
    pub allowed_file_types: Vec<String>,
    pub this_week_due_count: i64,
    pub this_week_outstanding_count: i64,
    pub this_week_completed_count: i64,
    pub allow_attachments: bool,
    pub display_marks: bool,
}

pub type HomeworksResponse = ApiResponse<Vec<Homework>, HomeworksMeta>;

#[derive(Debug, Clone, Default)]
pub struct HomeworkOptions {
    /// The server defaults to [`DisplayDate::IssueDate`].
    pub display_date: Option<DisplayDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub(crate) async fn from_req(
    session: &mut Session,
    options: &HomeworkOptions,
) -> Result<HomeworksResponse> {
    let request = ApiRequest::get(format!("/homeworks/{}", session.subject_id()))
        .query_opt("display_date", options.display_date.map(|d| d.as_str()))
        .query_opt("from", options.from.map(|d| d.format(DATE_FMT).to_string()))
        .query_opt("to", options.to.map(|d| d.format(DATE_FMT).to_string()));

    session.request(request).await
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_homework_with_status() {
        let homework: Homework = serde_json::from_value(json!({
            "lesson": "10A/Ma1",
            "subject": "Maths",
            "teacher": "Mr Smith",
            "homework_type": "Homework",
            "id": 77,
            "title": "Algebra",
            "issue_date": "2024-03-01",
            "due_date": "2024-03-08",
            "status": {
                "id": 5,
                "state": "not_completed",
                "mark": null,
                "ticked": "no",
                "attachments": [],
            },
            "validated_links": [],
        }))
        .unwrap();

        assert_eq!(homework.id, 77);
        assert_eq!(homework.status.state, Some(HomeworkState::NotCompleted));
        assert_eq!(homework.status.ticked, "no");
        assert!(homework.validated_attachments.is_empty());
    }
}
