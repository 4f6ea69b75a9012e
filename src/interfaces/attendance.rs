//! Attendance marks per day and session.
//! URL: {api_base}/attendance/{student_id}

use super::response::{ApiResponse, NumberOrString};
use super::DateRangeOptions;
use crate::error::Result;
use crate::session::{ApiRequest, Session};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Yes,
    Present,
    Ignore,
    No,
    Absent,
    Excused,
    Late,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttendancePeriod {
    pub code: String,
    pub status: Option<AttendanceStatus>,
    pub late_minutes: NumberOrString,
    pub lesson_name: String,
    pub room_name: String,
}

/// Date to session name (`"AM"`, `"PM"`, ...) to mark.
pub type AttendanceData = BTreeMap<String, BTreeMap<String, AttendancePeriod>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttendanceMeta {
    pub dates: Vec<String>,
    pub sessions: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub percentage: String,
    /// Spelled this way by the server.
    pub percentage_singe_august: String,
}

pub type AttendanceResponse = ApiResponse<AttendanceData, AttendanceMeta>;

pub(crate) async fn from_req(
    session: &mut Session,
    options: &DateRangeOptions,
) -> Result<AttendanceResponse> {
    let request = options.apply(ApiRequest::get(format!(
        "/attendance/{}",
        session.subject_id()
    )));
    session.request(request).await
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_days_and_sessions() {
        let response: AttendanceResponse = serde_json::from_value(json!({
            "success": 1,
            "data": {
                "2024-03-04": {
                    "AM": { "code": "/", "status": "present", "late_minutes": 0 },
                    "PM": { "code": "L", "status": "late", "late_minutes": "5" },
                },
            },
            "meta": { "percentage": "97.5", "sessions": ["AM", "PM"] },
        }))
        .unwrap();

        let day = &response.data["2024-03-04"];
        assert_eq!(day["AM"].status, Some(AttendanceStatus::Present));
        assert_eq!(day["PM"].late_minutes, NumberOrString::Text("5".to_string()));
        assert_eq!(response.meta.percentage, "97.5");
    }
}
