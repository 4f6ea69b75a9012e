use crate::error::Result;
use crate::interfaces::activity::{self, ActivityOptions, ActivityPoint, ActivityResponse};
use crate::interfaces::announcements::{self, AnnouncementsResponse};
use crate::interfaces::attendance::{self, AttendanceResponse};
use crate::interfaces::badges::{self, BadgesResponse};
use crate::interfaces::behaviour::{self, BehaviourResponse};
use crate::interfaces::detentions::{self, DetentionsResponse};
use crate::interfaces::homework::{self, HomeworkOptions, HomeworksResponse};
use crate::interfaces::lessons::{self, LessonsResponse};
use crate::interfaces::pupil_fields::{self, PupilFieldsResponse};
use crate::interfaces::student_info::{self, StudentInfoResponse};
use crate::interfaces::DateRangeOptions;
use crate::session::Session;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

/// Supports logging in to ClassCharts.
#[async_trait]
pub trait Login {
    /// Run the login handshake and fill in the session.
    ///
    /// Validates the stored credentials before any network call.
    async fn login(&mut self) -> Result<()>;
}

/// A logged in client. Everything here works for both parents and students
/// and applies to the currently selected student.
///
/// A client is not meant to be shared: every call takes `&mut self`, since
/// any request may refresh the session id.
#[async_trait]
pub trait ClassChartsClient: Login + Send {
    fn session(&self) -> &Session;

    fn session_mut(&mut self) -> &mut Session;

    /// General information about the current student.
    async fn get_student_info(&mut self) -> Result<StudentInfoResponse> {
        student_info::from_req(self.session_mut()).await
    }

    /// One page of activity. You most likely want [`Self::get_full_activity`].
    async fn get_activity(&mut self, options: ActivityOptions) -> Result<ActivityResponse> {
        activity::from_req(self.session_mut(), &options).await
    }

    /// All activity between two dates, following the `last_id` cursor until
    /// a page comes back empty.
    async fn get_full_activity(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivityPoint>> {
        let mut points = vec![];
        let mut last_id = None;

        loop {
            let options = ActivityOptions {
                from: Some(from),
                to: Some(to),
                last_id,
            };
            let page = self.get_activity(options).await?.data;
            let Some(last) = page.last() else {
                break;
            };
            last_id = Some(last.id);
            debug!("Got {} activity points, continuing after {}", page.len(), last.id);
            points.extend(page);
        }

        Ok(points)
    }

    async fn get_behaviour(&mut self, options: DateRangeOptions) -> Result<BehaviourResponse> {
        behaviour::from_req(self.session_mut(), &options).await
    }

    async fn get_homeworks(&mut self, options: HomeworkOptions) -> Result<HomeworksResponse> {
        homework::from_req(self.session_mut(), &options).await
    }

    /// Timetable of the given day.
    async fn get_lessons(&mut self, date: NaiveDate) -> Result<LessonsResponse> {
        lessons::from_req(self.session_mut(), date).await
    }

    async fn get_badges(&mut self) -> Result<BadgesResponse> {
        badges::from_req(self.session_mut()).await
    }

    async fn get_announcements(&mut self) -> Result<AnnouncementsResponse> {
        announcements::from_req(self.session_mut()).await
    }

    async fn get_detentions(&mut self) -> Result<DetentionsResponse> {
        detentions::from_req(self.session_mut()).await
    }

    async fn get_attendance(&mut self, options: DateRangeOptions) -> Result<AttendanceResponse> {
        attendance::from_req(self.session_mut(), &options).await
    }

    async fn get_pupil_fields(&mut self) -> Result<PupilFieldsResponse> {
        pupil_fields::from_req(self.session_mut()).await
    }
}
