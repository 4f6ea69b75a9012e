//! Response shapes of the ClassCharts endpoints.
//!
//! Each module describes one endpoint and knows how to request it through a
//! [`Session`](crate::session::Session). Fields are lenient: anything the
//! school leaves out falls back to its default.

use crate::session::ApiRequest;
use chrono::NaiveDate;

pub mod activity;
pub mod announcements;
pub mod attendance;
pub mod badges;
pub mod behaviour;
pub mod detentions;
pub mod homework;
pub mod lessons;
pub mod password;
pub mod pupil_fields;
pub mod pupils;
pub mod response;
pub mod rewards;
pub mod student_code;
pub mod student_info;

/// Date format of every `from`/`to`/`date` parameter.
pub(crate) const DATE_FMT: &str = "%Y-%m-%d";

/// Optional `from`/`to` bounds, both inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRangeOptions {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeOptions {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("from", self.from.map(|d| d.format(DATE_FMT).to_string()))
            .query_opt("to", self.to.map(|d| d.format(DATE_FMT).to_string()))
    }
}
