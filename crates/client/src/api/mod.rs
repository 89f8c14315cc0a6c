//! Upstream API endpoint groups.

mod lunch;
mod schedule;
mod schools;
mod timetable;

pub use lunch::LunchApi;
pub use schedule::ScheduleApi;
pub use schools::{ClassesQuery, SchoolSearchQuery, SchoolsApi};
pub use timetable::{TimetableApi, TimetableQuery};

use serde::Serialize;

/// Query shared by the date-ranged endpoints (`/lunch`, `/schedule`).
///
/// Dates are passed through as given; the upstream expects `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeQuery {
    #[serde(rename = "startdate")]
    pub start_date: String,
    #[serde(rename = "enddate")]
    pub end_date: String,
    #[serde(rename = "schoolcode")]
    pub school_code: String,
}

impl DateRangeQuery {
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        school_code: impl Into<String>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            school_code: school_code.into(),
        }
    }
}
