//! Timetable endpoint.

use crate::client::SchoolApiClient;
use crate::error::SchoolApiResult;
use serde::Serialize;
use serde_json::Value;

/// Timetable API.
pub struct TimetableApi<'a> {
    client: &'a SchoolApiClient,
}

impl<'a> TimetableApi<'a> {
    pub(crate) fn new(client: &'a SchoolApiClient) -> Self {
        Self { client }
    }

    /// Get the weekly timetable of one class.
    pub async fn get(&self, query: &TimetableQuery) -> SchoolApiResult<Value> {
        self.client.http.get_with_query("timetable", query).await
    }
}

/// Query for `GET /timetable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableQuery {
    pub grade: i64,
    #[serde(rename = "classno")]
    pub class_number: i64,
    /// 0 for the current week, 1 for the next. Forwarded as-is.
    pub week: i64,
    #[serde(rename = "schoolcode")]
    pub school_code: String,
}
