//! School event schedule endpoint.

use super::DateRangeQuery;
use crate::client::SchoolApiClient;
use crate::error::SchoolApiResult;
use serde_json::Value;

/// Schedule API.
pub struct ScheduleApi<'a> {
    client: &'a SchoolApiClient,
}

impl<'a> ScheduleApi<'a> {
    pub(crate) fn new(client: &'a SchoolApiClient) -> Self {
        Self { client }
    }

    /// Get school events for a date range.
    pub async fn events(&self, range: &DateRangeQuery) -> SchoolApiResult<Value> {
        self.client.http.get_with_query("schedule", range).await
    }
}
