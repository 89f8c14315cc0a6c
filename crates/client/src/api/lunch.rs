//! Lunch menu endpoint.

use super::DateRangeQuery;
use crate::client::SchoolApiClient;
use crate::error::SchoolApiResult;
use serde_json::Value;

/// Lunch API.
pub struct LunchApi<'a> {
    client: &'a SchoolApiClient,
}

impl<'a> LunchApi<'a> {
    pub(crate) fn new(client: &'a SchoolApiClient) -> Self {
        Self { client }
    }

    /// Get the lunch menu for a date range.
    pub async fn menu(&self, range: &DateRangeQuery) -> SchoolApiResult<Value> {
        self.client.http.get_with_query("lunch", range).await
    }
}
