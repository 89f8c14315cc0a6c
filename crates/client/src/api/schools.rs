//! School search and class listing endpoints.

use crate::client::SchoolApiClient;
use crate::error::SchoolApiResult;
use serde::Serialize;
use serde_json::Value;

/// Schools API for looking up schools and their classes.
pub struct SchoolsApi<'a> {
    client: &'a SchoolApiClient,
}

impl<'a> SchoolsApi<'a> {
    pub(crate) fn new(client: &'a SchoolApiClient) -> Self {
        Self { client }
    }

    /// Search for schools by name.
    pub async fn search(&self, school_name: &str) -> SchoolApiResult<Value> {
        let query = SchoolSearchQuery {
            school_name: school_name.to_string(),
        };
        self.client.http.get_with_query("school", &query).await
    }

    /// List the classes of one grade in a school.
    pub async fn classes(&self, grade: i64, school_code: &str) -> SchoolApiResult<Value> {
        let query = ClassesQuery {
            grade,
            school_code: school_code.to_string(),
        };
        self.client.http.get_with_query("classes", &query).await
    }
}

/// Query for `GET /school`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolSearchQuery {
    #[serde(rename = "schoolname")]
    pub school_name: String,
}

/// Query for `GET /classes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassesQuery {
    pub grade: i64,
    #[serde(rename = "schoolcode")]
    pub school_code: String,
}
