// School data tools backed by the upstream school API

use crate::error::{ToolError, ToolResult};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use school_api_client::{DateRangeQuery, SchoolApiClient, TimetableQuery};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

const SCHOOL_CODE_DESCRIPTION: &str = "School code as returned by search_school";
const DATE_FORMAT_HINT: &str = "Date in YYYYMMDD format";

fn parse_arguments<T: DeserializeOwned>(tool: &'static str, arguments: Value) -> ToolResult<T> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(tool, e))
}

/// Accepts a JSON integer, a whole-valued float such as `2.0`, or a string
/// holding an integer.
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntLike {
        Int(i64),
        Float(f64),
        Str(String),
    }

    match IntLike::deserialize(deserializer)? {
        IntLike::Int(n) => Ok(n),
        IntLike::Float(f) => whole_float_to_int(f).ok_or_else(|| {
            de::Error::custom(format!("expected an integer, got fractional or out-of-range number {}", f))
        }),
        IntLike::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got \"{}\"", s))),
    }
}

fn whole_float_to_int(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn date_range_schema() -> Value {
    json_schema_object(
        serde_json::json!({
            "start_date": json_schema_string(DATE_FORMAT_HINT),
            "end_date": json_schema_string(DATE_FORMAT_HINT),
            "school_code": json_schema_string(SCHOOL_CODE_DESCRIPTION)
        }),
        vec!["start_date", "end_date", "school_code"],
    )
}

#[derive(Debug, Deserialize)]
struct DateRangeArgs {
    start_date: String,
    end_date: String,
    school_code: String,
}

impl From<DateRangeArgs> for DateRangeQuery {
    fn from(args: DateRangeArgs) -> Self {
        DateRangeQuery::new(args.start_date, args.end_date, args.school_code)
    }
}

/// Tool to search schools by name
pub struct SearchSchoolTool {
    client: SchoolApiClient,
}

impl SearchSchoolTool {
    pub const NAME: &'static str = "search_school";

    pub fn new(client: SchoolApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchSchoolArgs {
    school_name: String,
}

#[async_trait::async_trait]
impl Tool for SearchSchoolTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Search for a school by its name.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "school_name": json_schema_string("Full or partial school name")
                }),
                vec!["school_name"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> ToolResult<CallToolResult> {
        let args: SearchSchoolArgs = parse_arguments(Self::NAME, arguments)?;
        debug!(school_name = %args.school_name, "Searching schools");

        let schools = self.client.schools().search(&args.school_name).await?;
        Ok(CallToolResult::json(schools))
    }
}

/// Tool to list the classes of a grade
pub struct GetClassesTool {
    client: SchoolApiClient,
}

impl GetClassesTool {
    pub const NAME: &'static str = "get_classes";

    pub fn new(client: SchoolApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetClassesArgs {
    #[serde(deserialize_with = "lenient_int")]
    grade: i64,
    school_code: String,
}

#[async_trait::async_trait]
impl Tool for GetClassesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get the list of classes for a specific grade in a school.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "grade": json_schema_integer("Grade (school year)"),
                    "school_code": json_schema_string(SCHOOL_CODE_DESCRIPTION)
                }),
                vec!["grade", "school_code"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> ToolResult<CallToolResult> {
        let args: GetClassesArgs = parse_arguments(Self::NAME, arguments)?;

        let classes = self
            .client
            .schools()
            .classes(args.grade, &args.school_code)
            .await?;
        Ok(CallToolResult::json(classes))
    }
}

/// Tool to fetch a class timetable
pub struct GetTimetableTool {
    client: SchoolApiClient,
}

impl GetTimetableTool {
    pub const NAME: &'static str = "get_timetable";

    pub fn new(client: SchoolApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetTimetableArgs {
    #[serde(deserialize_with = "lenient_int")]
    grade: i64,
    #[serde(deserialize_with = "lenient_int")]
    class_number: i64,
    #[serde(deserialize_with = "lenient_int")]
    week: i64,
    school_code: String,
}

#[async_trait::async_trait]
impl Tool for GetTimetableTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get the timetable for a specific grade and class for a given week. \
                          'week' parameter should be 0 for the current week and 1 for the next week."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "grade": json_schema_integer("Grade (school year)"),
                    "class_number": json_schema_integer("Class number within the grade"),
                    "week": json_schema_integer("0 for the current week, 1 for the next week"),
                    "school_code": json_schema_string(SCHOOL_CODE_DESCRIPTION)
                }),
                vec!["grade", "class_number", "week", "school_code"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> ToolResult<CallToolResult> {
        let args: GetTimetableArgs = parse_arguments(Self::NAME, arguments)?;
        let query = TimetableQuery {
            grade: args.grade,
            class_number: args.class_number,
            week: args.week,
            school_code: args.school_code,
        };

        let timetable = self.client.timetable().get(&query).await?;
        Ok(CallToolResult::json(timetable))
    }
}

/// Tool to fetch the lunch menu for a date range
pub struct GetLunchMenuTool {
    client: SchoolApiClient,
}

impl GetLunchMenuTool {
    pub const NAME: &'static str = "get_lunch_menu";

    pub fn new(client: SchoolApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetLunchMenuTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get the lunch menu for a school for a given date range. \
                          Dates should be in 'YYYYMMDD' format."
                .to_string(),
            input_schema: date_range_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> ToolResult<CallToolResult> {
        let args: DateRangeArgs = parse_arguments(Self::NAME, arguments)?;

        let menu = self.client.lunch().menu(&args.into()).await?;
        Ok(CallToolResult::json(menu))
    }
}

/// Tool to fetch school events for a date range
pub struct GetSchoolEventsTool {
    client: SchoolApiClient,
}

impl GetSchoolEventsTool {
    pub const NAME: &'static str = "get_school_events";

    pub fn new(client: SchoolApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetSchoolEventsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get the school events for a given date range. \
                          Dates should be in 'YYYYMMDD' format."
                .to_string(),
            input_schema: date_range_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> ToolResult<CallToolResult> {
        let args: DateRangeArgs = parse_arguments(Self::NAME, arguments)?;

        let events = self.client.schedule().events(&args.into()).await?;
        Ok(CallToolResult::json(events))
    }
}
