//! # School API client
//!
//! Async client for the school information HTTP API: school search, class
//! lists, timetables, lunch menus and event schedules. Response bodies are
//! returned as decoded JSON, unchanged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use school_api_client::{SchoolApiClient, SchoolApiResult};
//!
//! #[tokio::main]
//! async fn main() -> SchoolApiResult<()> {
//!     let client = SchoolApiClient::builder()
//!         .base_url("https://school-api-1i8w.onrender.com")
//!         .build()?;
//!
//!     let schools = client.schools().search("Hanbit").await?;
//!     println!("{}", schools);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{ClassesQuery, DateRangeQuery, SchoolSearchQuery, TimetableQuery};
pub use client::{SchoolApiClient, SchoolApiClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{SchoolApiError, SchoolApiResult};
