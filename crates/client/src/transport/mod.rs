//! Transport layer for the school API client.

pub mod http;

pub use http::HttpTransport;
