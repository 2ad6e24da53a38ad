//! Mock adapter implementations for testing.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
