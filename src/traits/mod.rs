//! Trait abstractions used at the crate's I/O seams.
//!
//! The pipeline units depend on [`HttpClient`] rather than on a concrete
//! HTTP library, so tests can count and shape requests without touching the
//! network. Production adapters live in `crate::adapters`.

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
