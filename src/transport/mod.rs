//! Transport layer for talking to the gateway over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client with a lazily created session ([`ReqwestClient`])
//! - Fixed-count retry configuration ([`RetryPolicy`])

mod client;
mod error;
mod http;
mod retry;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
