//! HTTP transport shared by the remote gateway adapter

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, RetryPolicy};
