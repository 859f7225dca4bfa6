//! Shared test helpers for `linkreach-core` integration tests.
//!
//! In-memory mocks for every core port plus record fixtures, so that tests
//! can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;
