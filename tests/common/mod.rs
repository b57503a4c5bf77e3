//! Common test utilities and fixtures for semdiff integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating throwaway git repositories
//! - Custom assertions for validating CLI output

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod test_repo;

pub use assertions::*;
pub use test_repo::TestRepo;
