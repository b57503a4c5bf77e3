//! CLI integration tests
//!
//! Run the compiled binary against temporary git repositories and check
//! report text, JSON output and exit codes.

pub mod error_tests;
