//! Extraction tests per grammar family

pub mod javascript_family;
