//! petfacts: collect unique cat and dog facts into SQLite and report
//! word-frequency statistics over them.

pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod report;
pub mod store;
