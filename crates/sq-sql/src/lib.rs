//! sq-sql - SQL migration script parsing for sqlstep
//!
//! This crate parses declarative SQL migration scripts: it strips line
//! comments, unwraps the mandatory transaction block, and extracts the
//! `PRAGMA user_version` value the script declares.

pub mod error;
pub mod parser;

pub use error::SqlError;
pub use parser::{declared_user_version, strip_line_comments, transaction_body};
