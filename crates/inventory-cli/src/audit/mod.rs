//! Audit trail
//!
//! Every insert, update, delete and found-by-name lookup on products and
//! employees appends one entry to `audit_logs`. Entries are never modified.

pub mod logger;
pub mod middleware;

pub use logger::{count_records, read_trail, AuditEntry, AuditLogger, SqliteAuditLogger};
pub use middleware::{execute_with_audit, Outcome};
