//! Inventory datastore
//!
//! `InventoryStore` owns the path to a SQLite file and opens a fresh
//! connection for every operation. Mutations and found-lookups run inside a
//! single transaction together with their audit entry (see
//! [`execute_with_audit`]); the connection is dropped before the call returns.

mod employees;
mod products;
pub mod schema;

use crate::audit::{self, execute_with_audit, AuditLogger, Outcome, SqliteAuditLogger};
use crate::error::Result;
use inventory_common::types::{AuditAction, AuditRecord, AuditTable, Capability};
use rusqlite::{Connection, OptionalExtension, Row, ToSql};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Actor id used for entries written before any employee exists
pub const SYSTEM_ACTOR_ID: i64 = 0;

/// Result of an audit trail request
#[derive(Debug, Clone, PartialEq)]
pub enum AuditAccess {
    /// Actor is a manager; records are newest first
    Granted(Vec<AuditRecord>),
    /// Actor is unknown or not a manager
    Denied,
}

impl AuditAccess {
    /// Records if granted, empty otherwise
    pub fn into_records(self) -> Vec<AuditRecord> {
        match self {
            AuditAccess::Granted(records) => records,
            AuditAccess::Denied => Vec::new(),
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AuditAccess::Denied)
    }
}

/// Persistence and access-control layer for products, employees and the
/// audit trail
pub struct InventoryStore {
    db_path: PathBuf,
    audit: Box<dyn AuditLogger>,
}

impl std::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl InventoryStore {
    /// Open (creating if needed) the datastore at `db_path` and make sure
    /// all tables exist
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path: db_path.into(),
            audit: Box::new(SqliteAuditLogger::new()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Replace the audit logger
    pub fn with_audit_logger(mut self, logger: impl AuditLogger + 'static) -> Self {
        self.audit = Box::new(logger);
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create missing tables. Safe to call any number of times.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.open_connection()?;
        schema::init_schema(&conn)?;
        info!(path = %self.db_path.display(), "Datastore ready");
        Ok(())
    }

    fn open_connection(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&self.db_path)?;
        schema::configure(&conn)?;
        Ok(conn)
    }

    /// Run `op` on a fresh connection through the audit hook
    fn audited<T, F>(&self, actor_id: i64, table: AuditTable, action: AuditAction, op: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> Result<Outcome<T>>,
    {
        let mut conn = self.open_connection()?;
        execute_with_audit(&mut conn, self.audit.as_ref(), actor_id, table, action, op)
    }

    /// Apply `assignments` (e.g. `"cantidad = ?"`) to row `id` of `table`.
    ///
    /// Returns false without touching storage when there is nothing to set,
    /// and false without an audit entry when no row matched.
    fn update_fields(
        &self,
        table: AuditTable,
        id: i64,
        assignments: &[&str],
        values: &[&dyn ToSql],
        actor_id: i64,
    ) -> Result<bool> {
        if assignments.is_empty() {
            debug!(table = %table, id, "Update requested with no fields");
            return Ok(false);
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            table.as_str(),
            assignments.join(", ")
        );
        let mut params = values.to_vec();
        params.push(&id);

        let updated = self.audited(actor_id, table, AuditAction::Update, |tx| {
            let changed = tx.execute(&sql, params.as_slice())?;
            Ok(if changed > 0 {
                Outcome::audited(true, id)
            } else {
                Outcome::silent(false)
            })
        })?;

        debug!(table = %table, id, actor_id, updated, "Update finished");
        Ok(updated)
    }

    /// Delete row `id` of `table`, auditing only when a row was removed
    fn delete_by_id(&self, table: AuditTable, id: i64, actor_id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table.as_str());

        let deleted = self.audited(actor_id, table, AuditAction::Delete, |tx| {
            let changed = tx.execute(&sql, [id])?;
            Ok(if changed > 0 {
                Outcome::audited(true, id)
            } else {
                Outcome::silent(false)
            })
        })?;

        debug!(table = %table, id, actor_id, deleted, "Delete finished");
        Ok(deleted)
    }

    /// First row of `table` (in insertion order) whose `nombre` contains
    /// `substring`; a hit is audited as SELECT
    fn find_first_by_name<T, M>(
        &self,
        table: AuditTable,
        columns: &str,
        substring: &str,
        actor_id: i64,
        map_row: M,
        id_of: fn(&T) -> i64,
    ) -> Result<Option<T>>
    where
        M: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!(
            r"SELECT {} FROM {} WHERE nombre LIKE ?1 ESCAPE '\' ORDER BY id LIMIT 1",
            columns,
            table.as_str()
        );
        let pattern = like_pattern(substring);

        self.audited(actor_id, table, AuditAction::Select, |tx| {
            let found = tx.query_row(&sql, [&pattern], map_row).optional()?;
            Ok(match found {
                Some(row) => {
                    let id = id_of(&row);
                    Outcome::audited(Some(row), id)
                },
                None => Outcome::silent(None),
            })
        })
    }

    // ========================================================================
    // Audit trail
    // ========================================================================

    /// Audit trail for a manager, or an empty list when `actor_id` is
    /// unknown or not a manager.
    ///
    /// An empty result does not tell denial apart from an empty trail; use
    /// [`InventoryStore::audit_access`] when that matters.
    pub fn view_audit(&self, actor_id: i64) -> Result<Vec<AuditRecord>> {
        Ok(self.audit_access(actor_id)?.into_records())
    }

    /// Resolve `actor_id` and return the trail if they may see it
    pub fn audit_access(&self, actor_id: i64) -> Result<AuditAccess> {
        let conn = self.open_connection()?;

        let Some(actor) = employees::fetch_by_id(&conn, actor_id)? else {
            warn!(actor_id, "Audit view requested by unknown employee");
            return Ok(AuditAccess::Denied);
        };

        if !actor.access_role().can(Capability::ViewAudit) {
            warn!(actor_id, role = %actor.role, "Audit view denied");
            return Ok(AuditAccess::Denied);
        }

        let records = audit::read_trail(&conn)?;
        debug!(actor_id, records = records.len(), "Audit view granted");
        Ok(AuditAccess::Granted(records))
    }

    /// Number of entries in the audit trail
    pub fn count_audit_records(&self) -> Result<usize> {
        let conn = self.open_connection()?;
        audit::count_records(&conn)
    }
}

/// `%substring%` with LIKE wildcards in the input matched literally
fn like_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for c in substring.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
