//! Transactional audit hook
//!
//! Wraps a store operation so that its audit entry is written after the
//! operation succeeds and committed together with it.

use crate::audit::logger::{AuditEntry, AuditLogger};
use crate::error::Result;
use inventory_common::types::{AuditAction, AuditTable};
use rusqlite::{Connection, Transaction};

/// Result of an operation run under [`execute_with_audit`]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    /// Row to record in the audit trail; `None` skips the entry
    pub audit_target: Option<i64>,
}

impl<T> Outcome<T> {
    /// Value plus an audit entry for `target_id`
    pub fn audited(value: T, target_id: i64) -> Self {
        Self {
            value,
            audit_target: Some(target_id),
        }
    }

    /// Value with nothing to record
    pub fn silent(value: T) -> Self {
        Self {
            value,
            audit_target: None,
        }
    }
}

/// Run `op` in a transaction and append its audit entry before committing.
///
/// Errors from either the operation or the logger drop the transaction,
/// which rolls both back.
pub fn execute_with_audit<T, F>(
    conn: &mut Connection,
    logger: &dyn AuditLogger,
    actor_id: i64,
    table: AuditTable,
    action: AuditAction,
    op: F,
) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<Outcome<T>>,
{
    let tx = conn.transaction()?;

    let outcome = op(&tx)?;

    if let Some(target_id) = outcome.audit_target {
        logger.log_action(
            &tx,
            &AuditEntry {
                actor_id,
                table,
                action,
                target_id,
            },
        )?;
    }

    tx.commit()?;
    Ok(outcome.value)
}
