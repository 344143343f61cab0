//! Audit logger trait and the SQLite implementation

use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use inventory_common::types::{AuditAction, AuditRecord, AuditTable, AUDIT_TIMESTAMP_FORMAT};
use rusqlite::{params, Connection, Row};
use tracing::debug;

/// What happened, to which row, and who did it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditEntry {
    pub actor_id: i64,
    pub table: AuditTable,
    pub action: AuditAction,
    pub target_id: i64,
}

/// Appends entries to the audit trail.
///
/// Loggers write through the connection they are handed so the entry lands
/// in the caller's transaction.
pub trait AuditLogger {
    /// Append one entry, returning its id
    fn log_action(&self, conn: &Connection, entry: &AuditEntry) -> Result<i64>;
}

type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// Writes to the `audit_logs` table, stamping entries with the local clock
pub struct SqliteAuditLogger {
    clock: Clock,
}

impl SqliteAuditLogger {
    pub fn new() -> Self {
        Self {
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Use a custom time source (tests)
    pub fn with_clock(clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    fn timestamp(&self) -> String {
        (self.clock)().format(AUDIT_TIMESTAMP_FORMAT).to_string()
    }
}

impl Default for SqliteAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLogger for SqliteAuditLogger {
    fn log_action(&self, conn: &Connection, entry: &AuditEntry) -> Result<i64> {
        let timestamp = self.timestamp();

        conn.execute(
            r#"
            INSERT INTO audit_logs (empleado_id, tabla, accion, registro_id, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.actor_id,
                entry.table.as_str(),
                entry.action.as_str(),
                entry.target_id,
                timestamp,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(
            audit_id = id,
            actor_id = entry.actor_id,
            table = %entry.table,
            action = %entry.action,
            target_id = entry.target_id,
            "Recorded audit entry"
        );
        Ok(id)
    }
}

/// Load the whole trail, newest first
pub fn read_trail(conn: &Connection) -> Result<Vec<AuditRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, empleado_id, tabla, accion, registro_id, timestamp
        FROM audit_logs
        ORDER BY timestamp DESC, id DESC
        "#,
    )?;

    let records = stmt
        .query_map([], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Number of entries in the trail
pub fn count_records(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM audit_logs", [], |row| row.get(0))?;
    Ok(count as usize)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AuditRecord> {
    let table: String = row.get(2)?;
    let table_name = table.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let action: String = row.get(3)?;
    let action = action.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AuditRecord {
        id: row.get(0)?,
        actor_employee_id: row.get(1)?,
        table_name,
        action,
        target_record_id: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::schema;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::init_schema(&conn).unwrap();
        conn
    }

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn entry(target_id: i64) -> AuditEntry {
        AuditEntry {
            actor_id: 1,
            table: AuditTable::Products,
            action: AuditAction::Insert,
            target_id,
        }
    }

    #[test]
    fn test_log_action_writes_row() {
        let conn = conn();
        let logger = SqliteAuditLogger::with_clock(|| at(9, 30, 0));

        let id = logger.log_action(&conn, &entry(42)).unwrap();
        assert_eq!(id, 1);

        let trail = read_trail(&conn).unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].actor_employee_id, 1);
        assert_eq!(trail[0].table_name, AuditTable::Products);
        assert_eq!(trail[0].action, AuditAction::Insert);
        assert_eq!(trail[0].target_record_id, 42);
        assert_eq!(trail[0].timestamp, "2024-05-01 09:30:00");
    }

    #[test]
    fn test_default_clock_format() {
        let conn = conn();
        SqliteAuditLogger::new().log_action(&conn, &entry(1)).unwrap();

        let trail = read_trail(&conn).unwrap();
        let parsed = NaiveDateTime::parse_from_str(&trail[0].timestamp, AUDIT_TIMESTAMP_FORMAT);
        assert!(parsed.is_ok(), "unexpected timestamp: {}", trail[0].timestamp);
        assert_eq!(trail[0].timestamp.len(), 19);
    }

    #[test]
    fn test_trail_newest_first() {
        let conn = conn();
        let seconds = Rc::new(Cell::new(0u32));
        let tick = Rc::clone(&seconds);
        // Clock runs backwards so id order and timestamp order disagree
        let logger = SqliteAuditLogger::with_clock(move || {
            let s = tick.get();
            tick.set(s + 1);
            at(10, 0, 59 - s)
        });

        for target in 1..=3 {
            logger.log_action(&conn, &entry(target)).unwrap();
        }

        let targets: Vec<i64> = read_trail(&conn)
            .unwrap()
            .iter()
            .map(|r| r.target_record_id)
            .collect();
        assert_eq!(targets, vec![1, 2, 3]);
        assert_eq!(seconds.get(), 3);
    }

    #[test]
    fn test_same_second_ties_break_by_id() {
        let conn = conn();
        let logger = SqliteAuditLogger::with_clock(|| at(12, 0, 0));

        for target in 1..=3 {
            logger.log_action(&conn, &entry(target)).unwrap();
        }

        let targets: Vec<i64> = read_trail(&conn)
            .unwrap()
            .iter()
            .map(|r| r.target_record_id)
            .collect();
        assert_eq!(targets, vec![3, 2, 1]);
        assert_eq!(count_records(&conn).unwrap(), 3);
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let conn = conn();
        conn.execute(
            "INSERT INTO audit_logs (empleado_id, tabla, accion, registro_id, timestamp) VALUES (1, 'productos', 'MERGE', 1, '2024-01-01 00:00:00')",
            [],
        )
        .unwrap();

        assert!(read_trail(&conn).is_err());
    }
}
