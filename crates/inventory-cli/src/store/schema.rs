//! SQLite schema for the inventory datastore

use crate::error::Result;
use rusqlite::Connection;

/// Per-connection settings.
///
/// The bundled SQLite enforces foreign keys by default; the audit trail's
/// reference to `empleados` is informational only, so enforcement is off.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", false)?;
    Ok(())
}

/// Create the products, employees and audit tables if they are missing
pub fn init_schema(conn: &Connection) -> Result<()> {
    configure(conn)?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS productos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            cantidad INTEGER NOT NULL,
            precio REAL NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS empleados (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            apellido TEXT NOT NULL,
            cargo TEXT NOT NULL,
            salario REAL NOT NULL,
            password TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS audit_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            empleado_id INTEGER NOT NULL,
            tabla TEXT NOT NULL,
            accion TEXT NOT NULL,
            registro_id INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            FOREIGN KEY(empleado_id) REFERENCES empleados(id)
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_audit_logs_timestamp ON audit_logs(timestamp)",
        [],
    )?;

    Ok(())
}
