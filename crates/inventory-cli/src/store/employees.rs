//! Employee operations

use super::InventoryStore;
use crate::audit::Outcome;
use crate::error::Result;
use inventory_common::types::{AuditAction, AuditTable, Employee, NewEmployee};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use tracing::{debug, info};

const COLUMNS: &str = "id, nombre, apellido, cargo, salario, password";

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        surname: row.get(2)?,
        role: row.get(3)?,
        salary: row.get(4)?,
        password: row.get(5)?,
    })
}

/// Look up one employee on an open connection
pub(super) fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Employee>> {
    let employee = conn
        .query_row(
            &format!("SELECT {} FROM empleados WHERE id = ?1", COLUMNS),
            [id],
            employee_from_row,
        )
        .optional()?;
    Ok(employee)
}

impl InventoryStore {
    /// Insert an employee and return their id.
    ///
    /// `employee.password` is stored exactly as given.
    pub fn add_employee(&self, employee: &NewEmployee, actor_id: i64) -> Result<i64> {
        let id = self.audited(actor_id, AuditTable::Employees, AuditAction::Insert, |tx| {
            tx.execute(
                r#"
                INSERT INTO empleados (nombre, apellido, cargo, salario, password)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    employee.name,
                    employee.surname,
                    employee.role,
                    employee.salary,
                    employee.password,
                ],
            )?;
            let id = tx.last_insert_rowid();
            Ok(Outcome::audited(id, id))
        })?;

        info!(employee_id = id, role = %employee.role, actor_id, "Employee added");
        Ok(id)
    }

    /// All employees in insertion order
    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let conn = self.open_connection()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM empleados ORDER BY id", COLUMNS))?;

        let employees = stmt
            .query_map([], employee_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Employee by id. Not audited: this is what login and role checks use.
    pub fn find_employee_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let conn = self.open_connection()?;
        fetch_by_id(&conn, id)
    }

    /// First employee (by id) whose first name contains `substring`
    pub fn find_employee_by_name(
        &self,
        substring: &str,
        actor_id: i64,
    ) -> Result<Option<Employee>> {
        let found = self.find_first_by_name(
            AuditTable::Employees,
            COLUMNS,
            substring,
            actor_id,
            employee_from_row,
            |employee: &Employee| employee.id,
        )?;

        debug!(query = %substring, found = found.is_some(), "Employee search");
        Ok(found)
    }

    /// Set role and/or salary of employee `id`.
    ///
    /// Name, surname and password cannot be changed here. Returns false when
    /// neither field is given or no employee has that id.
    pub fn update_employee(
        &self,
        id: i64,
        new_role: Option<&str>,
        new_salary: Option<f64>,
        actor_id: i64,
    ) -> Result<bool> {
        let mut assignments = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(ref role) = new_role {
            assignments.push("cargo = ?");
            values.push(role);
        }
        if let Some(ref salary) = new_salary {
            assignments.push("salario = ?");
            values.push(salary);
        }

        self.update_fields(AuditTable::Employees, id, &assignments, &values, actor_id)
    }

    /// Delete employee `id`; false if they did not exist.
    ///
    /// Audit entries attributed to the employee are kept.
    pub fn delete_employee(&self, id: i64, actor_id: i64) -> Result<bool> {
        self.delete_by_id(AuditTable::Employees, id, actor_id)
    }

    pub fn count_employees(&self) -> Result<usize> {
        let conn = self.open_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM empleados", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use crate::store::tests::{create_test_store, employee};
    use inventory_common::types::{AuditAction, AuditTable, Role};

    #[test]
    fn test_add_and_find_by_id() {
        let (store, _dir) = create_test_store();
        let new = employee("Ana", "Gerente");

        let id = store.add_employee(&new, 0).unwrap();
        let found = store.find_employee_by_id(id).unwrap().unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.name, "Ana");
        assert_eq!(found.surname, "Tester");
        assert_eq!(found.role, "Gerente");
        assert_eq!(found.salary, 1000.0);
        assert_eq!(found.password, "pw");
        assert_eq!(found.access_role(), Role::Manager);

        let trail = store.view_audit_unchecked();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].table_name, AuditTable::Employees);
        assert_eq!(trail[0].action, AuditAction::Insert);
        assert_eq!(trail[0].target_record_id, id);
    }

    #[test]
    fn test_find_by_id_not_audited() {
        let (store, _dir) = create_test_store();
        let id = store.add_employee(&employee("Ana", "Gerente"), 0).unwrap();

        store.find_employee_by_id(id).unwrap();
        assert!(store.find_employee_by_id(id + 1).unwrap().is_none());
        assert_eq!(store.count_audit_records().unwrap(), 1);
    }

    #[test]
    fn test_list() {
        let (store, _dir) = create_test_store();
        store.add_employee(&employee("Ana", "Gerente"), 0).unwrap();
        store.add_employee(&employee("Luis", "Cajero"), 1).unwrap();

        let names: Vec<String> = store
            .list_employees()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Luis"]);
        assert_eq!(store.count_employees().unwrap(), 2);
        assert_eq!(store.count_audit_records().unwrap(), 2);
    }

    #[test]
    fn test_find_by_name() {
        let (store, _dir) = create_test_store();
        let ana = store.add_employee(&employee("Ana", "Gerente"), 0).unwrap();
        store.add_employee(&employee("Mariana", "Cajero"), ana).unwrap();

        // Both names contain "ana"; the first inserted wins
        let hit = store.find_employee_by_name("ana", 5).unwrap().unwrap();
        assert_eq!(hit.id, ana);

        let trail = store.view_audit_unchecked();
        assert_eq!(trail[0].action, AuditAction::Select);
        assert_eq!(trail[0].actor_employee_id, 5);
        assert_eq!(trail[0].target_record_id, ana);

        // Surname is not searched
        assert!(store.find_employee_by_name("Tester", 5).unwrap().is_none());
        assert_eq!(store.count_audit_records().unwrap(), 3);
    }

    #[test]
    fn test_update_role_only() {
        let (store, _dir) = create_test_store();
        let id = store.add_employee(&employee("Luis", "Cajero"), 0).unwrap();

        assert!(store.update_employee(id, Some("Gerente"), None, 0).unwrap());

        let updated = store.find_employee_by_id(id).unwrap().unwrap();
        assert_eq!(updated.role, "Gerente");
        assert_eq!(updated.salary, 1000.0);
        assert_eq!(updated.access_role(), Role::Manager);
    }

    #[test]
    fn test_update_salary_only() {
        let (store, _dir) = create_test_store();
        let id = store.add_employee(&employee("Luis", "Cajero"), 0).unwrap();

        assert!(store.update_employee(id, None, Some(1250.5), 0).unwrap());

        let updated = store.find_employee_by_id(id).unwrap().unwrap();
        assert_eq!(updated.role, "Cajero");
        assert_eq!(updated.salary, 1250.5);
        assert_eq!(updated.name, "Luis");
        assert_eq!(updated.password, "pw");
    }

    #[test]
    fn test_update_noop_and_missing() {
        let (store, _dir) = create_test_store();
        let id = store.add_employee(&employee("Luis", "Cajero"), 0).unwrap();

        assert!(!store.update_employee(id, None, None, 0).unwrap());
        assert!(!store.update_employee(id + 10, Some("Gerente"), None, 0).unwrap());
        assert_eq!(store.count_audit_records().unwrap(), 1);
    }

    #[test]
    fn test_delete_keeps_audit_history() {
        let (store, _dir) = create_test_store();
        let manager = store.add_employee(&employee("Ana", "Gerente"), 0).unwrap();
        let staff = store.add_employee(&employee("Luis", "Cajero"), manager).unwrap();
        store.add_product("Widget", 1, 1.0, staff).unwrap();

        assert!(store.delete_employee(staff, manager).unwrap());
        assert!(store.find_employee_by_id(staff).unwrap().is_none());
        assert!(!store.delete_employee(staff, manager).unwrap());

        let trail = store.view_audit(manager).unwrap();
        assert_eq!(trail.len(), 4);
        assert_eq!(trail[0].action, AuditAction::Delete);
        assert!(trail.iter().any(|r| r.actor_employee_id == staff));
    }
}
