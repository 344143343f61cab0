//! Table rendering for listings

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use inventory_common::types::{AuditRecord, Employee, Product};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);
    table
}

pub fn products_table(products: &[Product]) -> Table {
    let mut table = table(vec!["ID", "Name", "Quantity", "Price"]);
    for product in products {
        table.add_row(vec![
            product.id.to_string(),
            product.name.clone(),
            product.quantity.to_string(),
            format!("{:.2}", product.unit_price),
        ]);
    }
    table
}

/// Stored credentials are never shown
pub fn employees_table(employees: &[Employee]) -> Table {
    let mut table = table(vec!["ID", "Name", "Surname", "Role", "Salary"]);
    for employee in employees {
        table.add_row(vec![
            employee.id.to_string(),
            employee.name.clone(),
            employee.surname.clone(),
            employee.role.clone(),
            format!("{:.2}", employee.salary),
        ]);
    }
    table
}

pub fn audit_table(records: &[AuditRecord]) -> Table {
    let mut table = table(vec!["Time", "Employee", "Action", "Record"]);
    for record in records {
        table.add_row(vec![
            record.timestamp.clone(),
            record.actor_employee_id.to_string(),
            record.action.to_string(),
            format!("{}#{}", record.table_name, record.target_record_id),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_common::types::{AuditAction, AuditTable};

    #[test]
    fn test_products_table() {
        let rendered = products_table(&[Product {
            id: 1,
            name: "Widget".to_string(),
            quantity: 10,
            unit_price: 2.5,
        }])
        .to_string();

        assert!(rendered.contains("Widget"));
        assert!(rendered.contains("2.50"));
        assert!(rendered.contains("Quantity"));
    }

    #[test]
    fn test_employees_table_hides_password() {
        let rendered = employees_table(&[Employee {
            id: 4,
            name: "Ana".to_string(),
            surname: "Ruiz".to_string(),
            role: "Gerente".to_string(),
            salary: 2000.0,
            password: "hunter2".to_string(),
        }])
        .to_string();

        assert!(rendered.contains("Gerente"));
        assert!(rendered.contains("2000.00"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_audit_table() {
        let rendered = audit_table(&[AuditRecord {
            id: 1,
            actor_employee_id: 4,
            table_name: AuditTable::Employees,
            action: AuditAction::Delete,
            target_record_id: 9,
            timestamp: "2024-05-01 10:00:00".to_string(),
        }])
        .to_string();

        assert!(rendered.contains("empleados#9"));
        assert!(rendered.contains("DELETE"));
        assert!(rendered.contains("2024-05-01 10:00:00"));
    }
}
