//! Common types used across the inventory workspace

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

// ============================================================================
// Products
// ============================================================================

/// A stocked product.
///
/// The `id` is assigned by the store at insert time and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} (quantity: {}, price: {:.2})",
            self.id, self.name, self.quantity, self.unit_price
        )
    }
}

// ============================================================================
// Employees
// ============================================================================

/// A member of staff.
///
/// `role` holds the free-text job title as entered (e.g. "Gerente",
/// "Cajero"). Access decisions go through [`Employee::access_role`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub role: String,
    pub salary: f64,
    /// Stored credential; never rendered
    #[serde(skip_serializing)]
    pub password: String,
}

impl Employee {
    /// Role used for access control, derived from the job title
    pub fn access_role(&self) -> Role {
        Role::from_title(&self.role)
    }

    /// "Name Surname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} {} ({}, salary: {:.2})",
            self.id, self.name, self.surname, self.role, self.salary
        )
    }
}

/// Fields for a new employee row.
///
/// `password` is the value persisted as-is; callers enroll it through their
/// authenticator first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub surname: String,
    pub role: String,
    pub salary: f64,
    #[serde(skip_serializing)]
    pub password: String,
}

// ============================================================================
// Roles and capabilities
// ============================================================================

/// Job titles that grant the manager role (compared case-insensitively)
pub const MANAGER_TITLES: &[&str] = &["manager", "gerente"];

/// Something a session is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewProducts,
    SearchProducts,
    ManageProducts,
    ViewEmployees,
    SearchEmployees,
    ManageEmployees,
    ViewAudit,
}

const STAFF_CAPABILITIES: &[Capability] = &[
    Capability::ViewProducts,
    Capability::SearchProducts,
    Capability::ViewEmployees,
    Capability::SearchEmployees,
];

const MANAGER_CAPABILITIES: &[Capability] = &[
    Capability::ViewProducts,
    Capability::SearchProducts,
    Capability::ManageProducts,
    Capability::ViewEmployees,
    Capability::SearchEmployees,
    Capability::ManageEmployees,
    Capability::ViewAudit,
];

/// Access role of an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Staff,
}

impl Role {
    /// Derive the access role from a free-text job title.
    ///
    /// Anything that is not a manager title is staff.
    pub fn from_title(title: &str) -> Self {
        let title = title.trim();
        if MANAGER_TITLES
            .iter()
            .any(|manager| title.eq_ignore_ascii_case(manager))
        {
            Role::Manager
        } else {
            Role::Staff
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Manager => MANAGER_CAPABILITIES,
            Role::Staff => STAFF_CAPABILITIES,
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Audit trail
// ============================================================================

/// Table an audit record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditTable {
    #[serde(rename = "productos")]
    Products,
    #[serde(rename = "empleados")]
    Employees,
}

impl AuditTable {
    /// Name of the table as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditTable::Products => "productos",
            AuditTable::Employees => "empleados",
        }
    }
}

impl std::str::FromStr for AuditTable {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "productos" => Ok(AuditTable::Products),
            "empleados" => Ok(AuditTable::Employees),
            other => Err(InventoryError::Parse(format!("unknown audit table: {}", other))),
        }
    }
}

impl std::fmt::Display for AuditTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Insert,
    Select,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Insert => "INSERT",
            AuditAction::Select => "SELECT",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(AuditAction::Insert),
            "SELECT" => Ok(AuditAction::Select),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(InventoryError::Parse(format!("unknown audit action: {}", other))),
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One append-only entry of the audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    pub actor_employee_id: i64,
    pub table_name: AuditTable,
    pub action: AuditAction,
    pub target_record_id: i64,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

impl AuditRecord {
    /// Parsed `timestamp`; `None` if the stored text is not in
    /// [`AUDIT_TIMESTAMP_FORMAT`]
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, AUDIT_TIMESTAMP_FORMAT).ok()
    }
}

impl std::fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] employee {} {} {}#{}",
            self.timestamp, self.actor_employee_id, self.action, self.table_name, self.target_record_id
        )
    }
}

/// Format used for audit timestamps
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn employee(role: &str) -> Employee {
        Employee {
            id: 7,
            name: "Ana".to_string(),
            surname: "Ruiz".to_string(),
            role: role.to_string(),
            salary: 1500.0,
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_role_from_title() {
        assert_eq!(Role::from_title("Gerente"), Role::Manager);
        assert_eq!(Role::from_title("GERENTE"), Role::Manager);
        assert_eq!(Role::from_title("manager"), Role::Manager);
        assert_eq!(Role::from_title("  Manager "), Role::Manager);
        assert_eq!(Role::from_title("Empleado"), Role::Staff);
        assert_eq!(Role::from_title("staff"), Role::Staff);
        assert_eq!(Role::from_title(""), Role::Staff);
        assert_eq!(Role::from_title("sub-gerente"), Role::Staff);
    }

    #[test]
    fn test_capabilities() {
        assert!(Role::Manager.can(Capability::ViewAudit));
        assert!(Role::Manager.can(Capability::ManageEmployees));
        assert!(!Role::Staff.can(Capability::ViewAudit));
        assert!(!Role::Staff.can(Capability::ManageProducts));
        assert!(Role::Staff.can(Capability::SearchProducts));

        // Staff capabilities are a strict subset of the manager's
        for cap in Role::Staff.capabilities() {
            assert!(Role::Manager.can(*cap));
        }
        assert_eq!(Role::Staff.capabilities().len(), 4);
        assert_eq!(Role::Manager.capabilities().len(), 7);
    }

    #[test]
    fn test_employee_access_role() {
        assert_eq!(employee("Gerente").access_role(), Role::Manager);
        assert_eq!(employee("Empleado").access_role(), Role::Staff);
        assert_eq!(employee("Gerente").full_name(), "Ana Ruiz");
    }

    #[test]
    fn test_employee_display_hides_password() {
        let rendered = employee("Cajero").to_string();
        assert!(rendered.contains("Ana Ruiz"));
        assert!(!rendered.contains("secret"));

        let json = serde_json::to_string(&employee("Cajero")).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_audit_names() {
        assert_eq!(AuditTable::Products.as_str(), "productos");
        assert_eq!(AuditTable::Employees.as_str(), "empleados");
        assert_eq!("empleados".parse::<AuditTable>().unwrap(), AuditTable::Employees);
        assert!("orders".parse::<AuditTable>().is_err());

        assert_eq!(AuditAction::Select.as_str(), "SELECT");
        assert_eq!("DELETE".parse::<AuditAction>().unwrap(), AuditAction::Delete);
        assert!("delete".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_audit_record_recorded_at() {
        let mut record = AuditRecord {
            id: 1,
            actor_employee_id: 7,
            table_name: AuditTable::Products,
            action: AuditAction::Insert,
            target_record_id: 1,
            timestamp: "2024-05-01 10:30:00".to_string(),
        };
        let at = record.recorded_at().unwrap();
        assert_eq!(at.format(AUDIT_TIMESTAMP_FORMAT).to_string(), record.timestamp);

        record.timestamp = "yesterday".to_string();
        assert!(record.recorded_at().is_none());
    }

    #[test]
    fn test_audit_record_display() {
        let record = AuditRecord {
            id: 1,
            actor_employee_id: 3,
            table_name: AuditTable::Products,
            action: AuditAction::Insert,
            target_record_id: 9,
            timestamp: "2024-05-01 10:00:00".to_string(),
        };
        assert_eq!(record.to_string(), "[2024-05-01 10:00:00] employee 3 INSERT productos#9");
    }

    proptest! {
        #[test]
        fn prop_manager_title_any_case(mask in proptest::collection::vec(any::<bool>(), 7)) {
            let title: String = "gerente"
                .chars()
                .zip(mask)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(Role::from_title(&title), Role::Manager);
        }

        #[test]
        fn prop_other_titles_are_staff(title in "[a-z]{1,12}") {
            prop_assume!(!MANAGER_TITLES.contains(&title.as_str()));
            prop_assert_eq!(Role::from_title(&title), Role::Staff);
        }
    }
}
