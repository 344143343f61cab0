//! Role-specific menus

use inventory_common::types::{Capability, Role};

/// One entry of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    AddProduct,
    ListProducts,
    SearchProduct,
    UpdateProduct,
    DeleteProduct,
    AddEmployee,
    ListEmployees,
    SearchEmployee,
    UpdateEmployee,
    DeleteEmployee,
    ViewAudit,
    Exit,
}

impl MenuItem {
    /// Every item, in display order
    pub const ALL: [MenuItem; 12] = [
        MenuItem::AddProduct,
        MenuItem::ListProducts,
        MenuItem::SearchProduct,
        MenuItem::UpdateProduct,
        MenuItem::DeleteProduct,
        MenuItem::AddEmployee,
        MenuItem::ListEmployees,
        MenuItem::SearchEmployee,
        MenuItem::UpdateEmployee,
        MenuItem::DeleteEmployee,
        MenuItem::ViewAudit,
        MenuItem::Exit,
    ];

    /// Capability needed to see and use the item; `None` for exit
    pub fn required_capability(self) -> Option<Capability> {
        match self {
            MenuItem::AddProduct | MenuItem::UpdateProduct | MenuItem::DeleteProduct => {
                Some(Capability::ManageProducts)
            },
            MenuItem::ListProducts => Some(Capability::ViewProducts),
            MenuItem::SearchProduct => Some(Capability::SearchProducts),
            MenuItem::AddEmployee | MenuItem::UpdateEmployee | MenuItem::DeleteEmployee => {
                Some(Capability::ManageEmployees)
            },
            MenuItem::ListEmployees => Some(Capability::ViewEmployees),
            MenuItem::SearchEmployee => Some(Capability::SearchEmployees),
            MenuItem::ViewAudit => Some(Capability::ViewAudit),
            MenuItem::Exit => None,
        }
    }

    pub fn is_allowed_for(self, role: Role) -> bool {
        self.required_capability().map_or(true, |cap| role.can(cap))
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::AddProduct => "Add product",
            MenuItem::ListProducts => "List products",
            MenuItem::SearchProduct => "Search product by name",
            MenuItem::UpdateProduct => "Update product by ID",
            MenuItem::DeleteProduct => "Delete product by ID",
            MenuItem::AddEmployee => "Add employee",
            MenuItem::ListEmployees => "List employees",
            MenuItem::SearchEmployee => "Search employee by name",
            MenuItem::UpdateEmployee => "Update employee by ID",
            MenuItem::DeleteEmployee => "Delete employee by ID",
            MenuItem::ViewAudit => "View audit trail",
            MenuItem::Exit => "Exit",
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Items shown to `role`, in display order
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    MenuItem::ALL
        .into_iter()
        .filter(|item| item.is_allowed_for(role))
        .collect()
}

/// Menu heading for `role`
pub fn title_for(role: Role) -> &'static str {
    match role {
        Role::Manager => "Inventory & Staff",
        Role::Staff => "Staff Menu",
    }
}
