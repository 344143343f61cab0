//! Interactive session: login followed by the role-specific menu loop

use crate::auth::{AuthScheme, Authenticator, LegacyDerivedAuthenticator};
use crate::config::Config;
use crate::display::{audit_table, employees_table, products_table};
use crate::error::{CliError, Result};
use crate::menu::{menu_for, title_for, MenuItem};
use crate::prompt::{InquirePrompt, Prompt};
use crate::store::{AuditAccess, InventoryStore};
use colored::Colorize;
use inventory_common::types::{Employee, NewEmployee};
use tracing::{error, info, warn};

/// Whether the menu loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Start an interactive session against the configured datastore
pub fn run(config: &Config) -> Result<()> {
    let store = InventoryStore::open(config.db_path())?;
    let authenticator = config.auth_scheme().authenticator();
    let mut prompt = InquirePrompt;

    if store.count_employees()? == 0 {
        println!(
            "{} No employees registered yet. Run 'inventory init' to create the first manager.",
            "→".cyan()
        );
        return Ok(());
    }

    let session = Session {
        store: &store,
        authenticator: authenticator.as_ref(),
        scheme: config.auth_scheme(),
    };

    let current = match session.login(&mut prompt) {
        Ok(employee) => employee,
        Err(e) if e.is_cancellation() => {
            println!("Goodbye!");
            return Ok(());
        },
        Err(e) => return Err(e),
    };

    println!();
    println!(
        "{} Welcome, {} ({})",
        "✓".green().bold(),
        current.full_name().bold(),
        current.role
    );

    session.menu_loop(&current, &mut prompt)
}

/// Everything a logged-in menu needs
pub struct Session<'a> {
    pub store: &'a InventoryStore,
    pub authenticator: &'a dyn Authenticator,
    pub scheme: AuthScheme,
}

impl Session<'_> {
    /// Ask for employee id and password until they match
    pub fn login(&self, prompt: &mut dyn Prompt) -> Result<Employee> {
        loop {
            println!();
            println!("{}", "--- Sign in ---".cyan().bold());

            let id = prompt.integer("Employee ID:")?;
            let Some(employee) = self.store.find_employee_by_id(id)? else {
                warn!(employee_id = id, "Login with unknown employee id");
                println!("{} Unknown employee ID. Try again.", "✗".red());
                continue;
            };

            let supplied = prompt.password("Password:")?;
            if self.authenticator.verify(&employee, &supplied) {
                info!(employee_id = id, role = %employee.access_role(), "Employee signed in");
                return Ok(employee);
            }

            warn!(employee_id = id, "Login with wrong password");
            println!("{} Incorrect password. Try again.", "✗".red());
        }
    }

    /// Show the menu for `current` until they exit
    pub fn menu_loop(&self, current: &Employee, prompt: &mut dyn Prompt) -> Result<()> {
        let role = current.access_role();
        let items = menu_for(role);

        loop {
            println!();
            let item = match prompt.choose(title_for(role), items.clone()) {
                Ok(item) => item,
                Err(e) if e.is_cancellation() => {
                    println!("Goodbye!");
                    return Ok(());
                },
                Err(e) => return Err(e),
            };

            match self.perform(current, item, prompt) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {},
                Err(CliError::Prompt(inquire::InquireError::OperationCanceled)) => {
                    println!("{} Cancelled.", "→".cyan());
                },
                Err(e) if e.is_cancellation() => {
                    println!("Goodbye!");
                    return Ok(());
                },
                Err(e @ CliError::Database(_)) => {
                    error!(error = %e, item = %item, "Operation failed");
                    println!("{} {}", "✗".red(), e);
                },
                Err(e) => return Err(e),
            }
        }
    }

    /// Carry out one menu item on behalf of `current`
    pub fn perform(&self, current: &Employee, item: MenuItem, prompt: &mut dyn Prompt) -> Result<Flow> {
        if !item.is_allowed_for(current.access_role()) {
            warn!(employee_id = current.id, item = %item, "Menu item not permitted");
            println!("{} Not permitted for your role.", "✗".red());
            return Ok(Flow::Continue);
        }

        let actor = current.id;
        let store = self.store;

        match item {
            MenuItem::AddProduct => {
                let name = prompt.text("Product name:")?;
                let quantity = prompt.integer("Quantity:")?;
                let price = prompt.number("Price:")?;
                let id = store.add_product(&name, quantity, price, actor)?;
                println!("{} Product '{}' added (ID {}).", "✓".green(), name, id);
            },
            MenuItem::ListProducts => {
                let products = store.list_products()?;
                if products.is_empty() {
                    println!("No products.");
                } else {
                    println!("{}", products_table(&products));
                }
            },
            MenuItem::SearchProduct => {
                let query = prompt.text("Name to search:")?;
                match store.find_product_by_name(&query, actor)? {
                    Some(product) => println!("{}", product),
                    None => println!("Not found."),
                }
            },
            MenuItem::UpdateProduct => {
                let id = prompt.integer("Product ID:")?;
                let quantity = prompt.optional_integer("New quantity:")?;
                let price = prompt.optional_number("New price:")?;
                if quantity.is_none() && price.is_none() {
                    println!("{} No quantity or price given; nothing to update.", "→".cyan());
                } else if store.update_product(id, quantity, price, actor)? {
                    println!("{} Product ID {} updated.", "✓".green(), id);
                } else {
                    println!("{} No product with ID {}.", "✗".red(), id);
                }
            },
            MenuItem::DeleteProduct => {
                let id = prompt.integer("Product ID to delete:")?;
                if store.delete_product(id, actor)? {
                    println!("{} Product ID {} deleted.", "✓".green(), id);
                } else {
                    println!("{} No product with ID {}.", "✗".red(), id);
                }
            },
            MenuItem::AddEmployee => {
                let employee = NewEmployee {
                    name: prompt.text("Name:")?,
                    surname: prompt.text("Surname:")?,
                    role: prompt.text("Role:")?,
                    salary: prompt.number("Salary:")?,
                    password: self.authenticator.enroll(&prompt.password("Password:")?),
                };
                let id = store.add_employee(&employee, actor)?;
                println!(
                    "{} Employee '{} {}' added (ID {}).",
                    "✓".green(),
                    employee.name,
                    employee.surname,
                    id
                );
                if self.scheme == AuthScheme::Legacy {
                    println!(
                        "  {} Sign-in password: {}",
                        "→".cyan(),
                        LegacyDerivedAuthenticator::expected_password(id)
                    );
                }
            },
            MenuItem::ListEmployees => {
                let employees = store.list_employees()?;
                if employees.is_empty() {
                    println!("No employees.");
                } else {
                    println!("{}", employees_table(&employees));
                }
            },
            MenuItem::SearchEmployee => {
                let query = prompt.text("Name to search:")?;
                match store.find_employee_by_name(&query, actor)? {
                    Some(employee) => println!("{}", employee),
                    None => println!("Not found."),
                }
            },
            MenuItem::UpdateEmployee => {
                let id = prompt.integer("Employee ID:")?;
                let role = prompt.optional_text("New role:")?;
                let salary = prompt.optional_number("New salary:")?;
                if role.is_none() && salary.is_none() {
                    println!("{} No role or salary given; nothing to update.", "→".cyan());
                } else if store.update_employee(id, role.as_deref(), salary, actor)? {
                    println!("{} Employee ID {} updated.", "✓".green(), id);
                } else {
                    println!("{} No employee with ID {}.", "✗".red(), id);
                }
            },
            MenuItem::DeleteEmployee => {
                let id = prompt.integer("Employee ID to delete:")?;
                if store.delete_employee(id, actor)? {
                    println!("{} Employee ID {} deleted.", "✓".green(), id);
                } else {
                    println!("{} No employee with ID {}.", "✗".red(), id);
                }
            },
            MenuItem::ViewAudit => match store.audit_access(actor)? {
                AuditAccess::Denied => println!("{} Access denied: managers only.", "✗".red()),
                AuditAccess::Granted(records) if records.is_empty() => {
                    println!("No audit records yet.")
                },
                AuditAccess::Granted(records) => println!("{}", audit_table(&records)),
            },
            MenuItem::Exit => {
                println!("Goodbye!");
                return Ok(Flow::Exit);
            },
        }

        Ok(Flow::Continue)
    }
}
