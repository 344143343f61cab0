//! `inventory init` command implementation
//!
//! Creates the tables and, on an empty datastore, the first employee.

use crate::auth::{AuthScheme, LegacyDerivedAuthenticator};
use crate::config::Config;
use crate::error::Result;
use crate::prompt::{InquirePrompt, Prompt};
use crate::store::{InventoryStore, SYSTEM_ACTOR_ID};
use crate::InitArgs;
use colored::Colorize;
use inventory_common::types::NewEmployee;
use tracing::info;

/// Initialize the datastore
pub fn run(config: &Config, args: InitArgs) -> Result<()> {
    let store = InventoryStore::open(config.db_path())?;
    println!(
        "{} Datastore ready at {}",
        "✓".green(),
        config.db_path().display()
    );

    let existing = store.count_employees()?;
    if existing > 0 {
        println!(
            "{} {} employee(s) already registered; nothing else to do.",
            "→".cyan(),
            existing
        );
        return Ok(());
    }

    let employee = first_employee(args, config.auth_scheme(), &mut InquirePrompt)?;
    let id = store.add_employee(&employee, SYSTEM_ACTOR_ID)?;
    info!(employee_id = id, role = %employee.role, "First employee created");

    println!();
    println!(
        "{} Created {} {} ({}) with ID {}",
        "✓".green().bold(),
        employee.name,
        employee.surname,
        employee.role,
        id
    );
    if config.auth_scheme() == AuthScheme::Legacy {
        println!(
            "  {} Sign-in password: {}",
            "→".cyan(),
            LegacyDerivedAuthenticator::expected_password(id)
        );
    }
    println!();
    println!("Next: {}", "inventory session".bold());

    Ok(())
}

/// Fill in whatever `args` leaves out by asking, then enroll the password
pub fn first_employee(
    args: InitArgs,
    scheme: AuthScheme,
    prompt: &mut dyn Prompt,
) -> Result<NewEmployee> {
    let name = match args.name {
        Some(name) => name,
        None => prompt.text("Name:")?,
    };
    let surname = match args.surname {
        Some(surname) => surname,
        None => prompt.text("Surname:")?,
    };
    let salary = match args.salary {
        Some(salary) => salary,
        None => prompt.number("Salary:")?,
    };
    // Legacy logins never read the stored value
    let password = match (args.password, scheme) {
        (Some(password), _) => password,
        (None, AuthScheme::Legacy) => String::new(),
        (None, AuthScheme::Hashed) => prompt.password("Password:")?,
    };

    Ok(NewEmployee {
        name,
        surname,
        role: args.role,
        salary,
        password: scheme.authenticator().enroll(&password),
    })
}
