//! `inventory config` command implementation

use crate::config::{Config, AUTH_SCHEME_ENV, DB_PATH_ENV};
use crate::error::Result;
use colored::Colorize;

/// Show the effective configuration
pub fn show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Inventory CLI Configuration:".cyan().bold());
    println!();
    println!("{:<15} {}", "db_path:", config.db_path().display());
    println!("{:<15} {}", "auth_scheme:", config.auth_scheme());
    println!("{:<15} {}", "verbose:", config.verbose);
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  {:<22} - Datastore file", DB_PATH_ENV);
    println!("  {:<22} - legacy or hashed", AUTH_SCHEME_ENV);
    println!("  {:<22} - trace, debug, info, warn, error", "INVENTORY_LOG_LEVEL");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_show() {
        assert!(show(&Config::new(), false).is_ok());
        assert!(show(&Config::new(), true).is_ok());
    }
}
