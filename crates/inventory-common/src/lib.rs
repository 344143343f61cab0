//! Inventory Common Library
//!
//! Shared types, utilities, and error handling for the inventory workspace.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error types and result types
//! - **Credentials**: Salted password hashing for employee logins
//! - **Types**: Products, employees, audit records and roles
//! - **Logging**: `tracing` subscriber setup shared by binaries
//!
//! # Example
//!
//! ```
//! use inventory_common::types::{Capability, Role};
//!
//! let role = Role::from_title("Gerente");
//! assert_eq!(role, Role::Manager);
//! assert!(role.can(Capability::ViewAudit));
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod credential;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{InventoryError, Result};
