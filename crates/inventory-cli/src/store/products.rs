//! Product operations

use super::InventoryStore;
use crate::audit::Outcome;
use crate::error::Result;
use inventory_common::types::{AuditAction, AuditTable, Product};
use rusqlite::{params, Row, ToSql};
use tracing::{debug, info};

const COLUMNS: &str = "id, nombre, cantidad, precio";

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit_price: row.get(3)?,
    })
}

impl InventoryStore {
    /// Insert a product and return its id
    pub fn add_product(
        &self,
        name: &str,
        quantity: i64,
        unit_price: f64,
        actor_id: i64,
    ) -> Result<i64> {
        let id = self.audited(actor_id, AuditTable::Products, AuditAction::Insert, |tx| {
            tx.execute(
                "INSERT INTO productos (nombre, cantidad, precio) VALUES (?1, ?2, ?3)",
                params![name, quantity, unit_price],
            )?;
            let id = tx.last_insert_rowid();
            Ok(Outcome::audited(id, id))
        })?;

        info!(product_id = id, name = %name, actor_id, "Product added");
        Ok(id)
    }

    /// All products in insertion order
    pub fn list_products(&self) -> Result<Vec<Product>> {
        let conn = self.open_connection()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM productos ORDER BY id", COLUMNS))?;

        let products = stmt
            .query_map([], product_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// First product (by id) whose name contains `substring`
    pub fn find_product_by_name(&self, substring: &str, actor_id: i64) -> Result<Option<Product>> {
        let found = self.find_first_by_name(
            AuditTable::Products,
            COLUMNS,
            substring,
            actor_id,
            product_from_row,
            |product: &Product| product.id,
        )?;

        debug!(query = %substring, found = found.is_some(), "Product search");
        Ok(found)
    }

    /// Set quantity and/or price of product `id`.
    ///
    /// Returns false when neither field is given or no product has that id.
    pub fn update_product(
        &self,
        id: i64,
        new_quantity: Option<i64>,
        new_price: Option<f64>,
        actor_id: i64,
    ) -> Result<bool> {
        let mut assignments = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(ref quantity) = new_quantity {
            assignments.push("cantidad = ?");
            values.push(quantity);
        }
        if let Some(ref price) = new_price {
            assignments.push("precio = ?");
            values.push(price);
        }

        self.update_fields(AuditTable::Products, id, &assignments, &values, actor_id)
    }

    /// Delete product `id`; false if it did not exist
    pub fn delete_product(&self, id: i64, actor_id: i64) -> Result<bool> {
        self.delete_by_id(AuditTable::Products, id, actor_id)
    }
}
