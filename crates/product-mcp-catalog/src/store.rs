use std::collections::BTreeSet;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{InventoryStatus, Product, ProductSummary};
use crate::seed::seed_products;

/// Immutable product collection. Results always follow catalog (insertion) order.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Store holding the built-in product definitions
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive substring match on name AND case-insensitive exact match on category.
    /// An empty filter matches everything.
    pub fn search(&self, query: &str, category: &str) -> Vec<ProductSummary> {
        let query = query.to_lowercase();
        let category = category.to_lowercase();

        self.products
            .iter()
            .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
            .filter(|p| category.is_empty() || p.category.to_lowercase() == category)
            .map(ProductSummary::from)
            .collect()
    }

    pub fn get_details(&self, product_id: &str) -> CatalogResult<Product> {
        self.find(product_id).cloned()
    }

    pub fn get_inventory(&self, product_id: &str) -> CatalogResult<InventoryStatus> {
        self.find(product_id).map(InventoryStatus::from)
    }

    /// Distinct categories, sorted lexicographically
    pub fn list_categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn find(&self, product_id: &str) -> CatalogResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CatalogError::NotFound(product_id.to_string()))
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}
