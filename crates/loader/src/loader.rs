//! One-shot catalog file loading.

use std::fs;
use std::path::Path;

use thiserror::Error;

use lavka_catalog::{Category, CatalogRegistry, Product, new_product};
use lavka_core::CatalogError;

use crate::records::CategoryRecord;

/// Why a catalog file failed to load.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file is absent or unreadable.
    #[error("failed to read catalog file: {0}")]
    Read(#[from] std::io::Error),

    /// The file content does not describe a catalog.
    #[error("catalog file is malformed: {0}")]
    Format(#[from] serde_json::Error),

    /// The file parsed, but a record was refused by the domain rules.
    #[error("catalog file contains invalid data: {0}")]
    Invalid(#[from] CatalogError),
}

/// Reads a JSON catalog file and builds the domain objects.
///
/// Products flow through [`new_product`], so duplicate names inside one
/// category record merge and zero-quantity records are refused. Categories
/// are constructed in file order against the given registry; counters and
/// hooks fire as usual.
pub fn load_catalog(
    path: impl AsRef<Path>,
    registry: &mut CatalogRegistry,
) -> Result<Vec<Category>, LoaderError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let records: Vec<CategoryRecord> = serde_json::from_str(&raw)?;

    let mut categories = Vec::with_capacity(records.len());
    let mut product_total = 0usize;
    for record in records {
        let mut products: Vec<Product> = Vec::with_capacity(record.products.len());
        for product in record.products {
            new_product(product.into_draft(), &mut products)?;
        }
        product_total += products.len();
        categories.push(Category::new(
            record.name,
            record.description,
            products,
            registry,
        ));
    }

    tracing::info!(
        path = %path.display(),
        categories = categories.len(),
        products = product_total,
        "catalog loaded"
    );

    Ok(categories)
}
