//! Serde record types mirroring the catalog file shape.
//!
//! Records are strict (`deny_unknown_fields`): an entry that does not have
//! a product's shape is a parse failure, not a silently dropped field.

use serde::Deserialize;

use lavka_catalog::{LawnSeedSpec, ProductDraft, ProductKind, SmartphoneSpec};

/// One category entry in the catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRecord {
    pub name: String,
    pub description: String,
    pub products: Vec<ProductRecord>,
}

/// One product entry inside a category record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRecord {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    /// Absent means a base-kind product.
    #[serde(default)]
    pub kind: Option<KindRecord>,
}

/// Optional kind object on a product record, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindRecord {
    Smartphone {
        performance: f64,
        model: String,
        storage_gb: u32,
        color: String,
    },
    LawnSeed {
        country: String,
        germination_period: String,
        color: String,
    },
}

impl ProductRecord {
    /// Maps the parsed record onto the domain draft shape.
    pub fn into_draft(self) -> ProductDraft {
        let kind = match self.kind {
            None => ProductKind::Base,
            Some(KindRecord::Smartphone {
                performance,
                model,
                storage_gb,
                color,
            }) => ProductKind::Smartphone(SmartphoneSpec {
                performance,
                model,
                storage_gb,
                color,
            }),
            Some(KindRecord::LawnSeed {
                country,
                germination_period,
                color,
            }) => ProductKind::LawnSeed(LawnSeedSpec {
                country,
                germination_period,
                color,
            }),
        };
        ProductDraft {
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            kind,
        }
    }
}
