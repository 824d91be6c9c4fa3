//! `lavka-catalog` — products, categories and the catalog registry.
//!
//! The domain model behind a small retail catalog:
//! - [`Product`] with a guarded price lifecycle ([`Product::request_price_change`]).
//! - [`Category`] owning its products and the dedup factory [`new_product`].
//! - [`CatalogRegistry`] keeping process-wide totals and fanning out
//!   [`CatalogEvent`]s to attached [`CatalogHook`]s.

pub mod category;
pub mod events;
pub mod product;
pub mod registry;

pub use category::Category;
pub use events::{CatalogEvent, CatalogEventKind, CatalogHook, TracingHook};
pub use product::{
    KindTag, LawnSeedSpec, PendingPrice, PriceChange, Product, ProductDraft, ProductKind,
    SmartphoneSpec, new_product, parse_confirmation,
};
pub use registry::CatalogRegistry;
