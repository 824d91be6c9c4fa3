//! Process-wide catalog totals and hook fan-out.

use core::fmt;

use crate::events::{CatalogEvent, CatalogEventKind, CatalogHook};

/// Lifetime totals for one catalog run, plus the attached hooks.
///
/// The counters are monotonic: they record how many categories were ever
/// created and how many products ever entered the catalog, not current stock.
/// A registry is created by the embedding and passed explicitly into the
/// [`Category`](crate::category::Category) constructors.
#[derive(Default)]
pub struct CatalogRegistry {
    category_count: u64,
    unique_products: u64,
    hooks: Vec<Box<dyn CatalogHook>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Categories ever created against this registry.
    pub fn category_count(&self) -> u64 {
        self.category_count
    }

    /// Products ever admitted, across all categories. A running total, not a
    /// distinct-name count.
    pub fn unique_products(&self) -> u64 {
        self.unique_products
    }

    /// Attaches a hook; it receives every event recorded from now on, in
    /// attachment order.
    pub fn attach_hook(&mut self, hook: Box<dyn CatalogHook>) {
        self.hooks.push(hook);
    }

    pub(crate) fn record_category(&mut self, category: &str, initial_products: usize) {
        self.category_count += 1;
        self.unique_products += initial_products as u64;
        self.notify(CatalogEventKind::CategoryCreated {
            category: category.to_string(),
            initial_products,
        });
    }

    pub(crate) fn record_product_added(&mut self, category: &str, product: &str, quantity: u32) {
        self.unique_products += 1;
        self.notify(CatalogEventKind::ProductAdded {
            category: category.to_string(),
            product: product.to_string(),
            quantity,
        });
    }

    fn notify(&self, payload: CatalogEventKind) {
        if self.hooks.is_empty() {
            return;
        }
        let event = CatalogEvent::record(payload);
        for hook in &self.hooks {
            hook.on_event(&event);
        }
    }
}

impl fmt::Debug for CatalogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogRegistry")
            .field("category_count", &self.category_count)
            .field("unique_products", &self.unique_products)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
