//! Creation hooks: observers notified after catalog state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEventKind {
    CategoryCreated {
        category: String,
        initial_products: usize,
    },
    ProductAdded {
        category: String,
        product: String,
        quantity: u32,
    },
}

impl CatalogEventKind {
    /// Stable event name/type identifier (e.g. "catalog.category.created").
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CategoryCreated { .. } => "catalog.category.created",
            Self::ProductAdded { .. } => "catalog.product.added",
        }
    }
}

/// A recorded catalog fact with identity and business time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEvent {
    event_id: Uuid,
    occurred_at: DateTime<Utc>,
    payload: CatalogEventKind,
}

impl CatalogEvent {
    /// Stamps a payload with a time-ordered id and the current time.
    pub(crate) fn record(payload: CatalogEventKind) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// When the change occurred (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &CatalogEventKind {
        &self.payload
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}

/// Observer attached to a [`CatalogRegistry`](crate::registry::CatalogRegistry).
///
/// Hooks run after the state change has succeeded, are infallible, and must
/// not mutate the catalog.
pub trait CatalogHook {
    fn on_event(&self, event: &CatalogEvent);
}

/// Hook that logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl CatalogHook for TracingHook {
    fn on_event(&self, event: &CatalogEvent) {
        match event.payload() {
            CatalogEventKind::CategoryCreated {
                category,
                initial_products,
            } => {
                tracing::info!(
                    event = event.event_type(),
                    category = %category,
                    initial_products,
                    "category created"
                );
            }
            CatalogEventKind::ProductAdded {
                category,
                product,
                quantity,
            } => {
                tracing::info!(
                    event = event.event_type(),
                    category = %category,
                    product = %product,
                    quantity,
                    "product added"
                );
            }
        }
    }
}
