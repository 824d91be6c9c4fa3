//! Product entity, specialized kinds and the guarded price lifecycle.

use core::fmt;

use lavka_core::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// Discriminant of a [`ProductKind`], used for cheap same-kind checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    Base,
    Smartphone,
    LawnSeed,
}

impl KindTag {
    /// Stable label used in error messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Smartphone => "smartphone",
            Self::LawnSeed => "lawn_seed",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific attributes of a smartphone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartphoneSpec {
    /// Benchmark score, vendor units.
    pub performance: f64,
    pub model: String,
    pub storage_gb: u32,
    pub color: String,
}

/// Kind-specific attributes of lawn grass seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawnSeedSpec {
    pub country: String,
    /// Free-form germination period, e.g. "7 дней".
    pub germination_period: String,
    pub color: String,
}

/// Closed set of product kinds carried by every [`Product`].
///
/// Products of different kinds never merge and never price-pool; see
/// [`new_product`] and [`Product::combined_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    Base,
    Smartphone(SmartphoneSpec),
    LawnSeed(LawnSeedSpec),
}

impl ProductKind {
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Base => KindTag::Base,
            Self::Smartphone(_) => KindTag::Smartphone,
            Self::LawnSeed(_) => KindTag::LawnSeed,
        }
    }
}

impl Default for ProductKind {
    fn default() -> Self {
        Self::Base
    }
}

/// A sellable item: name, description, unit price in rubles and stock quantity.
///
/// The price field has no public setter. All changes go through
/// [`Product::request_price_change`], which enforces the lowering guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    description: String,
    price: f64,
    quantity: u32,
    #[serde(default)]
    kind: ProductKind,
}

impl Product {
    /// Creates a base-kind product. Values are stored as given.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self::with_kind(name, description, price, quantity, ProductKind::Base)
    }

    /// Creates a product of the given kind.
    pub fn with_kind(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: u32,
        kind: ProductKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            quantity,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current unit price in rubles.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units in stock.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn kind_tag(&self) -> KindTag {
        self.kind.tag()
    }

    /// Proposes a new unit price.
    ///
    /// - Non-positive (or non-finite) proposals are rejected and logged;
    ///   the stored price is untouched.
    /// - Proposals at or above the current price apply immediately.
    /// - A lowering proposal does not apply; it returns
    ///   [`PriceChange::AwaitingConfirmation`] with a [`PendingPrice`] ticket
    ///   to pass back through [`Product::confirm_price_change`].
    pub fn request_price_change(&mut self, proposed: f64) -> PriceChange {
        if !(proposed > 0.0) {
            tracing::warn!(
                product = %self.name,
                proposed,
                "price proposal rejected: price must be positive"
            );
            return PriceChange::Rejected { proposed };
        }
        if proposed >= self.price {
            let previous = self.price;
            self.price = proposed;
            return PriceChange::Applied {
                previous,
                current: self.price,
            };
        }
        PriceChange::AwaitingConfirmation(PendingPrice {
            current: self.price,
            proposed,
        })
    }

    /// Resolves a pending lowering with the caller's decision.
    ///
    /// Fails with [`CatalogError::Conflict`] when the price moved since the
    /// ticket was issued; the caller must re-request against the new price.
    pub fn confirm_price_change(
        &mut self,
        pending: PendingPrice,
        approved: bool,
    ) -> CatalogResult<PriceChange> {
        if pending.current != self.price {
            return Err(CatalogError::conflict(format!(
                "pending price change is stale: issued at {}, price is now {}",
                pending.current, self.price
            )));
        }
        if !approved {
            return Ok(PriceChange::Declined {
                retained: self.price,
            });
        }
        let previous = self.price;
        self.price = pending.proposed;
        Ok(PriceChange::Applied {
            previous,
            current: self.price,
        })
    }

    /// Total shelf value of two products of the same kind:
    /// `price * quantity + price * quantity`.
    ///
    /// Mixing kinds (base with specialized, or two different specializations)
    /// fails with [`CatalogError::KindMismatch`].
    pub fn combined_value(&self, other: &Product) -> CatalogResult<f64> {
        if self.kind_tag() != other.kind_tag() {
            return Err(CatalogError::kind_mismatch(
                self.kind_tag().as_str(),
                other.kind_tag().as_str(),
            ));
        }
        Ok(self.price * f64::from(self.quantity) + other.price * f64::from(other.quantity))
    }

    pub(crate) fn absorb(&mut self, draft: ProductDraft) {
        self.quantity = self.quantity.saturating_add(draft.quantity);
        self.price = self.price.max(draft.price);
    }
}

impl fmt::Display for Product {
    /// `<name>, <price> руб. Остаток: <quantity> шт.`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} руб. Остаток: {} шт.",
            self.name,
            format_price(self.price),
            self.quantity
        )
    }
}

/// Outcome of a price proposal or confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceChange {
    /// The proposal reached the price field.
    Applied { previous: f64, current: f64 },
    /// Non-positive proposal, dropped at the gate.
    Rejected { proposed: f64 },
    /// A lowering that needs an explicit approval to proceed.
    AwaitingConfirmation(PendingPrice),
    /// The caller declined a pending lowering.
    Declined { retained: f64 },
}

/// Ticket for a not-yet-approved price lowering.
///
/// Carries the price it was issued against so a confirmation arriving after
/// an intervening change is detected as stale.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrice {
    current: f64,
    proposed: f64,
}

impl PendingPrice {
    /// Price at the time the ticket was issued.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// The lowered price awaiting approval.
    pub fn proposed(&self) -> f64 {
        self.proposed
    }
}

/// Candidate data for [`new_product`], not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub kind: ProductKind,
}

impl ProductDraft {
    /// Base-kind draft.
    pub fn base(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            quantity,
            kind: ProductKind::Base,
        }
    }
}

impl From<ProductDraft> for Product {
    fn from(draft: ProductDraft) -> Self {
        Product::with_kind(
            draft.name,
            draft.description,
            draft.price,
            draft.quantity,
            draft.kind,
        )
    }
}

/// Deduplicating factory over an existing product list.
///
/// A draft whose name exactly matches an existing product (case-sensitive)
/// merges into it: quantities are summed, the higher of the two prices wins,
/// description stays as stored. Anything else is appended as a new product.
///
/// Zero-quantity and blank-name drafts fail validation. A name match across
/// different kinds is a validation failure too: the list stays untouched.
pub fn new_product<'a>(
    draft: ProductDraft,
    existing: &'a mut Vec<Product>,
) -> CatalogResult<&'a Product> {
    if draft.name.trim().is_empty() {
        return Err(CatalogError::validation("product name must not be blank"));
    }
    if draft.quantity == 0 {
        return Err(CatalogError::validation(
            "Товар с нулевым количеством не может быть добавлен",
        ));
    }
    if let Some(index) = existing.iter().position(|p| p.name == draft.name) {
        if existing[index].kind_tag() != draft.kind.tag() {
            return Err(CatalogError::validation(format!(
                "product '{}' already exists with kind {}, draft has kind {}",
                draft.name,
                existing[index].kind_tag(),
                draft.kind.tag()
            )));
        }
        existing[index].absorb(draft);
        return Ok(&existing[index]);
    }
    existing.push(Product::from(draft));
    Ok(&existing[existing.len() - 1])
}

/// Interprets one line of user input as a price-lowering decision.
///
/// Exactly `y`, ignoring surrounding whitespace and ASCII case, approves.
/// Every other answer declines.
pub fn parse_confirmation(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Renders a ruble amount the way listings expect: whole amounts keep one
/// decimal place (`50` -> `"50.0"`), fractional amounts print as-is.
pub(crate) fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.is_finite() {
        format!("{price:.1}")
    } else {
        price.to_string()
    }
}
