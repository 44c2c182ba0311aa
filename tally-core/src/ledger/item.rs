//! Line item: one row of an order
//!
//! Rows are mutated in place on every keystroke; the amount is always
//! derived from unit price and quantity, never stored independently.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::contract::LookupItem;
use crate::money::{parse_or_zero, round_money, to_decimal, to_f64};

/// A single product row: name, unit price, quantity
///
/// Duplicate names within one ledger are legal. The derived amount is
/// exposed through [`LineItem::amount`] and recomputed on every read, so it
/// can never go stale relative to its factors.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Product display name, stored verbatim as typed
    pub name: String,
    /// Price per unit; authoritative when resolved from a lookup suggestion
    pub unit_price: f64,
    /// Unit count; fractional quantities are allowed
    pub quantity: f64,
}

impl LineItem {
    /// New default row: empty name, zero price, quantity one
    pub fn new() -> Self {
        Self {
            name: String::new(),
            unit_price: 0.0,
            quantity: 1.0,
        }
    }

    /// Build a row from a partial draft, defaults filling the gaps
    pub fn create(draft: ItemDraft) -> Self {
        Self {
            name: draft.name.unwrap_or_default(),
            unit_price: draft.unit_price.unwrap_or(0.0),
            quantity: draft.quantity.unwrap_or(1.0),
        }
    }

    /// Derived amount: `unit_price * quantity`, rounded to cents
    pub fn amount(&self) -> f64 {
        to_f64(self.amount_decimal())
    }

    /// Amount for totals accumulation, rounded to cents per row
    ///
    /// The subtotal sums these rounded per-row amounts, so it always equals
    /// the sum of the amounts the rows themselves report. Rounding once at
    /// the end instead would let sub-cent products drift the subtotal away
    /// from the visible row amounts.
    pub(crate) fn amount_decimal(&self) -> Decimal {
        round_money(to_decimal(self.unit_price) * to_decimal(self.quantity))
    }

    /// Write one field from free-typed input
    ///
    /// `Name` stores the raw text verbatim; `UnitPrice` and `Quantity` go
    /// through the numeric-or-zero parse. Never fails.
    pub fn set_field(&mut self, field: ItemField, raw: &str) {
        match field {
            ItemField::Name => self.name = raw.to_string(),
            ItemField::UnitPrice => self.unit_price = parse_or_zero(raw),
            ItemField::Quantity => self.quantity = parse_or_zero(raw),
        }
    }

    /// Accept a lookup suggestion
    ///
    /// Takes the candidate's name and authoritative price; quantity is left
    /// as the user set it.
    pub fn resolve_from_lookup(&mut self, candidate: &LookupItem) {
        self.name = candidate.item_name.clone();
        self.unit_price = candidate.price;
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial line-item input for row creation
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity: Option<f64>,
}

impl ItemDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// Editable line-item fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    UnitPrice,
    Quantity,
}

/// Unrecognized field selector
#[derive(Debug, thiserror::Error)]
#[error("unknown line item field: {0}")]
pub struct UnknownField(String);

impl FromStr for ItemField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "unitPrice" => Ok(Self::UnitPrice),
            "quantity" => Ok(Self::Quantity),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
