//! Order ledger
//!
//! An ordered list of line items plus the order-level discount and tendered
//! amount. Every mutation completes synchronously; the derived subtotal,
//! payable, and change are computed from current state on read, so no
//! caller can observe a stale total paired with fresh items.
//!
//! One ledger is exclusively owned by one order-entry session. It is a
//! plain value: no locks, no interior mutability, no I/O.

pub mod item;
pub mod snapshot;

// Re-exports
pub use item::{ItemDraft, ItemField, LineItem, UnknownField};
pub use snapshot::{LedgerSnapshot, LineItemSnapshot};

use rust_decimal::Decimal;

use crate::contract::LookupItem;
use crate::money::{parse_or_zero, to_decimal, to_f64};

/// How the order-level discount applies to the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscountMode {
    /// Flat currency amount subtracted from the subtotal
    #[default]
    Flat,
    /// Percentage of the subtotal (purchase-entry screens)
    Percent,
}

/// The order being edited
///
/// Derived values:
/// - `subtotal = Σ item.amount`
/// - `payable = subtotal - discount` (flat) or
///   `subtotal * (1 - discount/100)` (percent)
/// - `change = tendered - payable`
///
/// Payable and change are reported as-is, including negative values when
/// the discount exceeds the subtotal or the customer underpays. Nothing is
/// clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    items: Vec<LineItem>,
    discount: f64,
    tendered: f64,
    mode: DiscountMode,
}

impl Ledger {
    /// Empty ledger with the given discount mode
    pub fn new(mode: DiscountMode) -> Self {
        Self {
            items: Vec::new(),
            discount: 0.0,
            tendered: 0.0,
            mode,
        }
    }

    /// Empty ledger with a flat currency discount
    pub fn flat() -> Self {
        Self::new(DiscountMode::Flat)
    }

    /// Empty ledger with a percentage discount
    pub fn percent() -> Self {
        Self::new(DiscountMode::Percent)
    }

    // ========== Accessors ==========

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn row(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn tendered(&self) -> f64 {
        self.tendered
    }

    pub fn mode(&self) -> DiscountMode {
        self.mode
    }

    // ========== Mutations ==========

    /// Append a new default row (empty name, zero price, quantity one)
    ///
    /// The new row contributes zero, so totals are unchanged.
    pub fn add_row(&mut self) {
        self.items.push(LineItem::new());
    }

    /// Append a prebuilt row
    pub fn push_row(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Delete the row at `index`; out of bounds is a silent no-op
    ///
    /// Remaining rows keep their relative order.
    pub fn remove_row(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        } else {
            tracing::debug!(index, len = self.items.len(), "remove_row index out of bounds, ignoring");
        }
    }

    /// Write one field of the row at `index`; out of bounds is a silent no-op
    pub fn update_row(&mut self, index: usize, field: ItemField, raw: &str) {
        if let Some(item) = self.items.get_mut(index) {
            item.set_field(field, raw);
        } else {
            tracing::debug!(index, len = self.items.len(), "update_row index out of bounds, ignoring");
        }
    }

    /// Apply a lookup suggestion to the row at `index`; out of bounds is a
    /// silent no-op
    pub fn resolve_row(&mut self, index: usize, candidate: &LookupItem) {
        if let Some(item) = self.items.get_mut(index) {
            item.resolve_from_lookup(candidate);
        } else {
            tracing::debug!(index, len = self.items.len(), "resolve_row index out of bounds, ignoring");
        }
    }

    /// Set the order-level discount from free-typed input (numeric-or-zero)
    pub fn set_discount(&mut self, raw: &str) {
        self.discount = parse_or_zero(raw);
    }

    /// Set the tendered amount from free-typed input (numeric-or-zero)
    pub fn set_tendered(&mut self, raw: &str) {
        self.tendered = parse_or_zero(raw);
    }

    /// Set the discount from an already-numeric value
    pub fn set_discount_value(&mut self, value: f64) {
        self.discount = value;
    }

    /// Set the tendered amount from an already-numeric value
    pub fn set_tendered_value(&mut self, value: f64) {
        self.tendered = value;
    }

    /// Back to an empty ledger, discount mode kept
    ///
    /// The owning screen discards ledger state after a successful save or a
    /// cancel.
    pub fn reset(&mut self) {
        self.items.clear();
        self.discount = 0.0;
        self.tendered = 0.0;
    }

    // ========== Derived values ==========

    pub fn subtotal(&self) -> f64 {
        to_f64(self.subtotal_decimal())
    }

    pub fn payable(&self) -> f64 {
        to_f64(self.payable_decimal())
    }

    pub fn change(&self) -> f64 {
        to_f64(self.change_decimal())
    }

    fn subtotal_decimal(&self) -> Decimal {
        self.items.iter().map(LineItem::amount_decimal).sum()
    }

    fn payable_decimal(&self) -> Decimal {
        let subtotal = self.subtotal_decimal();
        match self.mode {
            DiscountMode::Flat => subtotal - to_decimal(self.discount),
            DiscountMode::Percent => {
                subtotal - subtotal * to_decimal(self.discount) / Decimal::ONE_HUNDRED
            }
        }
    }

    fn change_decimal(&self) -> Decimal {
        to_decimal(self.tendered) - self.payable_decimal()
    }

    /// Pure read of the full state
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            items: self
                .items
                .iter()
                .map(|item| LineItemSnapshot {
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    amount: item.amount(),
                })
                .collect(),
            subtotal: self.subtotal(),
            discount: self.discount,
            payable: self.payable(),
            tendered: self.tendered,
            change: self.change(),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::flat()
    }
}
