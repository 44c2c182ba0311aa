//! Ledger snapshot: the full order state as one pure read

use serde::{Deserialize, Serialize};

/// One row of a snapshot, amount included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemSnapshot {
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub amount: f64,
}

/// Point-in-time read of a ledger
///
/// Idempotent: two snapshots taken without an intervening mutation compare
/// equal. This is the shape handed to a contract profile for serialization;
/// `subtotal` stays internal and never appears in a backend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub items: Vec<LineItemSnapshot>,
    pub subtotal: f64,
    pub discount: f64,
    pub payable: f64,
    pub tendered: f64,
    pub change: f64,
}
