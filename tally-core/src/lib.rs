//! Core types for the Tally order ledger
//!
//! The ledger engine shared by every order-entry screen: line items,
//! derived totals, and the per-screen backend contract codecs.

pub mod contract;
pub mod ledger;
pub mod money;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Ledger re-exports (for convenient access)
pub use ledger::{DiscountMode, ItemDraft, ItemField, Ledger, LineItem};
pub use ledger::{LedgerSnapshot, LineItemSnapshot};

// Contract re-exports (per-screen wire shapes)
pub use contract::{ContractProfile, LookupItem, OrderMeta, Screen};
