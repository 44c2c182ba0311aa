//! Per-screen backend contracts
//!
//! Four order-entry screens persist the same ledger shape under slightly
//! different field spellings (`rate` vs `price`, `paid` vs `givenAmount`).
//! Those spellings are backend quirks preserved verbatim per endpoint; one
//! codec parameterized by a field-name table serves all of them.

mod codec;

use serde::{Deserialize, Serialize};

use crate::ledger::{DiscountMode, Ledger};

/// Order-entry screens backed by this ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    BookingOrder,
    SalesInvoice,
    ItemPurchase,
    ExpiryTags,
}

/// JSON field spellings for one backend contract
#[derive(Debug, Clone, Copy)]
pub struct FieldNames {
    pub item_name: &'static str,
    pub unit_price: &'static str,
    pub quantity: &'static str,
    pub amount: &'static str,
    pub discount: &'static str,
    pub payable: &'static str,
    pub tendered: &'static str,
    pub change: &'static str,
    pub party: &'static str,
    pub date: &'static str,
    pub user: &'static str,
}

/// One screen's backend contract
#[derive(Debug, Clone, Copy)]
pub struct ContractProfile {
    pub screen: Screen,
    /// REST resource path, relative to the server base URL
    pub endpoint: &'static str,
    pub fields: FieldNames,
    pub discount_mode: DiscountMode,
}

pub static BOOKING_ORDER: ContractProfile = ContractProfile {
    screen: Screen::BookingOrder,
    endpoint: "booking-order",
    fields: FieldNames {
        item_name: "itemName",
        unit_price: "rate",
        quantity: "qty",
        amount: "amount",
        discount: "discount",
        payable: "payable",
        tendered: "paid",
        change: "balance",
        party: "customerName",
        date: "date",
        user: "user",
    },
    discount_mode: DiscountMode::Flat,
};

pub static SALES_INVOICE: ContractProfile = ContractProfile {
    screen: Screen::SalesInvoice,
    endpoint: "sale-invoice",
    fields: FieldNames {
        item_name: "itemName",
        unit_price: "rate",
        quantity: "qty",
        amount: "amount",
        discount: "discount",
        payable: "payable",
        tendered: "paid",
        change: "balance",
        party: "customerName",
        date: "date",
        user: "user",
    },
    discount_mode: DiscountMode::Flat,
};

// Purchase entry is the percentage-discount variant
pub static ITEM_PURCHASE: ContractProfile = ContractProfile {
    screen: Screen::ItemPurchase,
    endpoint: "item-purchase",
    fields: FieldNames {
        item_name: "itemName",
        unit_price: "price",
        quantity: "qty",
        amount: "total",
        discount: "discount",
        payable: "payable",
        tendered: "givenAmount",
        change: "returnAmount",
        party: "supplierName",
        date: "date",
        user: "user",
    },
    discount_mode: DiscountMode::Percent,
};

pub static EXPIRY_TAGS: ContractProfile = ContractProfile {
    screen: Screen::ExpiryTags,
    endpoint: "expiry-tags",
    fields: FieldNames {
        item_name: "itemName",
        unit_price: "price",
        quantity: "qty",
        amount: "total",
        discount: "discount",
        payable: "payable",
        tendered: "paid",
        change: "balance",
        party: "customerName",
        date: "date",
        user: "user",
    },
    discount_mode: DiscountMode::Flat,
};

impl ContractProfile {
    /// The profile for a given screen
    pub fn for_screen(screen: Screen) -> &'static ContractProfile {
        match screen {
            Screen::BookingOrder => &BOOKING_ORDER,
            Screen::SalesInvoice => &SALES_INVOICE,
            Screen::ItemPurchase => &ITEM_PURCHASE,
            Screen::ExpiryTags => &EXPIRY_TAGS,
        }
    }

    /// Empty ledger in this contract's discount mode
    pub fn new_ledger(&self) -> Ledger {
        Ledger::new(self.discount_mode)
    }
}

/// Order header fields accompanying a save
///
/// All optional; unset fields are omitted from the payload. `user` is
/// filled from the injected session when the caller leaves it unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderMeta {
    /// Customer or supplier name, depending on the screen
    pub party: Option<String>,
    /// Document date, passed through as the screen provides it
    pub date: Option<String>,
    /// Submitting user
    pub user: Option<String>,
}

impl OrderMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// One item-search suggestion from `GET /item-details/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(default)]
    pub price: f64,
}
