//! Tally Client - order entry against the backend REST API
//!
//! Everything an order-entry screen needs around a [`tally_core::Ledger`]:
//! debounced item lookup with explicit cancellation of superseded requests,
//! a double-submit-guarded save flow, and an injected session accessor.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod lookup;
pub mod session;
pub mod submit;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use lookup::{DebouncedLookup, LookupBackend, LookupUpdate};
pub use session::{SessionProvider, StaticSession, UserInfo};
pub use submit::{OrderSubmitter, SaveOutcome, SavedOrder};

// Re-export core types for convenience
pub use tally_core::contract::{ContractProfile, LookupItem, OrderMeta, Screen};
pub use tally_core::ledger::{ItemField, Ledger, LedgerSnapshot};
