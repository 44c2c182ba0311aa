//! Payload encoding and decoding over a contract's field table

use serde_json::{Map, Value};

use super::{ContractProfile, OrderMeta};
use crate::ledger::{ItemDraft, Ledger, LedgerSnapshot, LineItem};
use crate::money::number_or_zero;

impl ContractProfile {
    /// Serialize a snapshot into this contract's save shape
    ///
    /// Emits the `items` array plus discount, payable, tendered, and change
    /// under the contract's spellings. The subtotal is not serialized.
    pub fn encode(&self, snapshot: &LedgerSnapshot) -> Value {
        let fields = &self.fields;

        let items: Vec<Value> = snapshot
            .items
            .iter()
            .map(|row| {
                let mut item = Map::new();
                item.insert(fields.item_name.to_string(), Value::from(row.name.clone()));
                item.insert(fields.unit_price.to_string(), Value::from(row.unit_price));
                item.insert(fields.quantity.to_string(), Value::from(row.quantity));
                item.insert(fields.amount.to_string(), Value::from(row.amount));
                Value::Object(item)
            })
            .collect();

        let mut body = Map::new();
        body.insert("items".to_string(), Value::from(items));
        body.insert(fields.discount.to_string(), Value::from(snapshot.discount));
        body.insert(fields.payable.to_string(), Value::from(snapshot.payable));
        body.insert(fields.tendered.to_string(), Value::from(snapshot.tendered));
        body.insert(fields.change.to_string(), Value::from(snapshot.change));
        Value::Object(body)
    }

    /// Serialize a snapshot plus the order header fields
    pub fn encode_with_meta(&self, snapshot: &LedgerSnapshot, meta: &OrderMeta) -> Value {
        let mut payload = self.encode(snapshot);
        if let Value::Object(body) = &mut payload {
            let fields = &self.fields;
            if let Some(party) = &meta.party {
                body.insert(fields.party.to_string(), Value::from(party.clone()));
            }
            if let Some(date) = &meta.date {
                body.insert(fields.date.to_string(), Value::from(date.clone()));
            }
            if let Some(user) = &meta.user {
                body.insert(fields.user.to_string(), Value::from(user.clone()));
            }
        }
        payload
    }

    /// Rebuild a ledger from a persisted payload (edit mode)
    ///
    /// Tolerant by design, matching how the screens read stored documents:
    /// numeric fields go through the numeric-or-zero policy, missing
    /// sections fall back to defaults, and stored amounts/payable/change
    /// are ignored because they are always derived from current state.
    pub fn decode(&self, payload: &Value) -> Ledger {
        let fields = &self.fields;
        let mut ledger = Ledger::new(self.discount_mode);

        if !payload.is_object() {
            tracing::debug!(screen = ?self.screen, "non-object order payload, starting empty");
            return ledger;
        }

        if let Some(rows) = payload.get("items").and_then(Value::as_array) {
            for row in rows {
                let name = row
                    .get(fields.item_name)
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                ledger.push_row(LineItem::create(
                    ItemDraft::new()
                        .name(name)
                        .unit_price(number_or_zero(row.get(fields.unit_price)))
                        .quantity(number_or_zero(row.get(fields.quantity))),
                ));
            }
        }

        ledger.set_discount_value(number_or_zero(payload.get(fields.discount)));
        ledger.set_tendered_value(number_or_zero(payload.get(fields.tendered)));
        ledger
    }
}
