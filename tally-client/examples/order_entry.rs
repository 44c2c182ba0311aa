// tally-client/examples/order_entry.rs
// Drives one booking-order entry session against a running backend

use std::sync::Arc;
use std::time::Duration;

use tally_client::{
    ClientConfig, ContractProfile, DebouncedLookup, HttpClient, ItemField, OrderMeta,
    OrderSubmitter, SaveOutcome, Screen, StaticSession, UserInfo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    tally_client::logger::init_logger(config.log_level());

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <customer-name> [item-query]", args[0]);
        println!("  Server URL comes from TALLY_SERVER_URL (default http://localhost:5000)");
        return Ok(());
    }
    let customer = &args[1];
    let item_query = args.get(2).map(String::as_str).unwrap_or("wid");

    let http = HttpClient::new(&config);
    let profile = ContractProfile::for_screen(Screen::BookingOrder);
    let mut ledger = profile.new_ledger();

    // Search-as-you-type: feed the partial name, take the first suggestion
    let (lookup, mut updates) = DebouncedLookup::new(http.clone(), config.debounce());
    lookup.query(item_query);

    let update = tokio::time::timeout(Duration::from_secs(5), updates.recv())
        .await
        .map_err(|_| anyhow::anyhow!("lookup timed out"))?
        .ok_or_else(|| anyhow::anyhow!("lookup channel closed"))?;

    ledger.add_row();
    match update.result {
        Ok(candidates) if !candidates.is_empty() => {
            tracing::info!(count = candidates.len(), query = %update.query, "suggestions received");
            ledger.resolve_row(0, &candidates[0]);
        }
        Ok(_) => {
            tracing::info!(query = %update.query, "no suggestions, free-typing the row");
            ledger.update_row(0, ItemField::Name, item_query);
            ledger.update_row(0, ItemField::UnitPrice, "10");
        }
        Err(error) => {
            tracing::error!(%error, "lookup failed, free-typing the row");
            ledger.update_row(0, ItemField::Name, item_query);
            ledger.update_row(0, ItemField::UnitPrice, "10");
        }
    }

    ledger.update_row(0, ItemField::Quantity, "3");
    ledger.set_discount("5");
    ledger.set_tendered("50");

    let snapshot = ledger.snapshot();
    tracing::info!(
        subtotal = snapshot.subtotal,
        payable = snapshot.payable,
        change = snapshot.change,
        "totals computed"
    );

    let session = StaticSession::new(UserInfo {
        id: "demo".to_string(),
        username: "demo".to_string(),
        role: "cashier".to_string(),
    });
    let submitter = OrderSubmitter::new(http).with_session(Arc::new(session));

    let meta = OrderMeta::new().party(customer);
    match submitter.save(profile, &snapshot, &meta).await {
        Ok(SaveOutcome::Saved(saved)) => {
            tracing::info!(id = ?saved.id, "order saved");
        }
        Ok(SaveOutcome::InFlight) => {
            tracing::warn!("a save was already running, submit ignored");
        }
        Err(error) => {
            // Ledger state is untouched; a real screen would let the user retry
            tracing::error!(%error, "save failed");
            return Err(error.into());
        }
    }

    Ok(())
}
