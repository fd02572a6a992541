//! Asset desk: the collaborator behind the orders and portfolio routes.
//!
//! DESIGN
//! ======
//! `AssetDesk` is the seam the assets handlers talk to. `PaperDesk` is the
//! in-process implementation: it records orders per account and derives
//! positions by netting those orders per symbol. It never prices, matches,
//! or fills anything.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::now_ms;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeskError {
    #[error("no open position in {0}")]
    NoOpenPosition(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    fn signed(self, quantity: u64) -> i128 {
        match self {
            Self::Buy => i128::from(quantity),
            Self::Sell => -i128::from(quantity),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        })
    }
}

/// Validated order-initiation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Upper-cased.
    pub symbol: String,
    pub side: Side,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub account_id: Uuid,
    pub symbol: String,
    pub side: Side,
    pub quantity: u64,
    pub created_at: i64,
}

/// Net exposure in one symbol. Negative quantity is a short position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: i128,
    pub opened_at: i64,
}

#[async_trait::async_trait]
pub trait AssetDesk: Send + Sync {
    /// Record a new order for `account_id`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse an order with a [`DeskError`].
    async fn record_order(&self, account_id: Uuid, request: OrderRequest) -> Result<Order, DeskError>;

    /// Orders for `account_id`, oldest first.
    async fn orders(&self, account_id: Uuid) -> Vec<Order>;

    /// Open positions for `account_id`, sorted by symbol.
    async fn portfolio(&self, account_id: Uuid) -> Vec<Position>;

    /// Flatten the position in `symbol` by recording an offsetting order.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::NoOpenPosition`] when the account is flat in `symbol`.
    async fn close_position(&self, account_id: Uuid, symbol: &str) -> Result<Order, DeskError>;
}

#[derive(Clone, Default)]
pub struct PaperDesk {
    ledgers: Arc<RwLock<HashMap<Uuid, Vec<Order>>>>,
}

impl PaperDesk {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Net the orders per symbol. `opened_at` is the first order after the
/// symbol was last flat.
fn net_positions(orders: &[Order]) -> Vec<Position> {
    let mut book: BTreeMap<&str, (i128, i64)> = BTreeMap::new();
    for order in orders {
        let entry = book.entry(order.symbol.as_str()).or_insert((0, order.created_at));
        if entry.0 == 0 {
            entry.1 = order.created_at;
        }
        entry.0 += order.side.signed(order.quantity);
    }

    book.into_iter()
        .filter(|(_, (quantity, _))| *quantity != 0)
        .map(|(symbol, (quantity, opened_at))| Position { symbol: symbol.to_owned(), quantity, opened_at })
        .collect()
}

fn new_order(account_id: Uuid, symbol: String, side: Side, quantity: u64) -> Order {
    Order { id: Uuid::new_v4(), account_id, symbol, side, quantity, created_at: now_ms() }
}

#[async_trait::async_trait]
impl AssetDesk for PaperDesk {
    async fn record_order(&self, account_id: Uuid, request: OrderRequest) -> Result<Order, DeskError> {
        let order = new_order(account_id, request.symbol, request.side, request.quantity);
        self.ledgers.write().await.entry(account_id).or_default().push(order.clone());

        tracing::info!(
            %account_id,
            symbol = %order.symbol,
            side = %order.side,
            quantity = order.quantity,
            "order recorded"
        );
        Ok(order)
    }

    async fn orders(&self, account_id: Uuid) -> Vec<Order> {
        self.ledgers.read().await.get(&account_id).cloned().unwrap_or_default()
    }

    async fn portfolio(&self, account_id: Uuid) -> Vec<Position> {
        let ledgers = self.ledgers.read().await;
        ledgers.get(&account_id).map(|orders| net_positions(orders)).unwrap_or_default()
    }

    async fn close_position(&self, account_id: Uuid, symbol: &str) -> Result<Order, DeskError> {
        // Hold the write lock across netting and recording so two closes
        // cannot both offset the same exposure.
        let mut ledgers = self.ledgers.write().await;
        let ledger = ledgers.entry(account_id).or_default();

        let net = net_positions(ledger)
            .into_iter()
            .find(|p| p.symbol == symbol)
            .map_or(0, |p| p.quantity);
        if net == 0 {
            return Err(DeskError::NoOpenPosition(symbol.to_owned()));
        }

        let side = if net > 0 { Side::Sell } else { Side::Buy };
        let quantity = u64::try_from(net.unsigned_abs()).unwrap_or(u64::MAX);
        let order = new_order(account_id, symbol.to_owned(), side, quantity);
        ledger.push(order.clone());

        tracing::info!(%account_id, %symbol, side = %order.side, quantity, "position closed");
        Ok(order)
    }
}

#[cfg(test)]
#[path = "desk_test.rs"]
mod tests;
