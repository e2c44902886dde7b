use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use super::db;
use super::models::{ConfirmedOrder, NewOrder, OrderStatus};

struct LedgerInner {
    last_id: u64,
    orders: Vec<ConfirmedOrder>,
}

/// Append-only record of confirmed orders. Ids are assigned and the
/// order appended under the same lock so ids always increase in ledger
/// order. Only `status` changes after an order is recorded.
///
/// Every change holds `writes` until its database write finishes so the
/// stored rows are updated in the same order as the in-memory ones.
pub struct OrderLedger {
    inner: Mutex<LedgerInner>,
    writes: tokio::sync::Mutex<()>,
    db: Option<Connection>,
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl OrderLedger {
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(LedgerInner {
                last_id: 0,
                orders: Vec::new(),
            }),
            writes: tokio::sync::Mutex::new(()),
            db: None,
        }
    }

    /// Opens the SQLite database at `db_path`, creating the table if
    /// needed, and resumes numbering after the highest stored id.
    pub async fn open(db_path: &str) -> Result<Self, Error> {
        let conn = db::async_db(db_path).await?;
        conn.call(|conn| {
            db::initialize_db(conn)?;
            Ok(())
        })
        .await?;
        let orders = db::load_orders(&conn).await?;
        let last_id = orders.iter().map(|o| o.id).max().unwrap_or(0);
        tracing::info!(
            "Loaded {} confirmed orders from {}, next id is {}",
            orders.len(),
            db_path,
            last_id + 1
        );
        Ok(Self {
            inner: Mutex::new(LedgerInner { last_id, orders }),
            writes: tokio::sync::Mutex::new(()),
            db: Some(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LedgerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assigns the next id and appends. Storage failures are logged
    /// and never lose the in-memory record.
    pub async fn record(&self, order: NewOrder) -> ConfirmedOrder {
        let _writing = self.writes.lock().await;
        let confirmed = {
            let mut inner = self.lock();
            inner.last_id += 1;
            let confirmed = ConfirmedOrder::from_new(inner.last_id, order);
            inner.orders.push(confirmed.clone());
            confirmed
        };

        tracing::info!(
            "Order #{} confirmed for {} ({})",
            confirmed.id,
            confirmed.customer_name,
            confirmed.conversation_id
        );

        if let Some(conn) = &self.db {
            if let Err(e) = db::insert_order(conn, &confirmed).await {
                tracing::error!("Failed to store order #{}: {}", confirmed.id, e);
            }
        }

        confirmed
    }

    pub fn list_all(&self) -> Vec<ConfirmedOrder> {
        self.lock().orders.clone()
    }

    /// Orders with an id greater than `since`, oldest first.
    pub fn list_since(&self, since: u64) -> Vec<ConfirmedOrder> {
        self.lock()
            .orders
            .iter()
            .filter(|o| o.id > since)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<ConfirmedOrder> {
        self.lock().orders.iter().find(|o| o.id == id).cloned()
    }

    /// Returns `false` when there is no order with that id.
    pub async fn update_status(&self, id: u64, status: OrderStatus) -> bool {
        let _writing = self.writes.lock().await;
        let found = {
            let mut inner = self.lock();
            match inner.orders.iter_mut().find(|o| o.id == id) {
                Some(order) => {
                    order.status = status;
                    true
                }
                None => false,
            }
        };
        if !found {
            return false;
        }

        tracing::info!("Order #{} is now {}", id, status);
        if let Some(conn) = &self.db {
            if let Err(e) = db::update_order_status(conn, id, status).await {
                tracing::error!("Failed to store status of order #{}: {}", id, e);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
