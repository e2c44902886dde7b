//! SQLite write-through for the order ledger.

use anyhow::{Error, Result};
use chrono::NaiveDateTime;
use tokio_rusqlite::{Connection, params};

use super::models::{ConfirmedOrder, OrderStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn async_db(db_path: &str) -> Result<Connection, Error> {
    Connection::open(db_path).await.map_err(anyhow::Error::from)
}

pub fn initialize_db(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS confirmed_order (
            id INTEGER PRIMARY KEY,
            conversation_id TEXT NOT NULL,
            customer_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            items_breakdown TEXT NOT NULL,
            confirmation_text TEXT NOT NULL,
            transcript TEXT NOT NULL,
            payment_method TEXT NOT NULL,
            delivery_type TEXT NOT NULL,
            delivery_address TEXT NOT NULL,
            status TEXT NOT NULL
        );
        "#,
    )
}

pub async fn insert_order(db: &Connection, order: &ConfirmedOrder) -> Result<(), Error> {
    let order = order.clone();
    let transcript = serde_json::to_string(&order.transcript)?;
    db.call(move |conn| {
        conn.execute(
            r#"
            INSERT INTO confirmed_order (
                id, conversation_id, customer_name, created_at,
                items_breakdown, confirmation_text, transcript,
                payment_method, delivery_type, delivery_address, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                order.id as i64,
                order.conversation_id,
                order.customer_name,
                order.created_at.format(TIMESTAMP_FORMAT).to_string(),
                order.items_breakdown,
                order.confirmation_text,
                transcript,
                order.payment_method.as_str(),
                order.delivery_type.as_str(),
                order.delivery_address,
                order.status.as_str(),
            ],
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

pub async fn update_order_status(
    db: &Connection,
    order_id: u64,
    status: OrderStatus,
) -> Result<(), Error> {
    db.call(move |conn| {
        conn.execute(
            "UPDATE confirmed_order SET status = ?1 WHERE id = ?2",
            params![status.as_str(), order_id as i64],
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

struct OrderRow {
    id: i64,
    conversation_id: String,
    customer_name: String,
    created_at: String,
    items_breakdown: String,
    confirmation_text: String,
    transcript: String,
    payment_method: String,
    delivery_type: String,
    delivery_address: String,
    status: String,
}

impl TryFrom<OrderRow> for ConfirmedOrder {
    type Error = anyhow::Error;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(ConfirmedOrder {
            id: u64::try_from(row.id)?,
            conversation_id: row.conversation_id,
            customer_name: row.customer_name,
            created_at: NaiveDateTime::parse_from_str(&row.created_at, TIMESTAMP_FORMAT)?,
            items_breakdown: row.items_breakdown,
            confirmation_text: row.confirmation_text,
            transcript: serde_json::from_str(&row.transcript)?,
            payment_method: row.payment_method.parse()?,
            delivery_type: row.delivery_type.parse()?,
            delivery_address: row.delivery_address,
            status: row.status.parse()?,
        })
    }
}

/// All stored orders in id order.
pub async fn load_orders(db: &Connection) -> Result<Vec<ConfirmedOrder>, Error> {
    let rows = db
        .call(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, conversation_id, customer_name, created_at,
                       items_breakdown, confirmation_text, transcript,
                       payment_method, delivery_type, delivery_address, status
                FROM confirmed_order
                ORDER BY id ASC
                "#,
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(OrderRow {
                        id: row.get(0)?,
                        conversation_id: row.get(1)?,
                        customer_name: row.get(2)?,
                        created_at: row.get(3)?,
                        items_breakdown: row.get(4)?,
                        confirmation_text: row.get(5)?,
                        transcript: row.get(6)?,
                        payment_method: row.get(7)?,
                        delivery_type: row.get(8)?,
                        delivery_address: row.get(9)?,
                        status: row.get(10)?,
                    })
                })?
                .collect::<Result<Vec<OrderRow>, rusqlite::Error>>()?;
            Ok(rows)
        })
        .await?;

    rows.into_iter().map(ConfirmedOrder::try_from).collect()
}
