use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::Assistant;
use crate::core::AppConfig;
use crate::orders::OrderLedger;

/// Chat with the assistant from a terminal. Confirmed orders are
/// printed as soon as they are recorded.
pub async fn run(conversation_id: &str, name: &str) -> Result<()> {
    super::init_tracing(&format!("{}=warn", env!("CARGO_CRATE_NAME")));

    let config = AppConfig::default();
    let ledger = match &config.db_path {
        Some(path) => OrderLedger::open(path).await?,
        None => OrderLedger::in_memory(),
    };
    let assistant = Assistant::from_config(&config, Arc::new(ledger));
    let mut last_seen = assistant
        .list_confirmed_orders()
        .last()
        .map(|o| o.id)
        .unwrap_or(0);

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                let reply = assistant
                    .handle_inbound_message(conversation_id, line, conversation_id, name)
                    .await;
                println!("{}\n", reply);

                for order in assistant.list_new_orders_since(last_seen) {
                    println!(
                        "🆕 Pedido #{} de {} ({}, {})\n{}\n",
                        order.id,
                        order.customer_name,
                        order.delivery_type.label(),
                        order.payment_method.label(),
                        order.items_breakdown
                    );
                    last_seen = order.id;
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
