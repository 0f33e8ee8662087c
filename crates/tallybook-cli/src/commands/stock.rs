use anyhow::{Result, bail};
use clap::Subcommand;
use tallybook::{StockMovement, StockMovementType, stock};

use crate::state::AppState;

use super::format;

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Movement history, newest first
    List {
        /// Filter by product name or notes
        #[arg(long)]
        search: Option<String>,
    },
    /// Record a movement and adjust the product's on-hand quantity
    Record {
        product_id: String,
        /// "in" or "out"
        #[arg(long)]
        direction: String,
        #[arg(long)]
        quantity: i64,
        /// Movement date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

pub async fn run(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::List { search } => {
            let filtered: Vec<&StockMovement> = stock::history_newest_first(&state.stock)
                .into_iter()
                .filter(|m| {
                    search.as_deref().is_none_or(|term| {
                        let term = term.to_lowercase();
                        m.product_name.to_lowercase().contains(&term)
                            || m.notes.to_lowercase().contains(&term)
                    })
                })
                .collect();
            format::print_movements(&filtered);
            Ok(())
        }
        Action::Record {
            product_id,
            direction,
            quantity,
            date,
            notes,
        } => {
            let Some(movement_type) = StockMovementType::parse(&direction) else {
                bail!("unknown direction {direction:?} (use \"in\" or \"out\")");
            };

            stock::record_movement(
                &mut state.products,
                &mut state.stock,
                &product_id,
                movement_type,
                quantity,
                date.unwrap_or_else(super::today),
                notes,
            )?;

            if let Some(product) = state.products.iter().find(|p| p.id == product_id) {
                println!(
                    "Recorded stock {movement_type} of {quantity} × {} ({} on hand)",
                    product.name, product.quantity
                );
            }
            state.save_stock_and_products().await
        }
    }
}
