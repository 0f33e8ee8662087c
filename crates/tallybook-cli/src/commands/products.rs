use anyhow::{Result, bail};
use clap::Subcommand;
use tallybook::Product;

use crate::state::AppState;

use super::format;

#[derive(Debug, Subcommand)]
pub enum Action {
    /// List the catalog
    List {
        /// Filter by name or specification
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        specification: String,
        /// Opening quantity on hand
        #[arg(long, default_value_t = 0)]
        quantity: i64,
        #[arg(long)]
        unit_price: f64,
    },
    /// Edit a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specification: Option<String>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        unit_price: Option<f64>,
    },
    /// Delete a product
    Remove { id: String },
}

pub async fn run(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::List { search } => {
            let filtered: Vec<&Product> = state
                .products
                .iter()
                .filter(|p| search.as_deref().is_none_or(|term| p.matches(term)))
                .collect();
            format::print_products(&filtered, state.settings.low_stock_threshold);
            Ok(())
        }
        Action::Add {
            name,
            specification,
            quantity,
            unit_price,
        } => {
            let product = Product::new(name, specification, quantity, unit_price);
            println!("Added {} ({})", product.name, product.id);
            state.products.push(product);
            state.save_products().await
        }
        Action::Update {
            id,
            name,
            specification,
            quantity,
            unit_price,
        } => {
            let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
                bail!("product not found: {id}");
            };
            if let Some(name) = name {
                product.name = name;
            }
            if let Some(specification) = specification {
                product.specification = specification;
            }
            if let Some(quantity) = quantity {
                product.quantity = quantity;
            }
            if let Some(unit_price) = unit_price {
                product.unit_price = unit_price;
            }
            println!("Updated {}", product.name);
            state.save_products().await
        }
        Action::Remove { id } => {
            let before = state.products.len();
            state.products.retain(|p| p.id != id);
            if state.products.len() == before {
                bail!("product not found: {id}");
            }
            println!("Removed {id}");
            state.save_products().await
        }
    }
}
