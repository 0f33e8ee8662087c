use anyhow::Result;

use crate::state::AppState;

pub fn run(state: &AppState) -> Result<()> {
    println!("Products:   {}", state.products.len());
    println!("Stock log:  {}", state.stock.len());
    println!("Estimates:  {}", state.estimates.len());
    println!("Invoices:   {}", state.invoices.len());
    println!("Users:      {}", state.users.len());
    Ok(())
}
