use anyhow::{Result, bail};
use clap::Subcommand;
use tallybook::money::format_inr;
use tallybook::{Customer, Estimate, EstimateStatus, billing};

use crate::state::AppState;

use super::format;

#[derive(Debug, Subcommand)]
pub enum Action {
    /// List estimates
    List,
    /// Draft a new estimate
    Create {
        #[arg(long)]
        customer_name: String,
        #[arg(long, default_value = "")]
        customer_address: String,
        #[arg(long, default_value = "")]
        customer_email: String,
        #[arg(long, default_value = "")]
        customer_phone: String,
        /// Line item as "<product-id>:<quantity>"; repeat for more rows
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Document date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a draft estimate as sent
    Send { number: String },
    /// Convert an estimate into an invoice
    Invoice { number: String },
}

pub async fn run(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::List => {
            format::print_estimates(&state.estimates);
            Ok(())
        }
        Action::Create {
            customer_name,
            customer_address,
            customer_email,
            customer_phone,
            items,
            date,
        } => {
            let items = super::parse_line_items(&state.products, &items)?;
            let customer = Customer {
                name: customer_name,
                address: customer_address,
                email: customer_email,
                phone: customer_phone,
            };

            let estimate = Estimate::new(
                billing::next_estimate_number(&state.estimates),
                customer,
                items,
                date.unwrap_or_else(super::today),
            );
            println!(
                "Drafted {} for {} ({})",
                estimate.estimate_number,
                estimate.customer.name,
                format_inr(estimate.total),
            );
            state.estimates.push(estimate);
            state.save_estimates().await
        }
        Action::Send { number } => {
            let Some(estimate) = state
                .estimates
                .iter_mut()
                .find(|e| e.estimate_number == number)
            else {
                bail!("estimate not found: {number}");
            };
            if estimate.status != EstimateStatus::Draft {
                bail!("estimate {number} is already {}", estimate.status);
            }
            estimate.status = EstimateStatus::Sent;
            println!("Marked {number} as sent");
            state.save_estimates().await
        }
        Action::Invoice { number } => {
            let invoice_number =
                billing::next_invoice_number(&state.invoices, &state.settings.invoice_prefix);

            let Some(estimate) = state
                .estimates
                .iter_mut()
                .find(|e| e.estimate_number == number)
            else {
                bail!("estimate not found: {number}");
            };

            let invoice = billing::convert_estimate(estimate, invoice_number, super::today())?;
            println!(
                "Raised {} from {} ({})",
                invoice.invoice_number,
                number,
                format_inr(invoice.total),
            );
            state.invoices.push(invoice);

            state.save_estimates().await?;
            state.save_invoices().await
        }
    }
}
