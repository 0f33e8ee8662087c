use anyhow::{Result, bail};
use clap::Subcommand;
use tallybook::money::format_inr;
use tallybook::{Customer, Invoice, InvoiceStatus, billing};

use crate::state::AppState;

use super::format;

#[derive(Debug, Subcommand)]
pub enum Action {
    /// List invoices
    List,
    /// Raise an invoice without an estimate behind it
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
    /// Mark an invoice paid
    MarkPaid { number: String },
    /// Flag an unpaid invoice as overdue
    MarkOverdue { number: String },
}

pub async fn run(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::List => {
            format::print_invoices(&state.invoices);
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

            let invoice = Invoice::new(
                billing::next_invoice_number(&state.invoices, &state.settings.invoice_prefix),
                customer,
                items,
                date.unwrap_or_else(super::today),
            );
            println!(
                "Raised {} for {} ({})",
                invoice.invoice_number,
                invoice.customer.name,
                format_inr(invoice.total),
            );
            state.invoices.push(invoice);
            state.save_invoices().await
        }
        Action::MarkPaid { number } => {
            let invoice = find_invoice(state, &number)?;
            if invoice.status == InvoiceStatus::Paid {
                bail!("invoice {number} is already paid");
            }
            invoice.status = InvoiceStatus::Paid;
            println!("Marked {number} as paid");
            state.save_invoices().await
        }
        Action::MarkOverdue { number } => {
            let invoice = find_invoice(state, &number)?;
            if invoice.status == InvoiceStatus::Paid {
                bail!("invoice {number} is already paid");
            }
            invoice.status = InvoiceStatus::Overdue;
            println!("Flagged {number} as overdue");
            state.save_invoices().await
        }
    }
}

fn find_invoice<'a>(state: &'a mut AppState, number: &str) -> Result<&'a mut Invoice> {
    state
        .invoices
        .iter_mut()
        .find(|i| i.invoice_number == number)
        .ok_or_else(|| anyhow::anyhow!("invoice not found: {number}"))
}
