use anyhow::Result;
use tallybook::money::format_inr;
use tallybook::{Estimate, EstimateStatus, Invoice, InvoiceStatus, StockMovementType};

use crate::state::AppState;

pub fn run(state: &AppState) -> Result<()> {
    let inventory_value: f64 = state.products.iter().map(|p| p.total_value()).sum();
    println!("Inventory");
    println!(
        "  {} products, stock value {}",
        state.products.len(),
        format_inr(inventory_value)
    );

    let threshold = state.settings.low_stock_threshold;
    let low: Vec<_> = state
        .products
        .iter()
        .filter(|p| p.is_low_stock(threshold))
        .collect();
    if low.is_empty() {
        println!("  No products at or below the low-stock threshold ({threshold}).");
    } else {
        for product in low {
            println!("  low stock: {} ({} on hand)", product.name, product.quantity);
        }
    }

    let stocked_in: i64 = quantity_of(state, StockMovementType::In);
    let stocked_out: i64 = quantity_of(state, StockMovementType::Out);
    println!("\nStock movements");
    println!(
        "  {} entries, {stocked_in} in, {stocked_out} out",
        state.stock.len()
    );

    println!("\nEstimates");
    for status in [
        EstimateStatus::Draft,
        EstimateStatus::Sent,
        EstimateStatus::Invoiced,
    ] {
        let (count, total) = estimate_totals(&state.estimates, status);
        println!("  {status}: {count} ({})", format_inr(total));
    }

    println!("\nInvoices");
    for status in [
        InvoiceStatus::Draft,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ] {
        let (count, total) = invoice_totals(&state.invoices, status);
        println!("  {status}: {count} ({})", format_inr(total));
    }

    let outstanding: f64 = state
        .invoices
        .iter()
        .filter(|i| i.status != InvoiceStatus::Paid)
        .map(|i| i.total)
        .sum();
    println!("  outstanding: {}", format_inr(outstanding));

    Ok(())
}

fn quantity_of(state: &AppState, movement_type: StockMovementType) -> i64 {
    state
        .stock
        .iter()
        .filter(|m| m.movement_type == movement_type)
        .map(|m| m.quantity)
        .sum()
}

fn estimate_totals(estimates: &[Estimate], status: EstimateStatus) -> (usize, f64) {
    let matching: Vec<_> = estimates.iter().filter(|e| e.status == status).collect();
    (matching.len(), matching.iter().map(|e| e.total).sum())
}

fn invoice_totals(invoices: &[Invoice], status: InvoiceStatus) -> (usize, f64) {
    let matching: Vec<_> = invoices.iter().filter(|i| i.status == status).collect();
    (matching.len(), matching.iter().map(|i| i.total).sum())
}
