use tallybook::money::format_inr;
use tallybook::{Estimate, Invoice, Product, StockMovement, User};

const MAX_TEXT_WIDTH: usize = 30;

pub fn print_products(products: &[&Product], low_stock_threshold: i64) {
    if products.is_empty() {
        println!("No products.");
        return;
    }

    let name_width = column_width(products.iter().map(|p| p.name.as_str()), "NAME");
    let spec_width = column_width(products.iter().map(|p| p.specification.as_str()), "SPEC");

    println!(
        "{:<22}  {:<name_width$}  {:<spec_width$}  {:>6}  {:>14}  {}",
        "ID", "NAME", "SPEC", "QTY", "VALUE", "STATUS"
    );
    for product in products {
        let status = if product.is_low_stock(low_stock_threshold) {
            "low stock"
        } else {
            "in stock"
        };
        println!(
            "{:<22}  {:<name_width$}  {:<spec_width$}  {:>6}  {:>14}  {status}",
            product.id,
            truncate(&product.name, name_width),
            truncate(&product.specification, spec_width),
            product.quantity,
            format_inr(product.total_value()),
        );
    }

    println!("\n{} products", products.len());
}

pub fn print_movements(movements: &[&StockMovement]) {
    if movements.is_empty() {
        println!("No stock movements recorded.");
        return;
    }

    let name_width = column_width(movements.iter().map(|m| m.product_name.as_str()), "PRODUCT");

    println!(
        "{:<10}  {:<4}  {:<name_width$}  {:>6}  {}",
        "DATE", "TYPE", "PRODUCT", "QTY", "NOTES"
    );
    for movement in movements {
        println!(
            "{:<10}  {:<4}  {:<name_width$}  {:>6}  {}",
            movement.date,
            movement.movement_type,
            truncate(&movement.product_name, name_width),
            movement.quantity,
            movement.notes,
        );
    }

    println!("\n{} movements", movements.len());
}

pub fn print_estimates(estimates: &[Estimate]) {
    if estimates.is_empty() {
        println!("No estimates.");
        return;
    }

    let customer_width = column_width(estimates.iter().map(|e| e.customer.name.as_str()), "CUSTOMER");

    println!(
        "{:<12}  {:<10}  {:<customer_width$}  {:>14}  {}",
        "NUMBER", "DATE", "CUSTOMER", "TOTAL", "STATUS"
    );
    for estimate in estimates {
        println!(
            "{:<12}  {:<10}  {:<customer_width$}  {:>14}  {}",
            estimate.estimate_number,
            estimate.date,
            truncate(&estimate.customer.name, customer_width),
            format_inr(estimate.total),
            estimate.status,
        );
    }

    println!("\n{} estimates", estimates.len());
}

pub fn print_invoices(invoices: &[Invoice]) {
    if invoices.is_empty() {
        println!("No invoices.");
        return;
    }

    let customer_width = column_width(invoices.iter().map(|i| i.customer.name.as_str()), "CUSTOMER");

    println!(
        "{:<12}  {:<10}  {:<customer_width$}  {:>14}  {}",
        "NUMBER", "DATE", "CUSTOMER", "TOTAL", "STATUS"
    );
    for invoice in invoices {
        println!(
            "{:<12}  {:<10}  {:<customer_width$}  {:>14}  {}",
            invoice.invoice_number,
            invoice.date,
            truncate(&invoice.customer.name, customer_width),
            format_inr(invoice.total),
            invoice.status,
        );
    }

    println!("\n{} invoices", invoices.len());
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("No users.");
        return;
    }

    let name_width = column_width(users.iter().map(|u| u.name.as_str()), "NAME");
    let username_width = column_width(users.iter().map(|u| u.username.as_str()), "USERNAME");

    println!(
        "{:<22}  {:<name_width$}  {:<username_width$}  {}",
        "ID", "NAME", "USERNAME", "ROLE"
    );
    for user in users {
        println!(
            "{:<22}  {:<name_width$}  {:<username_width$}  {}",
            user.id,
            truncate(&user.name, name_width),
            truncate(&user.username, username_width),
            user.role,
        );
    }

    println!("\n{} users", users.len());
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, heading: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(heading.chars().count()))
        .max()
        .unwrap_or(0)
        .min(MAX_TEXT_WIDTH)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate("cement", 10), "cement");
    }

    #[test]
    fn truncate_long_string_adds_ellipsis() {
        assert_eq!(truncate("cement bags", 7), "cement…");
    }

    #[test]
    fn column_width_covers_heading_and_caps_out() {
        assert_eq!(column_width(["ab", "abcd"].into_iter(), "NAME"), 4);
        assert_eq!(column_width(std::iter::empty(), "NAME"), 4);

        let long = "x".repeat(80);
        assert_eq!(
            column_width([long.as_str()].into_iter(), "NAME"),
            MAX_TEXT_WIDTH
        );
    }
}
