pub mod dashboard;
pub mod estimates;
pub mod format;
pub mod invoices;
pub mod products;
pub mod report;
pub mod settings;
pub mod stock;
pub mod users;

use anyhow::{Context, Result, bail};
use tallybook::{LineItem, Product, billing};

/// Today in the `YYYY-MM-DD` form the data files use.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Parse `"<product-id>:<quantity>"` item arguments against the catalog.
pub(crate) fn parse_line_items(products: &[Product], specs: &[String]) -> Result<Vec<LineItem>> {
    let mut items = Vec::with_capacity(specs.len());

    for spec in specs {
        let Some((product_id, quantity)) = spec.rsplit_once(':') else {
            bail!("malformed item {spec:?} (use \"<product-id>:<quantity>\")");
        };
        let quantity: i64 = quantity
            .parse()
            .with_context(|| format!("malformed quantity in {spec:?}"))?;

        items.push(billing::build_line_item(products, product_id, quantity)?);
    }

    Ok(items)
}
