use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Product;
use crate::id::new_id;

/// GST rate applied to every document (18%).
pub const GST_RATE: f64 = 0.18;

/// Prefix for estimate numbers. Invoice numbers use the configurable
/// `invoicePrefix` setting instead.
pub const ESTIMATE_PREFIX: &str = "EST-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// One billed row, priced at the moment the document was drafted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub product_name: String,
    pub specification: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("product not found: {0}")]
    UnknownProduct(String),

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("estimate {0} is already invoiced")]
    AlreadyInvoiced(String),
}

/// Price a line from the current catalog entry.
pub fn build_line_item(
    products: &[Product],
    product_id: &str,
    quantity: i64,
) -> Result<LineItem, BillingError> {
    if quantity <= 0 {
        return Err(BillingError::InvalidQuantity);
    }
    let product = products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| BillingError::UnknownProduct(product_id.to_owned()))?;

    Ok(LineItem {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        specification: product.specification.clone(),
        quantity,
        unit_price: product.unit_price,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    Draft,
    Sent,
    Invoiced,
}

impl fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Sent => write!(f, "sent"),
            Self::Invoiced => write!(f, "invoiced"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub id: String,
    pub estimate_number: String,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub gst_amount: f64,
    pub total: f64,
    pub date: String,
    pub status: EstimateStatus,
}

impl Estimate {
    /// Draft a new estimate; totals are derived from the items.
    pub fn new(estimate_number: String, customer: Customer, items: Vec<LineItem>, date: String) -> Self {
        let subtotal: f64 = items.iter().map(LineItem::amount).sum();
        let gst_amount = subtotal * GST_RATE;

        Self {
            id: new_id("est"),
            estimate_number,
            customer,
            items,
            subtotal,
            gst_amount,
            total: subtotal + gst_amount,
            date,
            status: EstimateStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Paid,
    Overdue,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

/// An invoice splits the GST into equal CGST and SGST halves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_id: Option<String>,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub total: f64,
    pub date: String,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Raise an invoice directly, without an estimate behind it.
    pub fn new(invoice_number: String, customer: Customer, items: Vec<LineItem>, date: String) -> Self {
        let subtotal: f64 = items.iter().map(LineItem::amount).sum();
        let half_gst = subtotal * GST_RATE / 2.0;

        Self {
            id: new_id("inv"),
            invoice_number,
            estimate_id: None,
            customer,
            items,
            subtotal,
            cgst_amount: half_gst,
            sgst_amount: half_gst,
            total: subtotal + half_gst + half_gst,
            date,
            status: InvoiceStatus::Draft,
        }
    }
}

/// Turn an estimate into an invoice. The estimate keeps its totals and
/// items; its status becomes `invoiced` and cannot convert again.
pub fn convert_estimate(
    estimate: &mut Estimate,
    invoice_number: String,
    date: String,
) -> Result<Invoice, BillingError> {
    if estimate.status == EstimateStatus::Invoiced {
        return Err(BillingError::AlreadyInvoiced(
            estimate.estimate_number.clone(),
        ));
    }

    let half_gst = estimate.subtotal * GST_RATE / 2.0;
    let invoice = Invoice {
        id: new_id("inv"),
        invoice_number,
        estimate_id: Some(estimate.id.clone()),
        customer: estimate.customer.clone(),
        items: estimate.items.clone(),
        subtotal: estimate.subtotal,
        cgst_amount: half_gst,
        sgst_amount: half_gst,
        total: estimate.subtotal + half_gst + half_gst,
        date,
        status: InvoiceStatus::Draft,
    };

    estimate.status = EstimateStatus::Invoiced;
    Ok(invoice)
}

/// Next estimate number in the `EST-0001` sequence.
pub fn next_estimate_number(estimates: &[Estimate]) -> String {
    next_in_sequence(
        estimates.iter().map(|e| e.estimate_number.as_str()),
        ESTIMATE_PREFIX,
    )
}

/// Next invoice number under the configured prefix.
pub fn next_invoice_number(invoices: &[Invoice], prefix: &str) -> String {
    next_in_sequence(invoices.iter().map(|i| i.invoice_number.as_str()), prefix)
}

/// Highest numeric suffix under `prefix`, plus one, zero-padded to four
/// digits. Numbers under other prefixes are ignored.
fn next_in_sequence<'a>(numbers: impl Iterator<Item = &'a str>, prefix: &str) -> String {
    let max = numbers
        .filter_map(|n| n.strip_prefix(prefix))
        .filter_map(|rest| rest.parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    format!("{prefix}{:04}", max + 1)
}
