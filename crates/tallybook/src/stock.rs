use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Product;
use crate::id::new_id;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockMovementType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl StockMovementType {
    /// Parse a user-supplied direction string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }
}

impl fmt::Display for StockMovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
        }
    }
}

/// One ledger entry. The product name is denormalized at record time so
/// history stays readable after a product is renamed or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    #[serde(rename = "type")]
    pub movement_type: StockMovementType,
    pub quantity: i64,
    pub date: String,
    pub notes: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("product not found: {0}")]
    UnknownProduct(String),

    #[error("cannot stock out {requested}: only {available} available")]
    InsufficientStock { requested: i64, available: i64 },
}

/// Record a movement and apply it to the product's on-hand quantity.
///
/// An OUT movement never takes the quantity below zero. The new entry is
/// prepended so the ledger reads newest first.
pub fn record_movement(
    products: &mut [Product],
    stock: &mut Vec<StockMovement>,
    product_id: &str,
    movement_type: StockMovementType,
    quantity: i64,
    date: String,
    notes: String,
) -> Result<(), StockError> {
    if quantity <= 0 {
        return Err(StockError::InvalidQuantity);
    }

    let product = products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or_else(|| StockError::UnknownProduct(product_id.to_owned()))?;

    if movement_type == StockMovementType::Out && quantity > product.quantity {
        return Err(StockError::InsufficientStock {
            requested: quantity,
            available: product.quantity,
        });
    }

    let movement = StockMovement {
        id: new_id("stock"),
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        movement_type,
        quantity,
        date,
        notes,
    };

    product.quantity = match movement_type {
        StockMovementType::In => product.quantity + quantity,
        StockMovementType::Out => product.quantity - quantity,
    };

    stock.insert(0, movement);
    Ok(())
}

/// History ordered by date descending. Entries on the same date keep their
/// stored (newest-first) order.
pub fn history_newest_first(stock: &[StockMovement]) -> Vec<&StockMovement> {
    let mut sorted: Vec<&StockMovement> = stock.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("Widget", "10mm", 20, 10.0),
            Product::new("Bolt", "M8", 5, 2.0),
        ]
    }

    #[test]
    fn stock_in_increases_quantity() {
        let mut products = catalog();
        let mut stock = Vec::new();
        let id = products[0].id.clone();

        record_movement(
            &mut products,
            &mut stock,
            &id,
            StockMovementType::In,
            7,
            "2026-08-01".into(),
            String::new(),
        )
        .unwrap();

        assert_eq!(products[0].quantity, 27);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].product_name, "Widget");
    }

    #[test]
    fn stock_out_decreases_quantity() {
        let mut products = catalog();
        let mut stock = Vec::new();
        let id = products[1].id.clone();

        record_movement(
            &mut products,
            &mut stock,
            &id,
            StockMovementType::Out,
            5,
            "2026-08-01".into(),
            "sold".into(),
        )
        .unwrap();

        assert_eq!(products[1].quantity, 0);
    }

    #[test]
    fn stock_out_cannot_exceed_available() {
        let mut products = catalog();
        let mut stock = Vec::new();
        let id = products[1].id.clone();

        let err = record_movement(
            &mut products,
            &mut stock,
            &id,
            StockMovementType::Out,
            6,
            "2026-08-01".into(),
            String::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            StockError::InsufficientStock {
                requested: 6,
                available: 5
            }
        ));
        // Nothing recorded, nothing applied.
        assert_eq!(products[1].quantity, 5);
        assert!(stock.is_empty());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let mut products = catalog();
        let mut stock = Vec::new();
        let id = products[0].id.clone();

        let err = record_movement(
            &mut products,
            &mut stock,
            &id,
            StockMovementType::In,
            0,
            "2026-08-01".into(),
            String::new(),
        )
        .unwrap_err();

        assert!(matches!(err, StockError::InvalidQuantity));
    }

    #[test]
    fn rejects_unknown_product() {
        let mut products = catalog();
        let mut stock = Vec::new();

        let err = record_movement(
            &mut products,
            &mut stock,
            "prod_missing",
            StockMovementType::In,
            1,
            "2026-08-01".into(),
            String::new(),
        )
        .unwrap_err();

        assert!(matches!(err, StockError::UnknownProduct(_)));
    }

    #[test]
    fn newest_movement_comes_first() {
        let mut products = catalog();
        let mut stock = Vec::new();
        let id = products[0].id.clone();

        for day in ["2026-08-01", "2026-08-02"] {
            record_movement(
                &mut products,
                &mut stock,
                &id,
                StockMovementType::In,
                1,
                day.into(),
                String::new(),
            )
            .unwrap();
        }

        assert_eq!(stock[0].date, "2026-08-02");
        let history = history_newest_first(&stock);
        assert_eq!(history[0].date, "2026-08-02");
        assert_eq!(history[1].date, "2026-08-01");
    }

    #[test]
    fn movement_type_uses_original_wire_tags() {
        let json = serde_json::to_string(&StockMovementType::Out).unwrap();
        assert_eq!(json, "\"OUT\"");
        let parsed: StockMovementType = serde_json::from_str("\"IN\"").unwrap();
        assert_eq!(parsed, StockMovementType::In);
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(StockMovementType::parse("In"), Some(StockMovementType::In));
        assert_eq!(
            StockMovementType::parse("OUT"),
            Some(StockMovementType::Out)
        );
        assert_eq!(StockMovementType::parse("sideways"), None);
    }
}
