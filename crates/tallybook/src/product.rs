use serde::{Deserialize, Serialize};

use crate::id::new_id;

/// A catalog entry with its current on-hand quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub specification: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        specification: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> Self {
        Self {
            id: new_id("prod"),
            name: name.into(),
            specification: specification.into(),
            quantity,
            unit_price,
        }
    }

    /// Value of the stock on hand.
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity <= threshold
    }

    /// Case-insensitive match on name or specification.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.specification.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new("Widget", "10mm steel", 25, 149.5)
    }

    #[test]
    fn total_value_is_quantity_times_unit_price() {
        assert_eq!(widget().total_value(), 25.0 * 149.5);
    }

    #[test]
    fn low_stock_includes_the_threshold_itself() {
        let mut p = widget();
        p.quantity = 10;
        assert!(p.is_low_stock(10));
        p.quantity = 11;
        assert!(!p.is_low_stock(10));
    }

    #[test]
    fn matches_name_and_specification_case_insensitively() {
        let p = widget();
        assert!(p.matches("widg"));
        assert!(p.matches("STEEL"));
        assert!(!p.matches("copper"));
    }

    #[test]
    fn serializes_with_original_field_names() {
        let json = serde_json::to_value(widget()).unwrap();
        assert!(json.get("unitPrice").is_some());
        assert!(json.get("unit_price").is_none());
    }

    #[test]
    fn round_trips_existing_data_file_shape() {
        let json = r#"{
            "id": "prod_1700000000000",
            "name": "Cement bag",
            "specification": "50kg OPC",
            "quantity": 120,
            "unitPrice": 385.0
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "prod_1700000000000");
        assert_eq!(p.quantity, 120);
        assert_eq!(p.unit_price, 385.0);
    }
}
