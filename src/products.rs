//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Opaque product identifier, as issued by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Product
///
/// A catalog product as seen by the cart. Only `id`, `price` and `stock` carry
/// meaning here; the remaining fields are display data passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price, in whole units of the display currency
    pub price: u64,

    /// Product image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Product description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Product category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Units in stock, `None` when stock is not tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// Creates a product with just an identifier, name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            description: None,
            category: None,
            stock: None,
        }
    }

    /// Sets the tracked stock level.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Sets the category name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_id_displays_raw_value() {
        let id = ProductId::from("sku-42");

        assert_eq!(id.to_string(), "sku-42");
        assert_eq!(id.as_str(), "sku-42");
    }

    #[test]
    fn deserializes_camel_case_with_missing_optional_fields() -> TestResult {
        let product: Product =
            serde_json::from_str(r#"{"id":"a","name":"Kopi Susu","price":18000,"stock":4}"#)?;

        assert_eq!(product.id, ProductId::from("a"));
        assert_eq!(product.price, 18_000);
        assert_eq!(product.stock, Some(4));
        assert!(product.image.is_none());
        assert!(product.category.is_none());

        Ok(())
    }

    #[test]
    fn serializes_id_as_plain_string() -> TestResult {
        let product = Product::new("a", "Teh", 5_000);

        let json = serde_json::to_value(&product)?;

        assert_eq!(json["id"], "a");
        assert!(json.get("stock").is_none(), "untracked stock is omitted");

        Ok(())
    }
}
