//! Items

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// A product in the cart together with the quantity selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    product: Product,

    quantity: NonZeroU32,
}

impl LineItem {
    /// Creates a line item for a single unit of `product`.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Creates a line item with the given quantity.
    pub fn with_quantity(product: Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product identifier
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Returns the product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the unit price
    pub fn price(&self) -> u64 {
        self.product.price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    pub(crate) fn increment(&mut self, by: NonZeroU32) {
        self.quantity = self.quantity.saturating_add(by.get());
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> u64 {
        self.price().saturating_mul(u64::from(self.quantity.get()))
    }

    /// Returns how far this line exceeds the product's tracked stock, if it does.
    pub fn stock_shortfall(&self) -> Option<StockShortfall> {
        let available = self.product.stock?;
        let requested = self.quantity.get();

        (requested > available).then(|| StockShortfall {
            product_id: self.product.id.clone(),
            requested,
            available,
        })
    }
}

/// A line item whose quantity is more than the product has in stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    /// Product that is short
    pub product_id: ProductId,

    /// Quantity in the cart
    pub requested: u32,

    /// Units in stock
    pub available: u32,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_line_item_has_quantity_one() {
        let item = LineItem::new(Product::new("a", "Roti", 1_000));

        assert_eq!(item.quantity().get(), 1);
        assert_eq!(item.line_total(), 1_000);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() -> TestResult {
        let item = LineItem::with_quantity(
            Product::new("a", "Roti", 1_250),
            NonZeroU32::try_from(4_u32)?,
        );

        assert_eq!(item.line_total(), 5_000);

        Ok(())
    }

    #[test]
    fn stock_shortfall_only_when_quantity_exceeds_tracked_stock() -> TestResult {
        let untracked =
            LineItem::with_quantity(Product::new("a", "Roti", 1), NonZeroU32::try_from(9_u32)?);
        let within = LineItem::with_quantity(
            Product::new("b", "Susu", 1).with_stock(3),
            NonZeroU32::try_from(3_u32)?,
        );
        let over = LineItem::with_quantity(
            Product::new("c", "Keju", 1).with_stock(2),
            NonZeroU32::try_from(5_u32)?,
        );

        assert_eq!(untracked.stock_shortfall(), None);
        assert_eq!(within.stock_shortfall(), None);
        assert_eq!(
            over.stock_shortfall(),
            Some(StockShortfall {
                product_id: ProductId::from("c"),
                requested: 5,
                available: 2,
            })
        );

        Ok(())
    }

    #[test]
    fn serializes_product_fields_inline_with_quantity() -> TestResult {
        let item = LineItem::new(Product::new("a", "Roti", 1_000).with_category("Bakery"));

        let json = serde_json::to_value(&item)?;

        assert_eq!(json["id"], "a");
        assert_eq!(json["category"], "Bakery");
        assert_eq!(json["quantity"], 1);

        Ok(())
    }

    #[test]
    fn zero_quantity_fails_to_deserialize() {
        let result = serde_json::from_str::<LineItem>(
            r#"{"id":"a","name":"Roti","price":1000,"quantity":0}"#,
        );

        assert!(result.is_err(), "a zero quantity must be rejected");
    }
}
