//! Cart
//!
//! The cart aggregates products a shopper selects into line items, one per
//! product id, and keeps its storage record in step with every change.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    items::{LineItem, StockShortfall},
    pricing::{self, TotalPriceError},
    products::{Product, ProductId},
    storage::{self, CartStorage, DEFAULT_STORAGE_KEY, MemoryStorage, PersistError, StorageError},
};

/// Shopping cart
#[derive(Debug)]
pub struct Cart<S: CartStorage = MemoryStorage> {
    items: Vec<LineItem>,
    storage: S,
    key: String,
    persisted: bool,
}

impl<S: CartStorage> Cart<S> {
    /// Create an empty cart saving under [`DEFAULT_STORAGE_KEY`].
    ///
    /// Nothing is read from or written to `storage` until the first change.
    pub fn new(storage: S) -> Self {
        Self {
            items: Vec::new(),
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            persisted: false,
        }
    }

    /// Restore the cart saved under [`DEFAULT_STORAGE_KEY`].
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Restore the cart saved under `key`.
    ///
    /// A missing, unreadable or malformed record yields an empty cart.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut persisted = true;

        let items = match storage.read(&key) {
            Ok(Some(raw)) => storage::decode(&raw).unwrap_or_else(|error| {
                warn!(key = %key, %error, "discarding unreadable cart record");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(key = %key, %error, "failed to read cart record");
                persisted = false;
                Vec::new()
            }
        };

        let items = merge_duplicates(items);

        debug!(key = %key, lines = items.len(), "restored cart");

        Self {
            items,
            storage,
            key,
            persisted,
        }
    }

    /// Add one unit of `product`, merging into an existing line for the same id.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == &product.id) {
            item.increment(NonZeroU32::MIN);
            debug!(product_id = %product.id, quantity = item.quantity().get(), "incremented line");
        } else {
            self.items.push(LineItem::new(product.clone()));
            debug!(product_id = %product.id, "added line");
        }

        self.persist();
    }

    /// Remove the line for `id`. Removing an absent id changes nothing.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.items.len();

        self.items.retain(|item| item.id() != id);

        if self.items.len() != before {
            debug!(product_id = %id, "removed line");
            self.persist();
        }
    }

    /// Replace the quantity of the line for `id`.
    ///
    /// A quantity of zero removes the line. Absent ids are ignored. Stock is
    /// not enforced here; see [`Cart::stock_shortfalls`].
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            self.remove_item(id);
            return;
        };

        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return;
        };

        item.set_quantity(quantity);
        debug!(product_id = %id, quantity = quantity.get(), "set quantity");

        self.persist();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cleared cart");

        self.persist();
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u64 {
        pricing::total_item_count(&self.items)
    }

    /// Sum of `price * quantity` across all lines, in whole currency units.
    pub fn total_amount(&self) -> u64 {
        pricing::total_amount(&self.items)
    }

    /// The cart total as money in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total cannot be represented.
    pub fn total_money(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, TotalPriceError> {
        pricing::total_money(&self.items, currency)
    }

    /// Lines whose quantity is more than the product's tracked stock.
    pub fn stock_shortfalls(&self) -> SmallVec<[StockShortfall; 4]> {
        self.items
            .iter()
            .filter_map(LineItem::stock_shortfall)
            .collect()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `id`, if present.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the last save succeeded.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Storage key the cart saves under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the cart, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Save the current lines, reporting any failure.
    ///
    /// The in-memory lines are unaffected by a failed save.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if encoding or writing fails.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        let result = storage::encode(&self.items)
            .map_err(PersistError::from)
            .and_then(|raw| {
                self.storage
                    .write(&self.key, &raw)
                    .map_err(PersistError::from)
            });

        self.persisted = result.is_ok();

        result
    }

    /// Delete the stored record without touching the in-memory lines.
    ///
    /// Afterwards the cart counts as persisted only if it holds no lines, since
    /// a missing record loads as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the record cannot be removed.
    pub fn remove_record(&mut self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        self.persisted = self.items.is_empty();

        debug!(key = %self.key, "removed cart record");

        Ok(())
    }

    fn persist(&mut self) {
        if let Err(error) = self.flush() {
            warn!(key = %self.key, %error, "failed to persist cart");
        }
    }
}

/// Collapse repeated ids into one line, summing quantities in first-seen order.
fn merge_duplicates(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());

    for item in items {
        match merged.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => existing.increment(item.quantity()),
            None => merged.push(item),
        }
    }

    merged
}
