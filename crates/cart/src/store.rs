//! The cart store.
//!
//! Owns the in-memory cart, keeps it mirrored into local storage, and
//! enforces a stock ceiling before any quantity increase. State lives in a
//! `watch` channel so UI layers can observe replacements reactively, and
//! user-facing failures go out on the notice channel.
//!
//! Operations are meant to run one at a time on a single-threaded event
//! loop. Each one reads a snapshot, suspends for network calls, and then
//! overwrites the whole cart - two interleaved operations on the same id
//! can race, last write wins. No locking is applied on purpose.

use rocketshoes_core::ProductId;
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::instrument;

use crate::catalog::{CatalogError, CatalogService};
use crate::notify::{self, Notice, NoticeKind, NoticeMessages, NOTICE_CHANNEL_CAPACITY};
use crate::storage::{CartStorage, StorageError};
use crate::types::{CartItem, UpdateProductAmount};

/// Errors surfaced by cart operations.
///
/// Callers get the structured kind for observability; the user only ever
/// sees the corresponding [`Notice`], which the store emits itself before
/// returning. No failure rolls back state that was already committed.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for product {0}")]
    OutOfStock(ProductId),

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Shopping-cart store backed by a catalog service and local storage.
///
/// Share one store across UI components by wrapping it in an `Arc`;
/// observers that only need the cart or the notices can hold the channel
/// receivers instead.
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    storage_key: String,
    messages: NoticeMessages,
    cart: watch::Sender<Vec<CartItem>>,
    notices: broadcast::Sender<Notice>,
}

impl<C, S> CartStore<C, S>
where
    C: CatalogService,
    S: CartStorage,
{
    /// Create a store, loading any previously persisted cart.
    ///
    /// Absent, unreadable, or unparsable persisted data initializes an
    /// empty cart; startup never fails on bad storage contents.
    pub fn new(catalog: C, storage: S, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let initial = load_initial(&storage, &storage_key);

        let (cart, _) = watch::channel(initial);
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);

        Self {
            catalog,
            storage,
            storage_key,
            messages: NoticeMessages::default(),
            cart,
            notices,
        }
    }

    /// Replace the user-facing notice text.
    #[must_use]
    pub fn with_messages(mut self, messages: NoticeMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        self.cart.borrow().clone()
    }

    /// Observe cart replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.cart.subscribe()
    }

    /// Receive user-facing notices.
    #[must_use]
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// For a product already in the cart this increments its quantity by
    /// one; otherwise the product record is fetched from the catalog and
    /// inserted with quantity one. The requested quantity is validated
    /// against fresh stock first.
    ///
    /// # Errors
    ///
    /// Returns the structured failure kind. A matching notice has already
    /// been emitted; the cart is left at its prior committed state.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add(product_id).await;
        if let Err(err) = &result {
            self.report(err, NoticeKind::AddFailed);
        }
        result
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] (with a remove-failure notice) if
    /// the product is absent, or a storage error if persisting fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove(product_id);
        if let Err(err) = &result {
            self.report(err, NoticeKind::RemoveFailed);
        }
        result
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A non-positive amount is a pure no-op: no state change, no notice,
    /// no persistence write.
    ///
    /// # Errors
    ///
    /// Returns the structured failure kind. A matching notice has already
    /// been emitted; the cart is left at its prior committed state.
    #[instrument(skip(self), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<(), CartError> {
        if update.amount <= 0 {
            return Ok(());
        }

        let result = self.try_update(update).await;
        if let Err(err) = &result {
            self.report(err, NoticeKind::UpdateFailed);
        }
        result
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let cart = self.cart.borrow().clone();
        let existing_amount = cart
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.amount);

        let wanted = existing_amount.map_or(1, |amount| amount + 1);
        self.check_stock(product_id, wanted).await?;

        let next = if existing_amount.is_some() {
            cart.into_iter()
                .map(|mut item| {
                    if item.product.id == product_id {
                        item.amount = wanted;
                    }
                    item
                })
                .collect()
        } else {
            let product = self.catalog.fetch_product(product_id).await?;
            let mut next = cart;
            next.push(CartItem::new(product, 1));
            next
        };

        self.commit(next)
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let cart = self.cart.borrow().clone();
        if !cart.iter().any(|item| item.product.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let next = cart
            .into_iter()
            .filter(|item| item.product.id != product_id)
            .collect();

        self.commit(next)
    }

    async fn try_update(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        // Quantities beyond u32 can never pass a stock check anyway.
        let wanted = u32::try_from(amount).unwrap_or(u32::MAX);

        let cart = self.cart.borrow().clone();
        if !cart.iter().any(|item| item.product.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        self.check_stock(product_id, wanted).await?;

        let next = cart
            .into_iter()
            .map(|mut item| {
                if item.product.id == product_id {
                    item.amount = wanted;
                }
                item
            })
            .collect();

        self.commit(next)
    }

    /// Validate a requested quantity against fresh stock.
    async fn check_stock(&self, product_id: ProductId, wanted: u32) -> Result<(), CartError> {
        let stock = self.catalog.fetch_stock(product_id).await?;
        if stock.amount >= wanted {
            Ok(())
        } else {
            Err(CartError::OutOfStock(product_id))
        }
    }

    /// Replace the cart and mirror it into storage.
    ///
    /// Memory is replaced before the write, so a failed write keeps the
    /// new in-memory state and only surfaces a notice.
    fn commit(&self, next: Vec<CartItem>) -> Result<(), CartError> {
        let serialized = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.cart.send_replace(next);
        self.storage.set(&self.storage_key, &serialized)?;
        Ok(())
    }

    /// Emit the notice for a failed operation.
    ///
    /// Insufficient stock is a business rejection with its own specific
    /// warning; every other failure collapses into the operation's generic
    /// message.
    fn report(&self, err: &CartError, fallback: NoticeKind) {
        match err {
            CartError::OutOfStock(product_id) => {
                tracing::debug!(%product_id, "Requested quantity exceeds stock");
                notify::emit(&self.notices, &self.messages, NoticeKind::OutOfStock);
            }
            _ => {
                tracing::warn!(error = %err, "Cart operation failed");
                notify::emit(&self.notices, &self.messages, fallback);
            }
        }
    }
}

/// Load the persisted cart, falling back to empty on any problem.
fn load_initial<S: CartStorage>(storage: &S, key: &str) -> Vec<CartItem> {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Persisted cart is unparsable, starting empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::Price;
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::CatalogError;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::storage::MemoryStorage;
    use crate::types::{Product, Stock};

    /// Catalog that refuses every call; enough for paths that must not
    /// reach the network.
    struct UnreachableCatalog;

    impl CatalogService for UnreachableCatalog {
        async fn fetch_product(&self, _: ProductId) -> Result<Product, CatalogError> {
            Err(CatalogError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }

        async fn fetch_stock(&self, _: ProductId) -> Result<Stock, CatalogError> {
            Err(CatalogError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem::new(
            Product {
                id: ProductId::new(id),
                title: format!("Produto {id}"),
                price: Price::new(Decimal::new(9990, 2)),
                image: String::new(),
            },
            amount,
        )
    }

    fn store_with_storage(storage: MemoryStorage) -> CartStore<UnreachableCatalog, MemoryStorage> {
        CartStore::new(UnreachableCatalog, storage, DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_startup_restores_persisted_cart() {
        let storage = MemoryStorage::new();
        let persisted = serde_json::to_string(&vec![item(1, 2)]).unwrap();
        storage.set(DEFAULT_STORAGE_KEY, &persisted).unwrap();

        let store = store_with_storage(storage);
        assert_eq!(store.cart(), vec![item(1, 2)]);
    }

    #[test]
    fn test_startup_with_unparsable_data_starts_empty() {
        let storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "not json at all").unwrap();

        let store = store_with_storage(storage);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_startup_with_empty_storage_starts_empty() {
        let store = store_with_storage(MemoryStorage::new());
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_product_fires_notice_and_keeps_state() {
        let store = store_with_storage(MemoryStorage::new());
        let mut notices = store.notices();

        let result = store.remove_product(ProductId::new(7));

        assert!(matches!(result, Err(CartError::NotInCart(_))));
        assert!(store.cart().is_empty());
        assert_eq!(
            notices.try_recv().unwrap().kind,
            NoticeKind::RemoveFailed
        );
    }

    #[tokio::test]
    async fn test_update_nonpositive_amount_is_a_pure_noop() {
        let storage = MemoryStorage::new();
        let persisted = serde_json::to_string(&vec![item(1, 2)]).unwrap();
        storage.set(DEFAULT_STORAGE_KEY, &persisted).unwrap();

        let store = store_with_storage(storage.clone());
        let mut notices = store.notices();

        for amount in [0, -3] {
            let result = store
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId::new(1),
                    amount,
                })
                .await;
            assert!(result.is_ok());
        }

        assert_eq!(store.cart(), vec![item(1, 2)]);
        assert!(notices.try_recv().is_err());
        // The persisted payload was not rewritten either.
        assert_eq!(
            storage.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(persisted.as_str())
        );
    }

    #[tokio::test]
    async fn test_add_with_unreachable_catalog_fires_add_failed() {
        let store = store_with_storage(MemoryStorage::new());
        let mut notices = store.notices();

        let result = store.add_product(ProductId::new(1)).await;

        assert!(matches!(result, Err(CartError::Catalog(_))));
        assert!(store.cart().is_empty());
        assert_eq!(notices.try_recv().unwrap().kind, NoticeKind::AddFailed);
    }

    #[tokio::test]
    async fn test_update_checks_presence_before_stock() {
        // The catalog is unreachable, so reaching the stock check would
        // surface a catalog error rather than NotInCart.
        let store = store_with_storage(MemoryStorage::new());

        let result = store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 2,
            })
            .await;

        assert!(matches!(result, Err(CartError::NotInCart(_))));
    }
}
