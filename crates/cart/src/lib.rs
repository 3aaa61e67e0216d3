//! RocketShoes cart store.
//!
//! Client-side shopping-cart state management: add/remove/update items,
//! persisted to local storage, with stock validation against the remote
//! catalog service before any quantity increase.
//!
//! The store is an explicit object rather than framework-bound shared
//! state: UI layers read snapshots via [`CartStore::cart`], observe changes
//! through [`CartStore::subscribe`], and receive user-facing notices
//! through [`CartStore::notices`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::catalog::HttpCatalog;
//! use rocketshoes_cart::config::CartConfig;
//! use rocketshoes_cart::storage::FileStorage;
//! use rocketshoes_cart::store::CartStore;
//! use rocketshoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = HttpCatalog::new(&config.catalog);
//! let storage = FileStorage::new(&config.storage_path);
//! let store = CartStore::new(catalog, storage, &config.storage_key);
//!
//! store.add_product(ProductId::new(1)).await?;
//! let cart = store.cart();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod notify;
pub mod storage;
pub mod store;
pub mod types;

pub use catalog::{CatalogError, CatalogService, HttpCatalog};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use notify::{Notice, NoticeKind, NoticeMessages};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartError, CartStore};
pub use types::{CartItem, Product, Stock, UpdateProductAmount};
