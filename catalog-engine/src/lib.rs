//! Fiesta Catalog Engine - reactive state aggregation and fetch caching
//!
//! # 架构概述
//!
//! The engine is the single source of truth behind the category/item
//! selection screens:
//!
//! - **Store** (`store`): owns categories, items-by-category, selection
//!   state, and the derived aggregates; serializes every mutation and
//!   broadcasts state-change events
//! - **Fetch cache** (`store::fetch_cache`): at-most-one item fetch per
//!   category, concurrent callers attach to the pending outcome
//! - **Controllers** (`controllers`): one worker per screen translating
//!   intents into store calls and projecting store state into view state
//! - **Client** (`client`): the remote catalog collaborator (HTTP)
//!
//! # 模块结构
//!
//! ```text
//! catalog-engine/src/
//! ├── core/          # 配置
//! ├── common/        # 日志
//! ├── client/        # Catalog HTTP client
//! ├── store/         # CatalogStore + fetch cache + aggregates
//! └── controllers/   # Screen controllers (MVI)
//! ```

pub mod client;
pub mod common;
pub mod controllers;
pub mod core;
pub mod store;

// Re-export 公共类型
pub use client::{CatalogApi, HttpCatalogClient};
pub use controllers::{
    CategoriesController, CategoriesIntent, CategoriesViewState, ItemsController, ItemsIntent,
    ItemsViewState, SideEffect, SummaryController, SummaryViewState,
};
pub use crate::core::Config;
pub use store::{CatalogStore, StoreEvent};

// Re-export logger functions
pub use common::logger::{init_logger, init_logger_with_file};
