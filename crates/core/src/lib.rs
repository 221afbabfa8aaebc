//! Core library for toolshelf
//!
//! This crate implements the **Functional Core** of the toolshelf application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The toolshelf project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`toolshelf_core`** (this crate): the catalogue model, the query pipeline,
//!   pagination arithmetic and the persisted user state (bookmarks, theme)
//! - **`toolshelf`**: the terminal front-end, which owns a browsing [`session::Session`]
//!   and renders whatever the core hands back
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: [`query::apply`], [`pagination`] and [`stats::summarize`]
//!   always produce the same output for the same input
//! - **No rendering**: the core returns plain data (ordered records, booleans, counts)
//! - **One I/O seam**: persisted state goes through the [`storage::KeyValueStore`]
//!   trait, so tests run against [`storage::MemoryStore`] without touching disk
//!
//! # Module Organization
//!
//! - [`catalogue`]: Tool records and the load-once catalogue
//! - [`query`]: Search, category filter and sort
//! - [`pagination`]: "Load more" cursor arithmetic
//! - [`bookmarks`]: Write-through bookmark set
//! - [`theme`]: Persisted light/dark preference
//! - [`stats`]: Catalogue summary counts
//! - [`session`]: Explicit browsing state owned by the front-end
//! - [`storage`]: String-keyed persistence backends
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use toolshelf_core::catalogue::Catalogue;
//! use toolshelf_core::session::Session;
//!
//! let catalogue = Catalogue::from_json(include_str!("tools.json"))?;
//! let mut session = Session::new();
//!
//! session.on_search_change("web");
//! session.on_sort_change("name");
//!
//! let view = session.view(catalogue.tools());
//! assert!(view.items.len() <= 6);
//! ```

pub mod bookmarks;
pub mod catalogue;
pub mod pagination;
pub mod query;
pub mod session;
pub mod stats;
pub mod storage;
pub mod theme;
