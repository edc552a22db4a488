//! # Superpages Architecture
//!
//! Superpages stores hierarchical "flat pages" addressed by slash-delimited
//! paths and keeps an immutable snapshot of every save. It is a library that
//! happens to ship a small CLI; a page renderer, a search indexer or an
//! editing UI can sit on the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, applies configuration         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Create, edit, retire, list, resolve, history, index      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PageStore: slug/path derivation and the write unit       │
//! │  - SnapshotStore: append-only ledger                        │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Save Contract
//!
//! Every successful [`store::DataStore::save_page`] writes the page and
//! exactly one new [`model::Snapshot`] of it. Slugs are derived from titles
//! when empty; paths are derived once from the parent's path and then never
//! change.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Page store, snapshot ledger and backends
//! - [`model`]: Core data types (`Page`, `Snapshot`, `ContentFormat`) and derivations
//! - [`config`]: Configuration management
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
