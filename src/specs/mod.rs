// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific scraping specifications** for the
//! stenoprotocol archive. Each spec focuses on one kind of page and encodes
//! *where the ground truth lives in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Archive index** (`archive`): term index → session links.
//! - **Session index + day pages** (`session`): topics and their ordered
//!   intervention references, with the session day from the page title.
//! - **Steno pages** (`steno`): `<p align="justify">` blocks segmented into
//!   per-speaker turns.
//! - **Biographies** (`speaker`): member and government layouts, name
//!   decomposition, sex inference.
//!
//! ## What does **not** live here
//! - **Caching** – every fetch goes through `store::PageCache`.
//! - **Joining and output** – `report` joins the pieces, `runner` writes them.
//! - **Patterns** – regexes and keyword lists live in `config::dialect`.
//!
//! ## Typical call chain
//! ```text
//! runner → specs::archive::list_sessions
//!        → specs::session::resolve_session   (index + day pages)
//!        → specs::steno::fetch_page          (once per steno page)
//!        → specs::speaker::resolve_pending   (once per new speaker key)
//!        → report::assemble → file / csv
//! ```
//!
//! ## Conventions & invariants
//! - Specs parse through `core::html::Node`, never the raw tree.
//! - A broken link or page is logged and skipped; only disk errors propagate.
//! - Encounter order is preserved everywhere (`IndexMap`, `Vec`).
//!
//! In short: **`specs` knows how to read the pages.** Other layers decide when
//! to crawl, how to cache, and what to write.
pub mod archive;
pub mod session;
pub mod speaker;
pub mod steno;
