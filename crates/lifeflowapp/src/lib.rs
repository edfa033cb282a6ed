//! # Lifeflow Architecture
//!
//! Lifeflow is a **UI-agnostic note-taking library** built around pages of
//! editable blocks. This is not a CLI application that happens to have
//! some library code—it's a library that happens to have a CLI client.
//!
//! This distinction drives the entire architecture and should guide all
//! development.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (the lifeflow binary crate)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (index strings → selectors → page ids) │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract PageStore trait                                 │
//! │  - LocalStore and RestStore (production),                   │
//! │    InMemoryStore (testing)                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Block Model
//!
//! A page's content is an ordered list of typed blocks (text, headings,
//! bullets, todos, quotes, images). The pure functions in [`editor`]
//! implement every edit as page-in, page-out transformations that keep
//! the block list non-empty and block ids stable. See `editor.rs`.
//!
//! ## The Index System
//!
//! To stay ergonomic, lifeflow maps user friendly display indexes (used
//! throughout the CLI) to the stable UUIDs at the data store level. See
//! `index.rs` for more information.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a REST API, a browser app, or any
//! other UI.
//!
//! ## Testing Strategy
//!
//! 1. **Editor and commands**: Thorough unit tests of the business logic
//!    on `InMemoryStore`. This is where the lion's share of testing lives.
//! 2. **API** (`api.rs`): Tests verifying correct dispatch and input
//!    normalization—not the logic itself.
//! 3. **CLI**: Tests argument parsing and output formatting in the binary
//!    crate.
//!
//! ## Development Workflow
//!
//! When implementing features, work **inside-out**:
//!
//! 1. **Logic**: Implement and fully test in `editor.rs` or
//!    `commands/<cmd>.rs`
//! 2. **API**: Add facade method in `api.rs`, test dispatch
//! 3. **CLI**: Add handler in the binary crate, test arg parsing and
//!    output
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`editor`]: Pure block-list editing operations
//! - [`store`]: Storage abstraction and implementations
//! - [`feed`]: The discover feed and its backends
//! - [`model`]: Core data types (`Page`, `Block`, `BlockKind`)
//! - [`index`]: Display indexing system (f1, 1, t1 notation)
//! - [`config`]: Configuration management
//! - [`ids`]: Page and block id generation
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod feed;
pub mod ids;
pub mod index;
pub mod model;
pub mod store;
