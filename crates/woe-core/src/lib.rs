#![warn(missing_docs)]
//! Woe Core - headless core of a small modal (vi-like) terminal text editor
//!
//! # Overview
//!
//! `woe-core` holds a document as an in-memory list of byte rows, tracks a UTF-8-aware cursor,
//! interprets keystrokes through a modal dispatcher and assembles render-ready frames. It never
//! touches the terminal: the host reads keys, feeds them to [`Editor::process_key`], and paints
//! the [`Frame`] returned by [`Editor::render_frame`].
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Modal Dispatcher (Normal/Insert/Command/N) │  ← dispatch, mode, key, prompt
//! ├─────────────────────────────────────────────┤
//! │  Render Assembler + Viewport                │  ← render, viewport
//! ├─────────────────────────────────────────────┤
//! │  Edit Operations                            │  ← editor
//! ├─────────────────────────────────────────────┤
//! │  Cursor Model (UTF-8 boundaries)            │  ← cursor, utf8
//! ├─────────────────────────────────────────────┤
//! │  Row Store + Render Cache                   │  ← rows, row
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Search and storage are capabilities ([`Searcher`], [`DocumentStore`]) owned by the editor
//! as boxed trait objects, so hosts and tests can swap them.
//!
//! # Quick Start
//!
//! ```rust
//! use woe_core::{Cursor, Editor, Key, Mode, Outcome};
//!
//! let mut editor = Editor::default();
//! editor.load_lines(["hello", "world"]);
//!
//! editor.process_key(Key::Char('A'));
//! assert_eq!(editor.mode(), Mode::Insert);
//! editor.process_key(Key::Enter);
//! assert_eq!(editor.cursor(), Cursor::new(0, 1));
//! assert_eq!(editor.rows().len(), 3);
//!
//! editor.process_key(Key::Escape);
//! editor.process_key(Key::Char(' '));
//! assert_eq!(editor.process_key(Key::Char('Q')), Outcome::Quit);
//!
//! let frame = editor.render_frame();
//! assert!(frame.status_bar.starts_with("[No Name] - 3 lines (modified)"));
//! ```
//!
//! # Module Description
//!
//! - [`utf8`] - lead/continuation byte arithmetic
//! - [`row`] - a single row and its tab-expanded render cache
//! - [`rows`] - the row store and change counter
//! - [`cursor`] - boundary-safe cursor motion
//! - [`viewport`] - scroll offsets
//! - [`editor`] - the editor instance and edit operations
//! - [`dispatch`] - modal key handling
//! - [`render`] - frame assembly
//! - [`search`] - line search and match navigation
//! - [`storage`] - document load/save
//! - [`config`] - tunables loaded from TOML

pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod key;
pub mod mode;
pub mod prompt;
pub mod render;
pub mod row;
pub mod rows;
pub mod search;
pub mod storage;
pub mod utf8;
pub mod viewport;

pub use config::EditorConfig;
pub use cursor::{Cursor, convert_cx_to_rx};
pub use dispatch::Outcome;
pub use editor::{Editor, StatusMessage};
pub use error::{ConfigError, SearchError, StorageError};
pub use key::Key;
pub use mode::Mode;
pub use prompt::{Prompt, PromptEvent, PromptKind};
pub use render::Frame;
pub use row::{DEFAULT_TAB_WIDTH, Row};
pub use rows::RowStore;
pub use search::{RegexSearcher, SearchMatch, SearchOptions, SearchState, Searcher};
pub use storage::{DocumentStore, FileStore};
pub use viewport::Viewport;
