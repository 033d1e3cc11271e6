//! Trellis: a retained-mode widget tree core.
//!
//! Trellis provides the structural machinery a GUI toolkit is built on: an
//! arena-based widget tree with explicit ownership, a two-phase layout
//! protocol, event dispatch with a negotiated focus model, and dirty-flag
//! scheduling so layout and drawing cost follows what actually changed.
//! It deliberately stops short of rendering: backends implement
//! [`render::Canvas`] and drive the tree from their own loop.
//!
//! # Quick start
//!
//! The main entry points are:
//! - [`Tree`] - the arena, scheduler and dispatcher
//! - [`Widget`] - the trait implemented by all widgets
//! - [`Context`] - tree access from inside widget hooks
//!
//! A minimal application builds a [`Tree`] around a root widget, inserts
//! children with [`Tree::insert`], and then alternates
//! [`Tree::dispatch_event`], [`Tree::update`] and [`Tree::draw`] from its
//! event loop.

mod attr;
mod context;
mod error;
mod focus;
mod id;
mod node;
mod task;
mod tree;

pub mod dump;
pub mod event;
pub mod layout;
pub mod log;
pub mod render;
pub mod resource;
pub mod state;
pub mod widget;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use attr::Attr;
pub use context::Context;
pub use error::{Error, ParseError, Result};
pub use focus::FocusSource;
pub use id::WidgetId;
pub use task::TaskSender;
pub use tree::{OwnedWidget, Tree, Walk};
pub use widget::{EventOutcome, Widget};
