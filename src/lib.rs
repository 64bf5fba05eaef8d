//! GTK 3 / GTK 4 compatibility facade for hosting a webview in a native
//! window.
//!
//! Embedding code is written once against [`ToolkitCompat`] and compiled
//! against whichever GTK generation the `gtk3` or `gtk4` feature links
//! ([`ActiveToolkit`]). Operations a generation cannot perform degrade to
//! no-ops; [`capability`] lists which ones.

pub mod appearance;
pub mod backend;
pub mod capability;
mod compat;
mod generation;
pub mod logging;
pub mod startup;

pub use compat::{Gtk3Compat, Gtk4Compat, ToolkitCompat};
pub use generation::ToolkitGeneration;

#[cfg(any(feature = "gtk3", feature = "gtk4"))]
pub use compat::ActiveToolkit;
