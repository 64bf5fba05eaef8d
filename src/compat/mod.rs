//! Generation-agnostic window and widget vocabulary.
//!
//! [`ToolkitCompat`] is the only surface embedding code calls. Each GTK
//! generation gets one strategy type implementing it over that generation's
//! native primitives; the build links exactly one, exported as
//! [`ActiveToolkit`]. The facade holds no state and never keeps a handle:
//! every operation borrows the caller's handles, performs one native call
//! sequence and returns.
//!
//! Must be called from the thread that ran [`ToolkitCompat::initialize`].

mod gtk3;
mod gtk4;

pub use self::gtk3::Gtk3Compat;
pub use self::gtk4::Gtk4Compat;

use crate::ToolkitGeneration;

pub trait ToolkitCompat {
    const GENERATION: ToolkitGeneration;

    type Window;
    type Widget: PartialEq;
    type StyleProvider;

    /// One-time toolkit bootstrap. `false` is fatal for the caller: there is
    /// no partially initialized state.
    fn initialize() -> bool;

    /// New, unshown toplevel window owned by the caller.
    fn create_window() -> Self::Window;

    /// Borrows a window as a widget for the widget operations.
    fn window_widget(window: &Self::Window) -> &Self::Widget;

    /// Makes `widget` the window's only child, or clears the child for `None`.
    ///
    /// Any previous child must already be detached. A window never holds more
    /// than one child; on GTK 3 adding a second one is rejected by the toolkit.
    fn set_window_child(window: &Self::Window, widget: Option<&Self::Widget>);

    /// Detaches `widget` if it is the window's current child.
    ///
    /// On GTK 4 a widget that is not the child is ignored. On GTK 3 the removal
    /// is unconditional and passing anything but the current child is
    /// undefined; callers must not do it.
    fn remove_window_child(window: &Self::Window, widget: &Self::Widget);

    fn set_widget_visible(widget: &Self::Widget, visible: bool);

    /// On GTK 4 this only sets the default size, which has no effect once the
    /// window has been shown. Do not rely on resizing a shown window there.
    fn set_window_size(window: &Self::Window, width: i32, height: i32);

    /// No-op on GTK 4.
    fn set_window_max_size(window: &Self::Window, width: i32, height: i32);

    fn set_widget_opacity(widget: &Self::Widget, opacity: f64);

    /// No-op on GTK 4.
    fn set_window_keep_above(window: &Self::Window, enabled: bool);

    fn add_style_class(widget: &Self::Widget, class_name: &str);

    fn remove_style_class(widget: &Self::Widget, class_name: &str);

    /// New, empty style provider owned by the caller.
    fn create_style_provider() -> Self::StyleProvider;

    /// Parses `text` as CSS into `provider`, replacing earlier rules.
    ///
    /// `length` limits the bytes read on GTK 3 (`None` reads the whole text,
    /// longer lengths are clamped to it). GTK 4 always reads the whole text.
    /// Parse errors are not reported.
    fn load_style_rules(provider: &Self::StyleProvider, text: &str, length: Option<usize>);

    fn attach_style_provider(widget: &Self::Widget, provider: &Self::StyleProvider, priority: u32);
}

#[cfg(feature = "gtk3")]
pub type ActiveToolkit = Gtk3Compat<crate::backend::Gtk3Sys>;

#[cfg(feature = "gtk4")]
pub type ActiveToolkit = Gtk4Compat<crate::backend::Gtk4Sys>;
