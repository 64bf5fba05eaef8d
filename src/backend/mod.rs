//! Native primitive seams, one trait per GTK generation.
//!
//! A generation trait only lists primitives that generation really has. GTK 4
//! has no geometry hints and no keep-above hint, so [`Gtk4Native`] has no
//! method for either and a GTK 4 facade cannot reach one by mistake.

pub mod headless;

#[cfg(feature = "gtk3")]
mod gtk3_sys;
#[cfg(feature = "gtk3")]
pub use gtk3_sys::{glib, Gtk3Sys};

#[cfg(feature = "gtk4")]
mod gtk4_sys;
#[cfg(feature = "gtk4")]
pub use gtk4_sys::{glib, Gtk4Sys};

/// GTK 3 window type passed to the window constructor. The facade only
/// creates toplevels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Toplevel,
}

/// Subset of `GdkGeometry` the facade fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub max_width: i32,
    pub max_height: i32,
}

/// Subset of `GdkWindowHints` the facade sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryHint {
    MaxSize,
}

pub trait Gtk3Native {
    type Window;
    type Widget: PartialEq;
    type StyleContext;
    type CssProvider;

    /// `gtk_init_check(NULL, NULL)`.
    fn init_check_with_args() -> bool;
    fn window_new(kind: WindowKind) -> Self::Window;
    fn window_as_widget(window: &Self::Window) -> &Self::Widget;
    fn bin_child(window: &Self::Window) -> Option<Self::Widget>;
    fn container_add(window: &Self::Window, widget: &Self::Widget);
    fn container_remove(window: &Self::Window, widget: &Self::Widget);
    fn widget_show(widget: &Self::Widget);
    fn widget_hide(widget: &Self::Widget);
    fn window_resize(window: &Self::Window, width: i32, height: i32);
    fn window_set_geometry_hints(window: &Self::Window, geometry: &Geometry, hint: GeometryHint);
    fn widget_set_opacity(widget: &Self::Widget, opacity: f64);
    fn window_set_keep_above(window: &Self::Window, setting: bool);
    fn widget_style_context(widget: &Self::Widget) -> Self::StyleContext;
    fn style_context_add_class(context: &Self::StyleContext, class_name: &str);
    fn style_context_remove_class(context: &Self::StyleContext, class_name: &str);
    fn style_context_add_provider(
        context: &Self::StyleContext,
        provider: &Self::CssProvider,
        priority: u32,
    );
    fn css_provider_new() -> Self::CssProvider;
    /// Loads `data` with no error sink: parse errors are dropped.
    fn css_provider_load_from_data(provider: &Self::CssProvider, data: &[u8]);
}

pub trait Gtk4Native {
    type Window;
    type Widget: PartialEq;
    type StyleContext;
    type CssProvider;

    fn init_check() -> bool;
    fn window_new() -> Self::Window;
    fn window_as_widget(window: &Self::Window) -> &Self::Widget;
    fn window_child(window: &Self::Window) -> Option<Self::Widget>;
    fn window_set_child(window: &Self::Window, widget: Option<&Self::Widget>);
    fn widget_set_visible(widget: &Self::Widget, visible: bool);
    fn window_set_default_size(window: &Self::Window, width: i32, height: i32);
    fn widget_set_opacity(widget: &Self::Widget, opacity: f64);
    fn widget_add_css_class(widget: &Self::Widget, class_name: &str);
    fn widget_remove_css_class(widget: &Self::Widget, class_name: &str);
    /// Deprecated natively since GTK 4.10; implementations silence the warning.
    fn widget_style_context(widget: &Self::Widget) -> Self::StyleContext;
    /// Deprecated natively since GTK 4.10; implementations silence the warning.
    fn style_context_add_provider(
        context: &Self::StyleContext,
        provider: &Self::CssProvider,
        priority: u32,
    );
    fn css_provider_new() -> Self::CssProvider;
    fn css_provider_load_from_string(provider: &Self::CssProvider, data: &str);
}
