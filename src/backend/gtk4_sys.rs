use gtk4::prelude::*;
use gtk4::{CssProvider, StyleContext, Widget, Window};

use super::Gtk4Native;

pub use gtk4::glib;

/// GTK 4 primitives through gtk4-rs.
pub struct Gtk4Sys;

impl Gtk4Native for Gtk4Sys {
    type Window = Window;
    type Widget = Widget;
    type StyleContext = StyleContext;
    type CssProvider = CssProvider;

    fn init_check() -> bool {
        gtk4::init().is_ok()
    }

    fn window_new() -> Window {
        Window::new()
    }

    fn window_as_widget(window: &Window) -> &Widget {
        window.upcast_ref::<Widget>()
    }

    fn window_child(window: &Window) -> Option<Widget> {
        window.child()
    }

    fn window_set_child(window: &Window, widget: Option<&Widget>) {
        window.set_child(widget);
    }

    fn widget_set_visible(widget: &Widget, visible: bool) {
        widget.set_visible(visible);
    }

    fn window_set_default_size(window: &Window, width: i32, height: i32) {
        window.set_default_size(width, height);
    }

    fn widget_set_opacity(widget: &Widget, opacity: f64) {
        widget.set_opacity(opacity);
    }

    fn widget_add_css_class(widget: &Widget, class_name: &str) {
        widget.add_css_class(class_name);
    }

    fn widget_remove_css_class(widget: &Widget, class_name: &str) {
        widget.remove_css_class(class_name);
    }

    // GTK 4 keeps per-widget providers only on the deprecated style context.
    #[allow(deprecated)]
    fn widget_style_context(widget: &Widget) -> StyleContext {
        widget.style_context()
    }

    #[allow(deprecated)]
    fn style_context_add_provider(context: &StyleContext, provider: &CssProvider, priority: u32) {
        context.add_provider(provider, priority);
    }

    fn css_provider_new() -> CssProvider {
        CssProvider::new()
    }

    fn css_provider_load_from_string(provider: &CssProvider, data: &str) {
        provider.load_from_string(data);
    }
}
