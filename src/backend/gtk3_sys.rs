use gtk::prelude::*;
use gtk::{gdk, CssProvider, StyleContext, Widget, Window, WindowType};

use super::{Geometry, GeometryHint, Gtk3Native, WindowKind};

pub use gtk::glib;

/// GTK 3 primitives through gtk-rs.
pub struct Gtk3Sys;

impl Gtk3Native for Gtk3Sys {
    type Window = Window;
    type Widget = Widget;
    type StyleContext = StyleContext;
    type CssProvider = CssProvider;

    fn init_check_with_args() -> bool {
        gtk::init().is_ok()
    }

    fn window_new(kind: WindowKind) -> Window {
        let window_type = match kind {
            WindowKind::Toplevel => WindowType::Toplevel,
        };
        Window::new(window_type)
    }

    fn window_as_widget(window: &Window) -> &Widget {
        window.upcast_ref::<Widget>()
    }

    fn bin_child(window: &Window) -> Option<Widget> {
        window.child()
    }

    fn container_add(window: &Window, widget: &Widget) {
        window.add(widget);
    }

    fn container_remove(window: &Window, widget: &Widget) {
        window.remove(widget);
    }

    fn widget_show(widget: &Widget) {
        widget.show();
    }

    fn widget_hide(widget: &Widget) {
        widget.hide();
    }

    fn window_resize(window: &Window, width: i32, height: i32) {
        window.resize(width, height);
    }

    fn window_set_geometry_hints(window: &Window, geometry: &Geometry, hint: GeometryHint) {
        let mask = match hint {
            GeometryHint::MaxSize => gdk::WindowHints::MAX_SIZE,
        };
        // Only the fields named by `mask` are read by GDK.
        let native = gdk::Geometry::new(
            0,
            0,
            geometry.max_width,
            geometry.max_height,
            0,
            0,
            0,
            0,
            0.0,
            0.0,
            gdk::Gravity::NorthWest,
        );
        window.set_geometry_hints(None::<&Widget>, Some(&native), mask);
    }

    fn widget_set_opacity(widget: &Widget, opacity: f64) {
        widget.set_opacity(opacity);
    }

    fn window_set_keep_above(window: &Window, setting: bool) {
        window.set_keep_above(setting);
    }

    fn widget_style_context(widget: &Widget) -> StyleContext {
        widget.style_context()
    }

    fn style_context_add_class(context: &StyleContext, class_name: &str) {
        context.add_class(class_name);
    }

    fn style_context_remove_class(context: &StyleContext, class_name: &str) {
        context.remove_class(class_name);
    }

    fn style_context_add_provider(context: &StyleContext, provider: &CssProvider, priority: u32) {
        context.add_provider(provider, priority);
    }

    fn css_provider_new() -> CssProvider {
        CssProvider::new()
    }

    fn css_provider_load_from_data(provider: &CssProvider, data: &[u8]) {
        let _ = provider.load_from_data(data);
    }
}
