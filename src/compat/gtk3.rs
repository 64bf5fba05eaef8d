use std::marker::PhantomData;

use super::ToolkitCompat;
use crate::backend::{Geometry, GeometryHint, Gtk3Native, WindowKind};
use crate::ToolkitGeneration;

/// GTK 3 strategy over the native primitives `N`.
pub struct Gtk3Compat<N>(PhantomData<N>);

impl<N: Gtk3Native> ToolkitCompat for Gtk3Compat<N> {
    const GENERATION: ToolkitGeneration = ToolkitGeneration::Gtk3;

    type Window = N::Window;
    type Widget = N::Widget;
    type StyleProvider = N::CssProvider;

    fn initialize() -> bool {
        N::init_check_with_args()
    }

    fn create_window() -> N::Window {
        N::window_new(WindowKind::Toplevel)
    }

    fn window_widget(window: &N::Window) -> &N::Widget {
        N::window_as_widget(window)
    }

    fn set_window_child(window: &N::Window, widget: Option<&N::Widget>) {
        match widget {
            Some(widget) => N::container_add(window, widget),
            None => {
                if let Some(current) = N::bin_child(window) {
                    N::container_remove(window, &current);
                }
            }
        }
    }

    fn remove_window_child(window: &N::Window, widget: &N::Widget) {
        N::container_remove(window, widget);
    }

    fn set_widget_visible(widget: &N::Widget, visible: bool) {
        if visible {
            N::widget_show(widget);
        } else {
            N::widget_hide(widget);
        }
    }

    fn set_window_size(window: &N::Window, width: i32, height: i32) {
        N::window_resize(window, width, height);
    }

    fn set_window_max_size(window: &N::Window, width: i32, height: i32) {
        let geometry = Geometry {
            max_width: width,
            max_height: height,
        };
        N::window_set_geometry_hints(window, &geometry, GeometryHint::MaxSize);
    }

    fn set_widget_opacity(widget: &N::Widget, opacity: f64) {
        N::widget_set_opacity(widget, opacity);
    }

    fn set_window_keep_above(window: &N::Window, enabled: bool) {
        N::window_set_keep_above(window, enabled);
    }

    fn add_style_class(widget: &N::Widget, class_name: &str) {
        let context = N::widget_style_context(widget);
        N::style_context_add_class(&context, class_name);
    }

    fn remove_style_class(widget: &N::Widget, class_name: &str) {
        let context = N::widget_style_context(widget);
        N::style_context_remove_class(&context, class_name);
    }

    fn create_style_provider() -> N::CssProvider {
        N::css_provider_new()
    }

    fn load_style_rules(provider: &N::CssProvider, text: &str, length: Option<usize>) {
        let length = length.map_or(text.len(), |length| length.min(text.len()));
        N::css_provider_load_from_data(provider, &text.as_bytes()[..length]);
    }

    fn attach_style_provider(widget: &N::Widget, provider: &N::CssProvider, priority: u32) {
        let context = N::widget_style_context(widget);
        N::style_context_add_provider(&context, provider, priority);
    }
}
