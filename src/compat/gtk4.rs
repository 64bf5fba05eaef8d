use std::marker::PhantomData;

use super::ToolkitCompat;
use crate::backend::Gtk4Native;
use crate::capability::{is_absent, Operation};
use crate::ToolkitGeneration;

const _: () = assert!(is_absent(ToolkitGeneration::Gtk4, Operation::SetWindowMaxSize));
const _: () = assert!(is_absent(ToolkitGeneration::Gtk4, Operation::SetWindowKeepAbove));

/// GTK 4 strategy over the native primitives `N`.
pub struct Gtk4Compat<N>(PhantomData<N>);

impl<N: Gtk4Native> ToolkitCompat for Gtk4Compat<N> {
    const GENERATION: ToolkitGeneration = ToolkitGeneration::Gtk4;

    type Window = N::Window;
    type Widget = N::Widget;
    type StyleProvider = N::CssProvider;

    fn initialize() -> bool {
        N::init_check()
    }

    fn create_window() -> N::Window {
        N::window_new()
    }

    fn window_widget(window: &N::Window) -> &N::Widget {
        N::window_as_widget(window)
    }

    fn set_window_child(window: &N::Window, widget: Option<&N::Widget>) {
        N::window_set_child(window, widget);
    }

    fn remove_window_child(window: &N::Window, widget: &N::Widget) {
        if N::window_child(window).as_ref() == Some(widget) {
            N::window_set_child(window, None);
        }
    }

    fn set_widget_visible(widget: &N::Widget, visible: bool) {
        N::widget_set_visible(widget, visible);
    }

    // GTK 4 cannot resize a window once it is set up; only the default size
    // is available.
    fn set_window_size(window: &N::Window, width: i32, height: i32) {
        N::window_set_default_size(window, width, height);
    }

    // No geometry hints in GTK 4.
    fn set_window_max_size(_window: &N::Window, _width: i32, _height: i32) {}

    fn set_widget_opacity(widget: &N::Widget, opacity: f64) {
        N::widget_set_opacity(widget, opacity);
    }

    // Keep-above is a window manager hint GTK 4 does not expose.
    fn set_window_keep_above(_window: &N::Window, _enabled: bool) {}

    fn add_style_class(widget: &N::Widget, class_name: &str) {
        N::widget_add_css_class(widget, class_name);
    }

    fn remove_style_class(widget: &N::Widget, class_name: &str) {
        N::widget_remove_css_class(widget, class_name);
    }

    fn create_style_provider() -> N::CssProvider {
        N::css_provider_new()
    }

    fn load_style_rules(provider: &N::CssProvider, text: &str, _length: Option<usize>) {
        N::css_provider_load_from_string(provider, text);
    }

    fn attach_style_provider(widget: &N::Widget, provider: &N::CssProvider, priority: u32) {
        let context = N::widget_style_context(widget);
        N::style_context_add_provider(&context, provider, priority);
    }
}
