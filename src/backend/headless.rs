//! Display-less GTK model.
//!
//! [`HeadlessGtk3`] and [`HeadlessGtk4`] implement the native traits over
//! plain reference-counted handles and reproduce what an embedding
//! application can observe from each generation: single-child windows,
//! GTK 4 sizing that only takes effect before the first show, geometry and
//! keep-above hints, style classes and providers. Toolkit state is
//! thread-local, like GTK's own main-thread affinity, and every primitive
//! appends its native name to a per-thread journal.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use super::{Geometry, GeometryHint, Gtk3Native, Gtk4Native, WindowKind};

/// Size a window reports before anything sized it.
pub const DEFAULT_WINDOW_SIZE: (i32, i32) = (200, 200);

#[derive(Default)]
struct ToolkitState {
    initialized: bool,
    fail_next_init: bool,
    journal: Vec<&'static str>,
    criticals: Vec<String>,
}

thread_local! {
    static TOOLKIT: RefCell<ToolkitState> = RefCell::new(ToolkitState::default());
}

fn record(primitive: &'static str) {
    TOOLKIT.with(|toolkit| toolkit.borrow_mut().journal.push(primitive));
}

fn critical(message: String) {
    TOOLKIT.with(|toolkit| toolkit.borrow_mut().criticals.push(message));
}

fn require_initialized(primitive: &'static str) {
    if !is_initialized() {
        critical(format!("{primitive}: GTK has not been initialized"));
    }
}

fn init_check(primitive: &'static str) -> bool {
    record(primitive);
    TOOLKIT.with(|toolkit| {
        let mut toolkit = toolkit.borrow_mut();
        if toolkit.fail_next_init {
            toolkit.fail_next_init = false;
            return false;
        }
        toolkit.initialized = true;
        true
    })
}

/// Makes the next init check on this thread fail, as when no display is
/// reachable.
pub fn fail_next_init() {
    TOOLKIT.with(|toolkit| toolkit.borrow_mut().fail_next_init = true);
}

pub fn is_initialized() -> bool {
    TOOLKIT.with(|toolkit| toolkit.borrow().initialized)
}

/// Drains the native primitives called on this thread, oldest first.
pub fn take_journal() -> Vec<&'static str> {
    TOOLKIT.with(|toolkit| std::mem::take(&mut toolkit.borrow_mut().journal))
}

/// Drains the messages real GTK would have printed as criticals.
pub fn take_criticals() -> Vec<String> {
    TOOLKIT.with(|toolkit| std::mem::take(&mut toolkit.borrow_mut().criticals))
}

/// Forgets initialization, the journal and recorded criticals.
pub fn reset() {
    TOOLKIT.with(|toolkit| *toolkit.borrow_mut() = ToolkitState::default());
}

struct WidgetInner {
    name: String,
    visible: Cell<bool>,
    shown_once: Cell<bool>,
    opacity: Cell<f64>,
    classes: RefCell<Vec<String>>,
    providers: RefCell<Vec<(HeadlessCssProvider, u32)>>,
}

#[derive(Clone)]
pub struct HeadlessWidget {
    inner: Rc<WidgetInner>,
}

impl HeadlessWidget {
    pub fn new(name: &str) -> Self {
        Self {
            inner: Rc::new(WidgetInner {
                name: name.to_string(),
                visible: Cell::new(false),
                shown_once: Cell::new(false),
                opacity: Cell::new(1.0),
                classes: RefCell::new(Vec::new()),
                providers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_visible(&self) -> bool {
        self.inner.visible.get()
    }

    pub fn has_been_shown(&self) -> bool {
        self.inner.shown_once.get()
    }

    pub fn opacity(&self) -> f64 {
        self.inner.opacity.get()
    }

    pub fn style_classes(&self) -> Vec<String> {
        self.inner.classes.borrow().clone()
    }

    pub fn has_style_class(&self, class_name: &str) -> bool {
        self.inner
            .classes
            .borrow()
            .iter()
            .any(|existing| existing == class_name)
    }

    /// Providers attached to this widget with their priorities, in attach order.
    pub fn providers(&self) -> Vec<(HeadlessCssProvider, u32)> {
        self.inner.providers.borrow().clone()
    }

    fn set_visible(&self, visible: bool) {
        self.inner.visible.set(visible);
        if visible {
            self.inner.shown_once.set(true);
        }
    }

    fn set_opacity(&self, opacity: f64) {
        self.inner.opacity.set(opacity.clamp(0.0, 1.0));
    }

    fn add_class(&self, class_name: &str) {
        let mut classes = self.inner.classes.borrow_mut();
        if !classes.iter().any(|existing| existing == class_name) {
            classes.push(class_name.to_string());
        }
    }

    fn remove_class(&self, class_name: &str) {
        self.inner
            .classes
            .borrow_mut()
            .retain(|existing| existing != class_name);
    }

    fn add_provider(&self, provider: &HeadlessCssProvider, priority: u32) {
        let mut providers = self.inner.providers.borrow_mut();
        // Re-adding a provider only moves it to the new priority.
        providers.retain(|(existing, _)| existing != provider);
        providers.push((provider.clone(), priority));
    }
}

impl PartialEq for HeadlessWidget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for HeadlessWidget {}

impl fmt::Debug for HeadlessWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessWidget")
            .field("name", &self.inner.name)
            .field("visible", &self.inner.visible.get())
            .finish()
    }
}

#[derive(Debug)]
struct WindowState {
    kind: Option<WindowKind>,
    child: Option<HeadlessWidget>,
    size: (i32, i32),
    default_size: Option<(i32, i32)>,
    max_size_hint: Option<(i32, i32)>,
    keep_above: bool,
}

#[derive(Clone, Debug)]
pub struct HeadlessWindow {
    widget: HeadlessWidget,
    state: Rc<RefCell<WindowState>>,
}

impl HeadlessWindow {
    fn new(kind: Option<WindowKind>) -> Self {
        Self {
            widget: HeadlessWidget::new("window"),
            state: Rc::new(RefCell::new(WindowState {
                kind,
                child: None,
                size: DEFAULT_WINDOW_SIZE,
                default_size: None,
                max_size_hint: None,
                keep_above: false,
            })),
        }
    }

    pub fn widget(&self) -> &HeadlessWidget {
        &self.widget
    }

    /// GTK 3 window type; `None` for GTK 4 windows, which have no type.
    pub fn kind(&self) -> Option<WindowKind> {
        self.state.borrow().kind
    }

    pub fn child(&self) -> Option<HeadlessWidget> {
        self.state.borrow().child.clone()
    }

    pub fn size(&self) -> (i32, i32) {
        self.state.borrow().size
    }

    pub fn default_size(&self) -> Option<(i32, i32)> {
        self.state.borrow().default_size
    }

    pub fn max_size_hint(&self) -> Option<(i32, i32)> {
        self.state.borrow().max_size_hint
    }

    pub fn keep_above(&self) -> bool {
        self.state.borrow().keep_above
    }

    fn clamp_to_hint(&self, width: i32, height: i32) -> (i32, i32) {
        match self.state.borrow().max_size_hint {
            Some((max_width, max_height)) => (width.min(max_width), height.min(max_height)),
            None => (width, height),
        }
    }
}

impl PartialEq for HeadlessWindow {
    fn eq(&self, other: &Self) -> bool {
        self.widget == other.widget
    }
}

impl Eq for HeadlessWindow {}

#[derive(Default)]
struct ProviderState {
    rules: String,
    loads: usize,
}

#[derive(Clone, Default)]
pub struct HeadlessCssProvider {
    inner: Rc<RefCell<ProviderState>>,
}

impl HeadlessCssProvider {
    pub fn rule_text(&self) -> String {
        self.inner.borrow().rules.clone()
    }

    /// Number of top-level rule blocks in the loaded text. Braces inside
    /// comments and quoted strings are skipped; nested blocks such as
    /// `@media` bodies count once.
    pub fn rule_count(&self) -> usize {
        count_rule_blocks(&self.inner.borrow().rules)
    }

    pub fn has_rules(&self) -> bool {
        self.rule_count() > 0
    }

    pub fn load_count(&self) -> usize {
        self.inner.borrow().loads
    }

    fn load(&self, rules: String) {
        let mut state = self.inner.borrow_mut();
        state.rules = rules;
        state.loads += 1;
    }
}

fn count_rule_blocks(rules: &str) -> usize {
    let mut chars = rules.chars().peekable();
    let mut depth = 0usize;
    let mut blocks = 0;

    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for ch in chars.by_ref() {
                    if previous == '*' && ch == '/' {
                        break;
                    }
                    previous = ch;
                }
            }
            '"' | '\'' => {
                let quote = ch;
                while let Some(ch) = chars.next() {
                    match ch {
                        '\\' => {
                            chars.next();
                        }
                        ch if ch == quote => break,
                        _ => {}
                    }
                }
            }
            '{' => depth += 1,
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks += 1;
                }
            }
            _ => {}
        }
    }

    blocks
}

impl PartialEq for HeadlessCssProvider {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for HeadlessCssProvider {}

impl fmt::Debug for HeadlessCssProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessCssProvider")
            .field("rules", &self.inner.borrow().rules)
            .finish()
    }
}

/// Per-widget style context handle.
pub struct HeadlessStyleContext {
    widget: HeadlessWidget,
}

/// GTK 3 semantics.
pub struct HeadlessGtk3;

impl Gtk3Native for HeadlessGtk3 {
    type Window = HeadlessWindow;
    type Widget = HeadlessWidget;
    type StyleContext = HeadlessStyleContext;
    type CssProvider = HeadlessCssProvider;

    fn init_check_with_args() -> bool {
        init_check("gtk_init_check")
    }

    fn window_new(kind: WindowKind) -> HeadlessWindow {
        record("gtk_window_new");
        require_initialized("gtk_window_new");
        HeadlessWindow::new(Some(kind))
    }

    fn window_as_widget(window: &HeadlessWindow) -> &HeadlessWidget {
        &window.widget
    }

    fn bin_child(window: &HeadlessWindow) -> Option<HeadlessWidget> {
        record("gtk_bin_get_child");
        window.child()
    }

    fn container_add(window: &HeadlessWindow, widget: &HeadlessWidget) {
        record("gtk_container_add");
        let mut state = window.state.borrow_mut();
        if state.child.is_some() {
            critical(format!(
                "Attempting to add a widget '{}' to a GtkWindow, but as a GtkBin subclass a GtkWindow can only contain one widget at a time",
                widget.name()
            ));
            return;
        }
        state.child = Some(widget.clone());
    }

    fn container_remove(window: &HeadlessWindow, widget: &HeadlessWidget) {
        record("gtk_container_remove");
        let mut state = window.state.borrow_mut();
        if state.child.as_ref() != Some(widget) {
            critical(format!(
                "gtk_bin_remove: assertion 'priv->child == child' failed for '{}'",
                widget.name()
            ));
            return;
        }
        state.child = None;
    }

    fn widget_show(widget: &HeadlessWidget) {
        record("gtk_widget_show");
        widget.set_visible(true);
    }

    fn widget_hide(widget: &HeadlessWidget) {
        record("gtk_widget_hide");
        widget.set_visible(false);
    }

    fn window_resize(window: &HeadlessWindow, width: i32, height: i32) {
        record("gtk_window_resize");
        let size = window.clamp_to_hint(width, height);
        window.state.borrow_mut().size = size;
    }

    fn window_set_geometry_hints(window: &HeadlessWindow, geometry: &Geometry, hint: GeometryHint) {
        record("gtk_window_set_geometry_hints");
        match hint {
            GeometryHint::MaxSize => {
                window.state.borrow_mut().max_size_hint =
                    Some((geometry.max_width, geometry.max_height));
            }
        }
        let (width, height) = window.size();
        let size = window.clamp_to_hint(width, height);
        window.state.borrow_mut().size = size;
    }

    fn widget_set_opacity(widget: &HeadlessWidget, opacity: f64) {
        record("gtk_widget_set_opacity");
        widget.set_opacity(opacity);
    }

    fn window_set_keep_above(window: &HeadlessWindow, setting: bool) {
        record("gtk_window_set_keep_above");
        window.state.borrow_mut().keep_above = setting;
    }

    fn widget_style_context(widget: &HeadlessWidget) -> HeadlessStyleContext {
        record("gtk_widget_get_style_context");
        HeadlessStyleContext {
            widget: widget.clone(),
        }
    }

    fn style_context_add_class(context: &HeadlessStyleContext, class_name: &str) {
        record("gtk_style_context_add_class");
        context.widget.add_class(class_name);
    }

    fn style_context_remove_class(context: &HeadlessStyleContext, class_name: &str) {
        record("gtk_style_context_remove_class");
        context.widget.remove_class(class_name);
    }

    fn style_context_add_provider(
        context: &HeadlessStyleContext,
        provider: &HeadlessCssProvider,
        priority: u32,
    ) {
        record("gtk_style_context_add_provider");
        context.widget.add_provider(provider, priority);
    }

    fn css_provider_new() -> HeadlessCssProvider {
        record("gtk_css_provider_new");
        require_initialized("gtk_css_provider_new");
        HeadlessCssProvider::default()
    }

    fn css_provider_load_from_data(provider: &HeadlessCssProvider, data: &[u8]) {
        record("gtk_css_provider_load_from_data");
        provider.load(String::from_utf8_lossy(data).into_owned());
    }
}

/// GTK 4 semantics.
pub struct HeadlessGtk4;

impl Gtk4Native for HeadlessGtk4 {
    type Window = HeadlessWindow;
    type Widget = HeadlessWidget;
    type StyleContext = HeadlessStyleContext;
    type CssProvider = HeadlessCssProvider;

    fn init_check() -> bool {
        init_check("gtk_init_check")
    }

    fn window_new() -> HeadlessWindow {
        record("gtk_window_new");
        require_initialized("gtk_window_new");
        HeadlessWindow::new(None)
    }

    fn window_as_widget(window: &HeadlessWindow) -> &HeadlessWidget {
        &window.widget
    }

    fn window_child(window: &HeadlessWindow) -> Option<HeadlessWidget> {
        record("gtk_window_get_child");
        window.child()
    }

    fn window_set_child(window: &HeadlessWindow, widget: Option<&HeadlessWidget>) {
        record("gtk_window_set_child");
        window.state.borrow_mut().child = widget.cloned();
    }

    fn widget_set_visible(widget: &HeadlessWidget, visible: bool) {
        record("gtk_widget_set_visible");
        widget.set_visible(visible);
    }

    fn window_set_default_size(window: &HeadlessWindow, width: i32, height: i32) {
        record("gtk_window_set_default_size");
        let realized = window.widget.has_been_shown();
        let mut state = window.state.borrow_mut();
        state.default_size = Some((width, height));
        if !realized {
            state.size = (width, height);
        }
    }

    fn widget_set_opacity(widget: &HeadlessWidget, opacity: f64) {
        record("gtk_widget_set_opacity");
        widget.set_opacity(opacity);
    }

    fn widget_add_css_class(widget: &HeadlessWidget, class_name: &str) {
        record("gtk_widget_add_css_class");
        widget.add_class(class_name);
    }

    fn widget_remove_css_class(widget: &HeadlessWidget, class_name: &str) {
        record("gtk_widget_remove_css_class");
        widget.remove_class(class_name);
    }

    fn widget_style_context(widget: &HeadlessWidget) -> HeadlessStyleContext {
        record("gtk_widget_get_style_context");
        HeadlessStyleContext {
            widget: widget.clone(),
        }
    }

    fn style_context_add_provider(
        context: &HeadlessStyleContext,
        provider: &HeadlessCssProvider,
        priority: u32,
    ) {
        record("gtk_style_context_add_provider");
        context.widget.add_provider(provider, priority);
    }

    fn css_provider_new() -> HeadlessCssProvider {
        record("gtk_css_provider_new");
        require_initialized("gtk_css_provider_new");
        HeadlessCssProvider::default()
    }

    fn css_provider_load_from_string(provider: &HeadlessCssProvider, data: &str) {
        record("gtk_css_provider_load_from_string");
        provider.load(data.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_check_can_be_made_to_fail_once() {
        reset();
        fail_next_init();
        assert!(!HeadlessGtk4::init_check());
        assert!(!is_initialized());
        assert!(HeadlessGtk4::init_check());
        assert!(is_initialized());
        assert_eq!(take_journal(), vec!["gtk_init_check", "gtk_init_check"]);
    }

    #[test]
    fn window_before_init_records_a_critical() {
        reset();
        let _window = HeadlessGtk3::window_new(WindowKind::Toplevel);
        let criticals = take_criticals();
        assert_eq!(criticals.len(), 1);
        assert!(criticals[0].contains("not been initialized"));
    }

    #[test]
    fn gtk3_bin_rejects_a_second_child() {
        reset();
        HeadlessGtk3::init_check_with_args();
        let window = HeadlessGtk3::window_new(WindowKind::Toplevel);
        let first = HeadlessWidget::new("first");
        let second = HeadlessWidget::new("second");

        HeadlessGtk3::container_add(&window, &first);
        HeadlessGtk3::container_add(&window, &second);

        assert_eq!(window.child(), Some(first));
        assert_eq!(take_criticals().len(), 1);
    }

    #[test]
    fn gtk3_geometry_hint_clamps_current_and_later_sizes() {
        reset();
        HeadlessGtk3::init_check_with_args();
        let window = HeadlessGtk3::window_new(WindowKind::Toplevel);
        HeadlessGtk3::window_resize(&window, 1200, 900);
        HeadlessGtk3::window_set_geometry_hints(
            &window,
            &Geometry {
                max_width: 800,
                max_height: 600,
            },
            GeometryHint::MaxSize,
        );
        assert_eq!(window.size(), (800, 600));

        HeadlessGtk3::window_resize(&window, 1024, 480);
        assert_eq!(window.size(), (800, 480));
    }

    #[test]
    fn gtk4_default_size_only_applies_before_first_show() {
        reset();
        HeadlessGtk4::init_check();
        let window = HeadlessGtk4::window_new();
        HeadlessGtk4::window_set_default_size(&window, 640, 480);
        HeadlessGtk4::widget_set_visible(window.widget(), true);
        HeadlessGtk4::widget_set_visible(window.widget(), false);
        HeadlessGtk4::window_set_default_size(&window, 1024, 768);

        assert_eq!(window.size(), (640, 480));
        assert_eq!(window.default_size(), Some((1024, 768)));
    }

    #[test]
    fn re_adding_a_provider_moves_it_to_the_new_priority() {
        let widget = HeadlessWidget::new("view");
        let provider = HeadlessCssProvider::default();
        widget.add_provider(&provider, 600);
        widget.add_provider(&provider, 800);
        assert_eq!(widget.providers(), vec![(provider, 800)]);
    }

    #[test]
    fn provider_counts_rule_blocks() {
        let provider = HeadlessCssProvider::default();
        provider.load("window { opacity: 0.5; } label { color: red; }".to_string());
        assert_eq!(provider.rule_count(), 2);
        provider.load(String::new());
        assert!(!provider.has_rules());
        assert_eq!(provider.load_count(), 2);
    }

    #[test]
    fn rule_count_ignores_braces_in_comments_and_strings() {
        let provider = HeadlessCssProvider::default();
        provider.load(
            r#"/* } { */ window { content: "}"; } label { content: '{\'}'; }"#.to_string(),
        );
        assert_eq!(provider.rule_count(), 2);

        provider.load("/* window { opacity: 0; } */".to_string());
        assert!(!provider.has_rules());
    }

    #[test]
    fn rule_count_treats_nested_blocks_as_one_rule() {
        let provider = HeadlessCssProvider::default();
        provider.load("@media (min-width: 10px) { window { opacity: 1; } } }".to_string());
        assert_eq!(provider.rule_count(), 1);
    }
}
