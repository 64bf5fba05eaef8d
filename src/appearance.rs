//! Host window appearance, loaded from JSON and applied through the facade.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::ToolkitCompat;

pub const APPEARANCE_PATH_ENV: &str = "GTK_COMPAT_APPEARANCE";
pub const WINDOW_SIZE_ENV: &str = "GTK_COMPAT_WINDOW_SIZE";
pub const KEEP_ABOVE_ENV: &str = "GTK_COMPAT_KEEP_ABOVE";
pub const OPACITY_ENV: &str = "GTK_COMPAT_OPACITY";

pub const DEFAULT_WIDTH: i32 = 800;
pub const DEFAULT_HEIGHT: i32 = 600;
/// `GTK_STYLE_PROVIDER_PRIORITY_APPLICATION`.
pub const DEFAULT_STYLE_PRIORITY: u32 = 600;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowAppearance {
    pub width: i32,
    pub height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
    pub keep_above: bool,
    pub opacity: f64,
    pub style_classes: Vec<String>,
    pub style_rules: Option<String>,
    pub style_priority: u32,
}

impl Default for WindowAppearance {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_width: None,
            max_height: None,
            keep_above: false,
            opacity: 1.0,
            style_classes: Vec::new(),
            style_rules: None,
            style_priority: DEFAULT_STYLE_PRIORITY,
        }
    }
}

impl WindowAppearance {
    pub fn max_size(&self) -> Option<(i32, i32)> {
        match (self.max_width, self.max_height) {
            (Some(width), Some(height)) => Some((width, height)),
            _ => None,
        }
    }

    /// Enforces the facade's caller obligations: positive sizes, opacity in
    /// `[0, 1]`, non-empty class names.
    pub fn sanitized<F>(mut self, log: F) -> Self
    where
        F: Fn(&str),
    {
        if self.width <= 0 || self.height <= 0 {
            log(&format!(
                "ignoring non-positive window size {}x{}; using {}x{}",
                self.width, self.height, DEFAULT_WIDTH, DEFAULT_HEIGHT
            ));
            self.width = DEFAULT_WIDTH;
            self.height = DEFAULT_HEIGHT;
        }

        match (self.max_width, self.max_height) {
            (Some(width), Some(height)) if width <= 0 || height <= 0 => {
                log(&format!(
                    "ignoring non-positive max window size {width}x{height}"
                ));
                self.max_width = None;
                self.max_height = None;
            }
            (Some(_), None) | (None, Some(_)) => {
                log("max window size needs both maxWidth and maxHeight; ignoring it");
                self.max_width = None;
                self.max_height = None;
            }
            _ => {}
        }

        if !self.opacity.is_finite() {
            log(&format!("ignoring invalid opacity {}", self.opacity));
            self.opacity = 1.0;
        } else if !(0.0..=1.0).contains(&self.opacity) {
            let clamped = self.opacity.clamp(0.0, 1.0);
            log(&format!("clamping opacity {} to {}", self.opacity, clamped));
            self.opacity = clamped;
        }

        let mut classes: Vec<String> = Vec::with_capacity(self.style_classes.len());
        for raw in &self.style_classes {
            let class_name = raw.trim();
            if class_name.is_empty() {
                log("dropping empty style class name");
                continue;
            }
            if !classes.iter().any(|existing| existing == class_name) {
                classes.push(class_name.to_string());
            }
        }
        self.style_classes = classes;

        self
    }
}

pub fn default_appearance_path() -> Option<PathBuf> {
    default_appearance_path_with_override(env::var(APPEARANCE_PATH_ENV).ok(), home::home_dir())
}

fn default_appearance_path_with_override(
    path_override: Option<String>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = path_override {
        let path = PathBuf::from(path.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home_dir.map(|home| {
        home.join(".config")
            .join("gtk-compat")
            .join("appearance.json")
    })
}

/// Reads an appearance file. A missing file yields the defaults.
pub fn load_window_appearance(path: &Path) -> Result<WindowAppearance, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(WindowAppearance::default());
        }
        Err(error) => {
            return Err(format!(
                "Failed to read window appearance {}: {}",
                path.display(),
                error
            ));
        }
    };

    serde_json::from_str(&raw).map_err(|error| {
        format!(
            "Failed to parse window appearance {}: {}",
            path.display(),
            error
        )
    })
}

pub(crate) fn parse_window_size(raw: &str) -> Option<(i32, i32)> {
    let (width, height) = raw.trim().split_once(['x', 'X'])?;
    let width = width.trim().parse::<i32>().ok()?;
    let height = height.trim().parse::<i32>().ok()?;
    if width <= 0 || height <= 0 {
        return None;
    }
    Some((width, height))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn apply_env_overrides<L, F>(appearance: &mut WindowAppearance, lookup: L, log: F)
where
    L: Fn(&str) -> Option<String>,
    F: Fn(&str),
{
    if let Some(raw) = lookup(WINDOW_SIZE_ENV) {
        match parse_window_size(&raw) {
            Some((width, height)) => {
                appearance.width = width;
                appearance.height = height;
            }
            None => log(&format!("ignoring invalid {WINDOW_SIZE_ENV}={raw}")),
        }
    }

    if let Some(raw) = lookup(KEEP_ABOVE_ENV) {
        match parse_flag(&raw) {
            Some(keep_above) => appearance.keep_above = keep_above,
            None => log(&format!("ignoring invalid {KEEP_ABOVE_ENV}={raw}")),
        }
    }

    if let Some(raw) = lookup(OPACITY_ENV) {
        match raw.trim().parse::<f64>() {
            Ok(opacity) => appearance.opacity = opacity,
            Err(_) => log(&format!("ignoring invalid {OPACITY_ENV}={raw}")),
        }
    }
}

/// Loads the appearance file, applies process environment overrides and
/// sanitizes the result.
pub fn resolve_window_appearance<F>(path: Option<&Path>, log: F) -> Result<WindowAppearance, String>
where
    F: Fn(&str),
{
    resolve_window_appearance_with(path, |key| env::var(key).ok(), log)
}

fn resolve_window_appearance_with<L, F>(
    path: Option<&Path>,
    lookup: L,
    log: F,
) -> Result<WindowAppearance, String>
where
    L: Fn(&str) -> Option<String>,
    F: Fn(&str),
{
    let mut appearance = match path {
        Some(path) => load_window_appearance(path)?,
        None => WindowAppearance::default(),
    };
    apply_env_overrides(&mut appearance, lookup, &log);
    Ok(appearance.sanitized(&log))
}

/// Applies `appearance` to `window` using only facade operations. Returns the
/// style provider created for `style_rules`, which the caller then owns.
pub fn apply_window_appearance<T, F>(
    window: &T::Window,
    appearance: &WindowAppearance,
    log: F,
) -> Option<T::StyleProvider>
where
    T: ToolkitCompat,
    F: Fn(&str),
{
    let widget = T::window_widget(window);

    T::set_window_size(window, appearance.width, appearance.height);
    if let Some((max_width, max_height)) = appearance.max_size() {
        T::set_window_max_size(window, max_width, max_height);
    }
    T::set_window_keep_above(window, appearance.keep_above);
    T::set_widget_opacity(widget, appearance.opacity);
    for class_name in &appearance.style_classes {
        T::add_style_class(widget, class_name);
    }

    let provider = appearance
        .style_rules
        .as_deref()
        .filter(|rules| !rules.trim().is_empty())
        .map(|rules| {
            let provider = T::create_style_provider();
            T::load_style_rules(&provider, rules, None);
            T::attach_style_provider(widget, &provider, appearance.style_priority);
            provider
        });

    log(&format!(
        "applied window appearance on {}: size={}x{} classes={} style_rules={}",
        T::GENERATION.label(),
        appearance.width,
        appearance.height,
        appearance.style_classes.len(),
        provider.is_some()
    ));

    provider
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;
    use crate::backend::headless::{self, HeadlessGtk3, HeadlessGtk4};
    use crate::{Gtk3Compat, Gtk4Compat};

    fn sample() -> WindowAppearance {
        WindowAppearance {
            width: 1024,
            height: 768,
            max_width: Some(1280),
            max_height: Some(960),
            keep_above: true,
            opacity: 0.9,
            style_classes: vec!["webview-host".to_string()],
            style_rules: Some("window { background: transparent; }".to_string()),
            style_priority: 800,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let appearance =
            load_window_appearance(&temp.path().join("absent.json")).expect("load defaults");
        assert_eq!(appearance, WindowAppearance::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_unset_fields() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("appearance.json");
        fs::write(
            &path,
            r#"{ "width": 1280, "keepAbove": true, "styleClasses": ["a", "b"] }"#,
        )
        .expect("write appearance");

        let appearance = load_window_appearance(&path).expect("load appearance");
        assert_eq!(appearance.width, 1280);
        assert_eq!(appearance.height, DEFAULT_HEIGHT);
        assert!(appearance.keep_above);
        assert_eq!(appearance.style_classes, vec!["a", "b"]);
        assert_eq!(appearance.style_priority, DEFAULT_STYLE_PRIORITY);
    }

    #[test]
    fn invalid_json_error_names_the_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("appearance.json");
        fs::write(&path, "{ width: ").expect("write appearance");

        let error = load_window_appearance(&path).expect_err("parse should fail");
        assert!(error.contains("Failed to parse window appearance"));
        assert!(error.contains(&path.display().to_string()));
    }

    #[test]
    fn appearance_path_override_wins_over_home() {
        let path = default_appearance_path_with_override(
            Some(" /etc/compat/window.json ".to_string()),
            Some(PathBuf::from("/home/user")),
        );
        assert_eq!(path, Some(PathBuf::from("/etc/compat/window.json")));
    }

    #[test]
    fn blank_appearance_path_override_falls_back_to_home_config() {
        let path = default_appearance_path_with_override(
            Some("  ".to_string()),
            Some(PathBuf::from("/home/user")),
        );
        assert_eq!(
            path,
            Some(PathBuf::from("/home/user/.config/gtk-compat/appearance.json"))
        );
    }

    #[test]
    fn appearance_path_is_unknown_without_override_or_home() {
        assert_eq!(default_appearance_path_with_override(None, None), None);
        assert_eq!(
            default_appearance_path_with_override(Some(String::new()), None),
            None
        );
    }

    #[test]
    fn resolve_loads_file_then_overrides_then_sanitizes() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("appearance.json");
        fs::write(
            &path,
            r#"{ "width": 1280, "height": 720, "opacity": 0.8, "styleClasses": [" host ", ""] }"#,
        )
        .expect("write appearance");
        let vars: HashMap<&str, &str> =
            HashMap::from([(OPACITY_ENV, "NaN"), (KEEP_ABOVE_ENV, "on")]);
        let logged = RefCell::new(Vec::new());

        let appearance = resolve_window_appearance_with(
            Some(&path),
            |key| vars.get(key).map(|value| value.to_string()),
            |line| logged.borrow_mut().push(line.to_string()),
        )
        .expect("resolve appearance");

        assert_eq!((appearance.width, appearance.height), (1280, 720));
        assert!(appearance.keep_above);
        assert_eq!(appearance.opacity, 1.0);
        assert_eq!(appearance.style_classes, vec!["host"]);
        assert_eq!(
            logged.into_inner(),
            vec![
                "ignoring invalid opacity NaN".to_string(),
                "dropping empty style class name".to_string(),
            ]
        );
    }

    #[test]
    fn resolve_without_a_path_starts_from_defaults() {
        let appearance = resolve_window_appearance_with(None, |_| None, |_| {})
            .expect("resolve appearance");
        assert_eq!(appearance, WindowAppearance::default());
    }

    #[test]
    fn parse_window_size_accepts_both_separators() {
        assert_eq!(parse_window_size("1024x768"), Some((1024, 768)));
        assert_eq!(parse_window_size(" 640 X 480 "), Some((640, 480)));
        assert_eq!(parse_window_size("0x480"), None);
        assert_eq!(parse_window_size("wide"), None);
    }

    #[test]
    fn env_overrides_replace_file_values_and_skip_invalid_ones() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (WINDOW_SIZE_ENV, "1920x1080"),
            (KEEP_ABOVE_ENV, "maybe"),
            (OPACITY_ENV, "0.5"),
        ]);
        let logged = RefCell::new(Vec::new());
        let mut appearance = WindowAppearance::default();

        apply_env_overrides(
            &mut appearance,
            |key| vars.get(key).map(|value| value.to_string()),
            |line| logged.borrow_mut().push(line.to_string()),
        );

        assert_eq!((appearance.width, appearance.height), (1920, 1080));
        assert!(!appearance.keep_above);
        assert_eq!(appearance.opacity, 0.5);
        assert_eq!(
            logged.into_inner(),
            vec![format!("ignoring invalid {KEEP_ABOVE_ENV}=maybe")]
        );
    }

    #[test]
    fn sanitized_enforces_caller_obligations() {
        let appearance = WindowAppearance {
            width: -1,
            height: 600,
            max_width: Some(800),
            max_height: None,
            opacity: 1.7,
            style_classes: vec![" a ".to_string(), "".to_string(), "a".to_string()],
            ..WindowAppearance::default()
        }
        .sanitized(|_| {});

        assert_eq!((appearance.width, appearance.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(appearance.max_size(), None);
        assert_eq!(appearance.opacity, 1.0);
        assert_eq!(appearance.style_classes, vec!["a"]);
    }

    #[test]
    fn gtk3_applies_every_setting() {
        headless::reset();
        type T = Gtk3Compat<HeadlessGtk3>;
        assert!(T::initialize());
        let window = T::create_window();

        let provider = apply_window_appearance::<T, _>(&window, &sample(), |_| {})
            .expect("style rules create a provider");

        assert_eq!(window.size(), (1024, 768));
        assert_eq!(window.max_size_hint(), Some((1280, 960)));
        assert!(window.keep_above());
        assert_eq!(window.widget().opacity(), 0.9);
        assert!(window.widget().has_style_class("webview-host"));
        assert_eq!(window.widget().providers(), vec![(provider.clone(), 800)]);
        assert!(provider.has_rules());
    }

    #[test]
    fn gtk4_degrades_window_manager_hints_silently() {
        headless::reset();
        type T = Gtk4Compat<HeadlessGtk4>;
        assert!(T::initialize());
        let window = T::create_window();
        let logged = RefCell::new(Vec::new());

        let provider = apply_window_appearance::<T, _>(&window, &sample(), |line| {
            logged.borrow_mut().push(line.to_string())
        });

        assert_eq!(window.size(), (1024, 768));
        assert_eq!(window.max_size_hint(), None);
        assert!(!window.keep_above());
        assert!(window.widget().has_style_class("webview-host"));
        assert!(provider.is_some());
        assert_eq!(logged.borrow().len(), 1);
        assert!(headless::take_criticals().is_empty());
    }

    #[test]
    fn blank_style_rules_create_no_provider() {
        headless::reset();
        type T = Gtk4Compat<HeadlessGtk4>;
        assert!(T::initialize());
        let window = T::create_window();
        let appearance = WindowAppearance {
            style_rules: Some("  \n".to_string()),
            ..WindowAppearance::default()
        };

        assert!(apply_window_appearance::<T, _>(&window, &appearance, |_| {}).is_none());
        assert!(window.widget().providers().is_empty());
    }
}
