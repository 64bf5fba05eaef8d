use serde::Serialize;

#[cfg(all(feature = "gtk3", feature = "gtk4"))]
compile_error!("features `gtk3` and `gtk4` are mutually exclusive: link exactly one GTK generation");

/// Major GTK API generation a facade targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolkitGeneration {
    Gtk3,
    Gtk4,
}

impl ToolkitGeneration {
    pub const ALL: [ToolkitGeneration; 2] = [ToolkitGeneration::Gtk3, ToolkitGeneration::Gtk4];

    /// Generation compiled into this build, if any.
    pub const fn linked() -> Option<ToolkitGeneration> {
        #[cfg(feature = "gtk3")]
        return Some(ToolkitGeneration::Gtk3);

        #[cfg(feature = "gtk4")]
        return Some(ToolkitGeneration::Gtk4);

        #[cfg(not(any(feature = "gtk3", feature = "gtk4")))]
        return None;
    }

    pub const fn major_version(self) -> u32 {
        match self {
            ToolkitGeneration::Gtk3 => 3,
            ToolkitGeneration::Gtk4 => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolkitGeneration::Gtk3 => "GTK 3",
            ToolkitGeneration::Gtk4 => "GTK 4",
        }
    }

    pub fn parse(raw: &str) -> Option<ToolkitGeneration> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gtk3" | "3" | "gtk-3" => Some(ToolkitGeneration::Gtk3),
            "gtk4" | "4" | "gtk-4" => Some(ToolkitGeneration::Gtk4),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_feature_names_and_bare_major_versions() {
        assert_eq!(ToolkitGeneration::parse("gtk3"), Some(ToolkitGeneration::Gtk3));
        assert_eq!(ToolkitGeneration::parse(" GTK4 "), Some(ToolkitGeneration::Gtk4));
        assert_eq!(ToolkitGeneration::parse("4"), Some(ToolkitGeneration::Gtk4));
        assert_eq!(ToolkitGeneration::parse("gtk2"), None);
    }

    #[test]
    fn major_version_matches_generation() {
        assert_eq!(ToolkitGeneration::Gtk3.major_version(), 3);
        assert_eq!(ToolkitGeneration::Gtk4.major_version(), 4);
    }

    #[test]
    fn linked_generation_follows_cargo_features() {
        let expected = if cfg!(feature = "gtk3") {
            Some(ToolkitGeneration::Gtk3)
        } else if cfg!(feature = "gtk4") {
            Some(ToolkitGeneration::Gtk4)
        } else {
            None
        };
        assert_eq!(ToolkitGeneration::linked(), expected);
    }
}
