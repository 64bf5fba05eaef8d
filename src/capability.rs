//! Per-generation capability table for the facade vocabulary.
//!
//! Every operation of [`crate::ToolkitCompat`] has exactly one entry per
//! generation. Facade bodies that degrade to a no-op assert at compile time
//! that their entry here is [`Support::Absent`], so this table is the single
//! place where the degradation policy can be read.

use serde::Serialize;

use crate::ToolkitGeneration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initialize,
    CreateWindow,
    WindowWidget,
    SetWindowChild,
    RemoveWindowChild,
    SetWidgetVisible,
    SetWindowSize,
    SetWindowMaxSize,
    SetWidgetOpacity,
    SetWindowKeepAbove,
    AddStyleClass,
    RemoveStyleClass,
    CreateStyleProvider,
    LoadStyleRules,
    AttachStyleProvider,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::Initialize,
        Operation::CreateWindow,
        Operation::WindowWidget,
        Operation::SetWindowChild,
        Operation::RemoveWindowChild,
        Operation::SetWidgetVisible,
        Operation::SetWindowSize,
        Operation::SetWindowMaxSize,
        Operation::SetWidgetOpacity,
        Operation::SetWindowKeepAbove,
        Operation::AddStyleClass,
        Operation::RemoveStyleClass,
        Operation::CreateStyleProvider,
        Operation::LoadStyleRules,
        Operation::AttachStyleProvider,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Support {
    /// One native primitive with the same shape as the facade operation.
    Direct,
    /// Same semantics, reached through a different native call sequence.
    Translated,
    /// Only part of the contract holds; see [`note`].
    Partial,
    /// No native equivalent. The facade accepts the call and does nothing.
    Absent,
}

pub const fn support(generation: ToolkitGeneration, operation: Operation) -> Support {
    use Operation::*;
    use ToolkitGeneration::*;

    match (generation, operation) {
        (Gtk3, Initialize) => Support::Translated,
        (Gtk3, CreateWindow) => Support::Translated,
        (Gtk3, SetWindowChild) => Support::Translated,
        (Gtk3, RemoveWindowChild) => Support::Partial,
        (Gtk3, SetWidgetVisible) => Support::Translated,
        (Gtk3, SetWindowSize) => Support::Direct,
        (Gtk3, SetWindowMaxSize) => Support::Translated,
        (Gtk3, SetWindowKeepAbove) => Support::Direct,
        (Gtk3, AddStyleClass) | (Gtk3, RemoveStyleClass) => Support::Translated,
        (Gtk3, LoadStyleRules) => Support::Translated,
        (Gtk3, AttachStyleProvider) => Support::Translated,

        (Gtk4, RemoveWindowChild) => Support::Translated,
        (Gtk4, SetWindowSize) => Support::Partial,
        (Gtk4, SetWindowMaxSize) => Support::Absent,
        (Gtk4, SetWindowKeepAbove) => Support::Absent,
        (Gtk4, LoadStyleRules) => Support::Translated,
        (Gtk4, AttachStyleProvider) => Support::Translated,

        (_, Initialize)
        | (_, CreateWindow)
        | (_, WindowWidget)
        | (_, SetWindowChild)
        | (_, RemoveWindowChild)
        | (_, SetWidgetVisible)
        | (_, SetWidgetOpacity)
        | (_, AddStyleClass)
        | (_, RemoveStyleClass)
        | (_, CreateStyleProvider) => Support::Direct,
    }
}

pub const fn is_absent(generation: ToolkitGeneration, operation: Operation) -> bool {
    matches!(support(generation, operation), Support::Absent)
}

pub fn note(generation: ToolkitGeneration, operation: Operation) -> &'static str {
    use Operation::*;
    use ToolkitGeneration::*;

    match (generation, operation) {
        (Gtk3, Initialize) => "init check with null argc/argv placeholders",
        (Gtk4, Initialize) => "argument-less init check",
        (Gtk3, CreateWindow) => "window created with the toplevel window type",
        (Gtk4, CreateWindow) => "bare toplevel window",
        (_, WindowWidget) => "window upcast to widget",
        (Gtk3, SetWindowChild) => "container add; clearing removes the current child",
        (Gtk4, SetWindowChild) => "window child setter, unset to clear",
        (Gtk3, RemoveWindowChild) => {
            "unconditional container remove; passing a widget that is not the child is undefined"
        }
        (Gtk4, RemoveWindowChild) => {
            "child looked up and cleared only if it is the given widget"
        }
        (Gtk3, SetWidgetVisible) => "separate show and hide calls",
        (Gtk4, SetWidgetVisible) => "single visibility setter",
        (Gtk3, SetWindowSize) => "resize at any time",
        (Gtk4, SetWindowSize) => "default size only; no effect once the window has been shown",
        (Gtk3, SetWindowMaxSize) => "max-size geometry hint",
        (Gtk4, SetWindowMaxSize) => "no geometry hints; accepted and ignored",
        (_, SetWidgetOpacity) => "widget opacity setter",
        (Gtk3, SetWindowKeepAbove) => "keep-above window manager hint",
        (Gtk4, SetWindowKeepAbove) => "no window manager hints; accepted and ignored",
        (Gtk3, AddStyleClass) | (Gtk3, RemoveStyleClass) => "class set on the style context",
        (Gtk4, AddStyleClass) | (Gtk4, RemoveStyleClass) => "widget css class setter",
        (_, CreateStyleProvider) => "new css provider",
        (Gtk3, LoadStyleRules) => "load from data with explicit byte length, errors discarded",
        (Gtk4, LoadStyleRules) => "load from string, length ignored",
        (Gtk3, AttachStyleProvider) => "provider added on the widget's style context",
        (Gtk4, AttachStyleProvider) => {
            "provider added on the widget's style context (deprecated native path)"
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityEntry {
    pub operation: Operation,
    pub support: Support,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityReport {
    pub generation: ToolkitGeneration,
    pub major_version: u32,
    pub linked: bool,
    pub operations: Vec<CapabilityEntry>,
}

pub fn report(generation: ToolkitGeneration) -> CapabilityReport {
    CapabilityReport {
        generation,
        major_version: generation.major_version(),
        linked: ToolkitGeneration::linked() == Some(generation),
        operations: Operation::ALL
            .iter()
            .map(|&operation| CapabilityEntry {
                operation,
                support: support(generation, operation),
                note: note(generation, operation),
            })
            .collect(),
    }
}
