use gtk_compat::{capability, logging::append_probe_log, ToolkitGeneration};

use crate::probe_args::{parse_probe_args, ProbeCommand, USAGE};

pub(crate) fn run() -> i32 {
    let command = match parse_probe_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(error) => {
            eprintln!("{error}\n\n{USAGE}");
            return 2;
        }
    };

    let result = match command {
        ProbeCommand::Help => {
            println!("{USAGE}");
            Ok(())
        }
        ProbeCommand::Capabilities { generation } => print_capabilities(generation),
        ProbeCommand::Show { seconds } => show_window(seconds),
    };

    match result {
        Ok(()) => 0,
        Err(error) => {
            append_probe_log(&error);
            eprintln!("{error}");
            1
        }
    }
}

fn print_capabilities(generation: Option<ToolkitGeneration>) -> Result<(), String> {
    let generation = generation.or(ToolkitGeneration::linked()).ok_or_else(|| {
        "No GTK generation is linked into this build; pass --generation gtk3|gtk4.".to_string()
    })?;
    let report = capability::report(generation);
    let json = serde_json::to_string_pretty(&report)
        .map_err(|error| format!("Failed to serialize capability report: {error}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(any(feature = "gtk3", feature = "gtk4"))]
fn show_window(seconds: u32) -> Result<(), String> {
    use gtk_compat::{
        appearance, backend::glib, logging::append_appearance_log, startup, ActiveToolkit,
        ToolkitCompat,
    };

    append_probe_log("probe starting");
    startup::initialize_toolkit::<ActiveToolkit, _>(append_probe_log)?;

    let appearance_path = appearance::default_appearance_path();
    if let Some(path) = appearance_path.as_deref() {
        append_probe_log(&format!("appearance path: {}", path.display()));
    }
    let window_appearance =
        appearance::resolve_window_appearance(appearance_path.as_deref(), append_appearance_log)?;

    let window = ActiveToolkit::create_window();
    let _style_provider = appearance::apply_window_appearance::<ActiveToolkit, _>(
        &window,
        &window_appearance,
        append_appearance_log,
    );
    ActiveToolkit::set_widget_visible(ActiveToolkit::window_widget(&window), true);

    let main_loop = glib::MainLoop::new(None, false);
    let quit_loop = main_loop.clone();
    glib::timeout_add_seconds_local_once(seconds, move || quit_loop.quit());
    main_loop.run();

    ActiveToolkit::set_widget_visible(ActiveToolkit::window_widget(&window), false);
    append_probe_log("probe finished");
    Ok(())
}

#[cfg(not(any(feature = "gtk3", feature = "gtk4")))]
fn show_window(_seconds: u32) -> Result<(), String> {
    Err("--show needs a build with the `gtk3` or `gtk4` feature.".to_string())
}
