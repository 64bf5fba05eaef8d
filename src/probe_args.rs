use gtk_compat::ToolkitGeneration;

pub(crate) const DEFAULT_SHOW_SECONDS: u32 = 5;

pub(crate) const USAGE: &str = "\
usage: gtk-compat-probe [--capabilities] [--generation gtk3|gtk4]
       gtk-compat-probe --show [--seconds N]

  --capabilities      print the facade capability table as JSON (default)
  --generation GEN    table for GEN instead of the linked generation
  --show              open a window styled from the appearance file
  --seconds N         keep the window open for N seconds (default 5)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeCommand {
    Capabilities {
        generation: Option<ToolkitGeneration>,
    },
    Show {
        seconds: u32,
    },
    Help,
}

pub(crate) fn parse_probe_args<I>(args: I) -> Result<ProbeCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut show = false;
    let mut generation = None;
    let mut seconds = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ProbeCommand::Help),
            "--capabilities" => {}
            "--show" => show = true,
            "--generation" => {
                let raw = args
                    .next()
                    .ok_or_else(|| "Missing value for --generation.".to_string())?;
                generation = Some(
                    ToolkitGeneration::parse(&raw)
                        .ok_or_else(|| format!("Unknown GTK generation '{raw}'."))?,
                );
            }
            "--seconds" => {
                let raw = args
                    .next()
                    .ok_or_else(|| "Missing value for --seconds.".to_string())?;
                let parsed = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|error| format!("Invalid --seconds '{raw}': {error}"))?;
                seconds = Some(parsed);
            }
            other => return Err(format!("Unknown argument '{other}'.")),
        }
    }

    if show {
        if generation.is_some() {
            return Err("--generation only applies to --capabilities.".to_string());
        }
        return Ok(ProbeCommand::Show {
            seconds: seconds.unwrap_or(DEFAULT_SHOW_SECONDS),
        });
    }

    if seconds.is_some() {
        return Err("--seconds only applies to --show.".to_string());
    }
    Ok(ProbeCommand::Capabilities { generation })
}
