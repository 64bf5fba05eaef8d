use crate::ToolkitCompat;

/// Runs the toolkit bootstrap and turns a refusal into an error the host can
/// treat as a fatal startup condition.
pub fn initialize_toolkit<T, F>(log: F) -> Result<(), String>
where
    T: ToolkitCompat,
    F: Fn(&str),
{
    let generation = T::GENERATION.label();
    if T::initialize() {
        log(&format!("{generation} initialized"));
        Ok(())
    } else {
        let reason = format!("{generation} failed to initialize (is a display available?)");
        log(&reason);
        Err(reason)
    }
}
