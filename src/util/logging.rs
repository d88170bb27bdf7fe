use anyhow::Result;

/// Initialize env_logger for the engine.
///
/// The `verbose` flag enables debug output for this crate; `RUST_LOG`
/// overrides either way.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        "taiko_player=debug,warn"
    } else {
        "taiko_player=info,warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init()?;

    Ok(())
}
