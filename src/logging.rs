use tracing_subscriber::EnvFilter;

/// Initialise logging. The level is `info` unless `debug` is set (from the
/// settings file), in which case it defaults to `debug` and may be
/// overridden via the `RUST_LOG` environment variable.
pub fn init(debug: bool) {
    // Without debug logging `RUST_LOG` is ignored so a stray variable in the
    // user's environment cannot turn on verbose output.
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init(false);
        super::init(true);
        tracing::info!("logging initialised twice");
    }
}
