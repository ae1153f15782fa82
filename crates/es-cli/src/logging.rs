use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const LOG_ENV: &str = "EASYSCRIPT_LOG";

/// Installs a stderr subscriber when `EASYSCRIPT_LOG` or `RUST_LOG` is set,
/// e.g. `EASYSCRIPT_LOG=es_runtime=debug`. Safe to call more than once.
pub(crate) fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if let Ok(directives) = std::env::var(LOG_ENV) {
            EnvFilter::new(directives)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
        if let Err(error) = installed {
            eprintln!("easyscript: logging disabled: {}", error);
        }
    });
}
