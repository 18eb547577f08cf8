//! Subscriber installation. `TAXON_LOG` overrides the configured level.

pub mod events;
pub mod spans;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use taxon_core::config::ObservabilityConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TAXON_LOG";

/// Install the global subscriber from config. Returns false when a
/// subscriber was already installed (e.g. by a host application or test).
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    install(filter, config.json_logs)
}

/// Install the global subscriber with an explicit filter directive.
pub fn init_tracing_with_filter(directive: &str, json: bool) -> bool {
    install(EnvFilter::new(directive), json)
}

fn install(filter: EnvFilter, json: bool) -> bool {
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };
    result.is_ok()
}
