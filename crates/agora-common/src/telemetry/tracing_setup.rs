//! Tracing subscriber installation
//!
//! Human-readable output in development, one JSON object per event in
//! production. `RUST_LOG` overrides the preset filter.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::Environment;

/// How events are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub default_filter: String,
    pub format: LogFormat,
    /// Log span open/close, which shows request timings
    pub span_events: bool,
    /// Source file and line on every event
    pub source_location: bool,
}

impl TracingConfig {
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                default_filter: "info,agora=debug,tower_http=debug".to_string(),
                format: LogFormat::Pretty,
                span_events: true,
                source_location: true,
            },
            Environment::Staging => Self {
                default_filter: "info".to_string(),
                format: LogFormat::Pretty,
                span_events: false,
                source_location: true,
            },
            Environment::Production => Self {
                default_filter: "info".to_string(),
                format: LogFormat::Json,
                span_events: false,
                source_location: false,
            },
        }
    }

    /// Preset for the `APP_ENV` of the running process
    #[must_use]
    pub fn from_env() -> Self {
        let env = std::env::var("APP_ENV")
            .ok()
            .and_then(|label| Environment::from_label(&label))
            .unwrap_or_default();
        Self::for_environment(env)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Json => layer.json().flatten_event(true).boxed(),
        }
    }
}

/// Install the subscriber for the current `APP_ENV`
///
/// # Errors
/// Fails when a global subscriber is already installed
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::from_env())
}

/// # Errors
/// Fails when a global subscriber is already installed
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(config.filter())
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_logs_json() {
        let config = TracingConfig::for_environment(Environment::Production);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.source_location);
    }

    #[test]
    fn test_development_is_verbose() {
        let config = TracingConfig::for_environment(Environment::Development);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.span_events);
        assert!(config.default_filter.contains("agora=debug"));
    }

    #[test]
    fn test_second_init_reports_error() {
        let _ = try_init_tracing();
        assert!(try_init_tracing().is_err());
    }
}
