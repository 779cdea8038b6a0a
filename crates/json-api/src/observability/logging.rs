//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies whose logs are capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "hyper_util", "reqwest", "tonic", "opentelemetry"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer(config.logging.log_format))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_ignored| {
            EnvFilter::new(filter_directives(&config.logging.log_level))
        }));

    match tracer_provider {
        Some(provider) => {
            let tracer = provider.tracer(config.observability.otel_service_name.clone());

            subscriber
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
        }
        None => subscriber.try_init()?,
    }

    Ok(())
}

fn fmt_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

fn filter_directives(log_level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(log_level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}
