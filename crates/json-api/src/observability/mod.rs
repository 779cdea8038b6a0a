//! Observability setup and request tracing middleware.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use thiserror::Error;
use tracing::error;

use crate::config::ServerConfig;

mod logging;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use metrics::{AuthOutcome, metrics_handler, observe_auth, observe_import};
pub(crate) use request::request_logging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to build OTLP exporter.
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Initialize structured logging and optional OpenTelemetry export.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        let tracer_provider = if config.observability.otel_enabled {
            global::set_text_map_propagator(TraceContextPropagator::new());
            Some(otel::build_tracer_provider(config)?)
        } else {
            None
        };

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        Ok(Self { tracer_provider })
    }

    /// Flush and shutdown telemetry pipelines.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}
