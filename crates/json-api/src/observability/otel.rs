//! OpenTelemetry trace export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::{ServerConfig, observability::ObservabilityConfig};

use super::ObservabilityError;

const SERVICE_NAMESPACE: &str = "backoffice";

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let config = &config.observability;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            config.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", SERVICE_NAMESPACE),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Follow the caller's sampling decision, otherwise sample `ratio` of traces.
fn sampler(ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(sample_ratio(ratio))))
}

fn sample_ratio(ratio: f64) -> f64 {
    ratio.clamp(0.0, 1.0)
}
