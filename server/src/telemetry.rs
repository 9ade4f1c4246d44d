//! Logging setup with optional OpenTelemetry export.
//!
//! Console logging is always on. When `OTEL_EXPORTER_OTLP_ENDPOINT` is set and
//! the collector answers, traces and logs are exported there as well.

use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVICE_NAME: &str = "boodschappen-server";

enum OtelStatus {
    NotConfigured,
    Unreachable(String),
    Failed(String, anyhow::Error),
    Enabled(String, String),
}

pub fn init_telemetry() {
    let env_filter = EnvFilter::from_default_env();
    let fmt_layer = tracing_subscriber::fmt::layer();

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    let (status, providers) = match env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() {
        None => (OtelStatus::NotConfigured, None),
        Some(endpoint) if !is_reachable(&endpoint) => (OtelStatus::Unreachable(endpoint), None),
        Some(endpoint) => match build_providers(&endpoint, &service_name) {
            Ok(providers) => (
                OtelStatus::Enabled(endpoint, service_name.clone()),
                Some(providers),
            ),
            Err(e) => (OtelStatus::Failed(endpoint, e), None),
        },
    };

    let (trace_layer, log_layer) = match &providers {
        Some((trace_provider, log_provider)) => {
            let tracer = trace_provider.tracer(DEFAULT_SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(trace_provider.clone());
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(OpenTelemetryTracingBridge::new(log_provider)),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(trace_layer)
        .with(log_layer)
        .init();

    match status {
        OtelStatus::NotConfigured => {
            tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only")
        }
        OtelStatus::Unreachable(endpoint) => tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        ),
        OtelStatus::Failed(endpoint, e) => tracing::warn!(
            "Failed to set up OpenTelemetry export to {}: {:#}",
            endpoint,
            e
        ),
        OtelStatus::Enabled(endpoint, service_name) => tracing::info!(
            "OpenTelemetry enabled, exporting traces and logs to {} as {}",
            endpoint,
            service_name
        ),
    }
}

/// Quick TCP check so a missing collector doesn't stall startup.
fn is_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

fn build_providers(
    endpoint: &str,
    service_name: &str,
) -> anyhow::Result<(SdkTracerProvider, SdkLoggerProvider)> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}
