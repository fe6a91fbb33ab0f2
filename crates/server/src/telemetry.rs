use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    response::Response,
};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::{
    future::Future,
    pin::Pin,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};
use tracing_subscriber::EnvFilter;

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SERVICE_NAME: &str = "todo-server";
const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,tower_http=info";

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` selects the filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {e}");
    }
}

/// Set up the OpenTelemetry TracerProvider and register it globally.
///
/// Returns `Ok(None)` when no collector is configured. The caller keeps the
/// provider and shuts it down on exit so buffered spans are flushed.
///
/// Reads config from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address, e.g. `http://localhost:4317`
///   - `OTEL_SERVICE_NAME`: service name tag (default: `todo-server`)
///   - `OTEL_EXPORTER_OTLP_HEADERS_KEY` / `OTEL_EXPORTER_OTLP_HEADERS_VALUE`:
///     optional metadata pair sent with every export (ingestion keys)
///   - `DEPLOY_ENV`: deployment environment tag (default: `development`)
pub fn init_telemetry(
) -> Result<Option<SdkTracerProvider>, opentelemetry_otlp::ExporterBuildError> {
    let endpoint = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(ep) if !ep.is_empty() => ep,
        _ => {
            tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
            return Ok(None);
        }
    };

    let service_name = std::env::var("OTEL_SERVICE_NAME")
        .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);

    // TLS with system root certs for HTTPS collectors
    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    if let (Ok(key), Ok(value)) = (
        std::env::var("OTEL_EXPORTER_OTLP_HEADERS_KEY"),
        std::env::var("OTEL_EXPORTER_OTLP_HEADERS_VALUE"),
    ) {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                let mut headers = HeaderMap::new();
                headers.insert(name, value);
                builder = builder.with_metadata(
                    opentelemetry_otlp::tonic_types::metadata::MetadataMap::from_headers(headers),
                );
            }
            _ => tracing::warn!("Ignoring malformed OTLP export header"),
        }
    }

    let exporter = builder.build()?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider.clone());

    tracing::info!(endpoint = %endpoint, version = APP_VERSION, "Telemetry initialized");
    Ok(Some(provider))
}

/// Span name for a request path: numeric segments become `{id}` so every
/// item shares one span name.
fn span_route(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, path, user agent, request ID, response status, and the
/// authenticated user id when present. Must sit inside the auth middleware.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(DEFAULT_SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => {
                attributes.push(KeyValue::new("user.id", claims.sub));
                attributes.push(KeyValue::new("auth.status", "authenticated"));
            }
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{} {}", method, span_route(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
