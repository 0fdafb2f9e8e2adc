/// URL for the SQLite database file backing the todo list (e.g. `sqlite://todos.db`)
pub const DB_URL: &str = "DATABASE_URL";
/// Address the HTTP server binds to, such as `0.0.0.0:3000`
pub const SERVER_ADDRESS: &str = "SERVER_ADDRESS";
/// Log level configuration for the application. For formatting info, see [tracing-subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// Database used when [DB_URL] is not set
pub const DEFAULT_DB_URL: &str = "sqlite://todos.db";
/// Bind address used when [SERVER_ADDRESS] is not set
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
