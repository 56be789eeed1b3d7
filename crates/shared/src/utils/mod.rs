mod logs;
mod metrics;
mod otel;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, ProcessMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext};
pub use self::shutdown::shutdown_signal;
