use prometheus_client::{
    metrics::{
        counter::Counter,
        family::Family,
        gauge::Gauge,
        histogram::{Histogram, exponential_buckets},
    },
    registry::Registry,
};
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    sync::{Arc, atomic::AtomicU64},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::System;

const SAMPLE_INTERVAL: Duration = Duration::from_secs(15);

/// Process-level gauges sampled in the background.
#[derive(Debug, Clone, Default)]
pub struct ProcessMetrics {
    resident_memory_bytes: Gauge,
    virtual_memory_bytes: Gauge,
    available_memory_bytes: Gauge,
    threads: Gauge,
    cpu_usage_percent: Gauge<f64, AtomicU64>,
    start_time_seconds: Gauge,
}

impl ProcessMetrics {
    pub fn new() -> Self {
        let metrics = Self::default();

        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        metrics.start_time_seconds.set(started);

        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        let process = registry.sub_registry_with_prefix("process");

        process.register(
            "resident_memory_bytes",
            "Resident memory of this process",
            self.resident_memory_bytes.clone(),
        );
        process.register(
            "virtual_memory_bytes",
            "Virtual memory of this process",
            self.virtual_memory_bytes.clone(),
        );
        process.register(
            "available_memory_bytes",
            "Memory available on the host",
            self.available_memory_bytes.clone(),
        );
        process.register("threads", "Threads of this process", self.threads.clone());
        process.register(
            "cpu_usage_percent",
            "Global CPU usage of the host",
            self.cpu_usage_percent.clone(),
        );
        process.register(
            "start_time_seconds",
            "Process start time since the unix epoch",
            self.start_time_seconds.clone(),
        );
    }

    pub fn sample(&self, sys: &mut System) {
        sys.refresh_all();

        self.available_memory_bytes
            .set(sys.available_memory() as i64);
        self.cpu_usage_percent.set(f64::from(sys.global_cpu_usage()));

        let Ok(pid) = sysinfo::get_current_pid() else {
            return;
        };
        if let Some(process) = sys.process(pid) {
            self.resident_memory_bytes.set(process.memory() as i64);
            self.virtual_memory_bytes
                .set(process.virtual_memory() as i64);
            if let Some(tasks) = process.tasks() {
                self.threads.set(tasks.len() as i64);
            }
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

/// Per-service request count and latency, labelled by method and outcome.
#[derive(Clone, Debug)]
pub struct Metrics {
    requests: Family<Labels, Counter>,
    duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests: Family::default(),
            duration: Family::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.005, 2.0, 12))
            }),
        }
    }

    /// Exposes `{prefix}_requests_total` and `{prefix}_request_duration_seconds`.
    pub fn register(&self, registry: &mut Registry, prefix: &str, service: &str) {
        let scoped = registry.sub_registry_with_prefix(prefix);
        scoped.register(
            "requests",
            format!("Operations handled by {service}"),
            self.requests.clone(),
        );
        scoped.register(
            "request_duration_seconds",
            format!("Operation latency of {service}"),
            self.duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.requests.get_or_create(&labels).inc();
        self.duration.get_or_create(&labels).observe(duration_secs);
    }
}

pub async fn run_metrics_collector(metrics: Arc<ProcessMetrics>) {
    let mut sys = System::new();
    let mut interval = tokio::time::interval(SAMPLE_INTERVAL);
    loop {
        interval.tick().await;
        metrics.sample(&mut sys);
    }
}
