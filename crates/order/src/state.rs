use crate::{
    config::myconfig::Config,
    di::{DependenciesInject, Repositories},
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    config::{ConnectionPool, JwtConfig},
    utils::{ProcessMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Registry>,
    pub process_metrics: Arc<ProcessMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .field("process_metrics", &self.process_metrics)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Self {
        Self::with_repositories(
            Repositories::postgres(pool),
            &config.jwt_secret,
            config.strict_fan_out,
        )
    }

    pub fn with_repositories(repos: Repositories, jwt_secret: &str, strict_fan_out: bool) -> Self {
        let mut registry = Registry::default();
        let process_metrics = Arc::new(ProcessMetrics::new());
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;

        let di_container = DependenciesInject::new(repos, strict_fan_out, &mut registry);

        process_metrics.register(&mut registry);

        Self {
            di_container,
            jwt_config,
            registry: Arc::new(registry),
            process_metrics,
        }
    }

    /// Samples process metrics in the background. Needs a running runtime.
    pub fn spawn_metrics_collector(&self) {
        tokio::spawn(run_metrics_collector(self.process_metrics.clone()));
    }
}
