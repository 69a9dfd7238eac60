use std::sync::Arc;

use crate::alerts::AlertService;
use crate::broadcast::Broadcaster;
use crate::catalog::CatalogService;
use crate::distance::DistanceEstimator;
use crate::repository::CatalogRepository;

/// Shared by every handler behind an `Arc`.
pub struct AppState {
    pub repo: Arc<dyn CatalogRepository>,
    pub catalog: CatalogService,
    pub alerts: AlertService,
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        estimator: Arc<dyn DistanceEstimator>,
        alert_capacity: usize,
    ) -> Self {
        let broadcaster = Broadcaster::new(alert_capacity);
        let alerts = AlertService::new(repo.clone(), broadcaster.clone());
        let catalog = CatalogService::new(repo.clone(), estimator, alerts.clone());
        Self {
            repo,
            catalog,
            alerts,
            broadcaster,
        }
    }
}
