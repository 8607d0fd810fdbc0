use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

use crate::core::config::SessionConfig;
use crate::features::checklists::services::SessionService;

/// Background worker that closes abandoned checklist sessions
pub struct SessionSweeper {
    session_service: Arc<SessionService>,
    idle_ttl: Duration,
    sweep_interval: Duration,
}

impl SessionSweeper {
    pub fn new(session_service: Arc<SessionService>, config: &SessionConfig) -> Self {
        Self {
            session_service,
            idle_ttl: config.idle_ttl,
            sweep_interval: config.sweep_interval,
        }
    }

    /// Run the sweeper in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting session sweeper (idle ttl {}s, every {}s)",
            self.idle_ttl.as_secs(),
            self.sweep_interval.as_secs()
        );

        let mut interval = interval(self.sweep_interval);

        loop {
            interval.tick().await;
            self.sweep().await;
        }
    }

    async fn sweep(&self) -> usize {
        let evicted = self.session_service.evict_idle(self.idle_ttl).await;
        if evicted > 0 {
            tracing::info!(
                "Evicted {} idle checklist sessions, {} still open",
                evicted,
                self.session_service.open_sessions().await
            );
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::definitions::models::ChecklistType;
    use crate::features::definitions::DefinitionService;
    use crate::features::evidence::EvidenceService;
    use crate::features::vehicles::VehicleService;
    use crate::modules::persistence::FleetStore;
    use crate::shared::test_helpers::{test_driver, InMemoryEvidenceStore, InMemoryFleetStore};

    #[tokio::test]
    async fn test_sweep_evicts_only_idle_sessions() {
        let store: Arc<dyn FleetStore> = Arc::new(InMemoryFleetStore::new());
        let service = Arc::new(SessionService::new(
            store.clone(),
            Arc::new(DefinitionService::new(store.clone())),
            Arc::new(VehicleService::new(store)),
            Arc::new(EvidenceService::new(Arc::new(InMemoryEvidenceStore::new()))),
        ));
        service
            .start(test_driver(), ChecklistType::Cargo)
            .await
            .unwrap();

        let patient = SessionSweeper::new(
            service.clone(),
            &SessionConfig {
                idle_ttl: Duration::from_secs(3600),
                sweep_interval: Duration::from_secs(60),
            },
        );
        assert_eq!(patient.sweep().await, 0);

        let eager = SessionSweeper::new(
            service.clone(),
            &SessionConfig {
                idle_ttl: Duration::ZERO,
                sweep_interval: Duration::from_secs(60),
            },
        );
        assert_eq!(eager.sweep().await, 1);
        assert_eq!(service.open_sessions().await, 0);
    }
}
