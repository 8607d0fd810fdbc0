use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checklists::dtos::{ItemAnswerDto, SessionViewDto, SubmissionResultDto};
use crate::features::checklists::models::{AnswerStatus, PhotoRef};
use crate::features::definitions::models::ChecklistType;
use crate::features::definitions::DefinitionService;
use crate::features::evidence::{EvidenceService, PhotoUpload};
use crate::features::vehicles::VehicleService;
use crate::modules::persistence::FleetStore;

use super::{ChecklistSession, DriverIdentity, Progress, ReloadTicket};

/// Owns every open checklist session and drives its boundary calls
///
/// Locks are only held for in-memory work; definition loads, uploads and the
/// final submission run with the lock released.
pub struct SessionService {
    store: Arc<dyn FleetStore>,
    definitions: Arc<DefinitionService>,
    vehicles: Arc<VehicleService>,
    evidence: Arc<EvidenceService>,
    sessions: Arc<RwLock<HashMap<Uuid, ChecklistSession>>>,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn FleetStore>,
        definitions: Arc<DefinitionService>,
        vehicles: Arc<VehicleService>,
        evidence: Arc<EvidenceService>,
    ) -> Self {
        Self {
            store,
            definitions,
            vehicles,
            evidence,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Open a session for a driver and load its first set of definitions
    pub async fn start(
        &self,
        driver: DriverIdentity,
        checklist_type: ChecklistType,
    ) -> Result<SessionViewDto> {
        let vehicles = self.vehicles.list_for_driver(&driver.id).await?;

        let mut session = ChecklistSession::new(driver, checklist_type, vehicles);
        let ticket = session.begin_reload();
        let session_id = session.id();

        tracing::info!(
            "Checklist session started: id={}, driver={}, type={}, vehicles={}",
            session_id,
            session.driver().id,
            checklist_type,
            session.vehicles().len()
        );

        self.sessions.write().await.insert(session_id, session);
        self.run_reload(session_id, ticket).await;
        self.view(session_id).await
    }

    pub async fn view(&self, session_id: Uuid) -> Result<SessionViewDto> {
        let mut sessions = self.sessions.write().await;
        let session = Self::lookup(&mut sessions, session_id)?;
        Ok(SessionViewDto::from(&*session))
    }

    pub async fn select_vehicle(&self, session_id: Uuid, vehicle_id: Uuid) -> Result<SessionViewDto> {
        let ticket = self
            .with_session(session_id, |session| session.select_vehicle(vehicle_id))
            .await?;
        if let Some(ticket) = ticket {
            tracing::debug!("Session {} switched to vehicle {}", session_id, vehicle_id);
            self.run_reload(session_id, ticket).await;
        }
        self.view(session_id).await
    }

    pub async fn set_checklist_type(
        &self,
        session_id: Uuid,
        checklist_type: ChecklistType,
    ) -> Result<SessionViewDto> {
        let ticket = self
            .with_session(session_id, |session| session.set_checklist_type(checklist_type))
            .await?;
        if let Some(ticket) = ticket {
            tracing::debug!("Session {} switched to {}", session_id, checklist_type);
            self.run_reload(session_id, ticket).await;
        }
        self.view(session_id).await
    }

    /// Load the current definitions again; answers are discarded
    pub async fn reload(&self, session_id: Uuid) -> Result<SessionViewDto> {
        let ticket = self
            .with_session(session_id, ChecklistSession::request_reload)
            .await?;
        self.run_reload(session_id, ticket).await;
        self.view(session_id).await
    }

    pub async fn set_status(
        &self,
        session_id: Uuid,
        item_id: &str,
        status: AnswerStatus,
    ) -> Result<ItemAnswerDto> {
        self.edit_item(session_id, item_id, |session| session.set_status(item_id, status))
            .await
    }

    pub async fn set_comment(
        &self,
        session_id: Uuid,
        item_id: &str,
        comment: String,
    ) -> Result<ItemAnswerDto> {
        self.edit_item(session_id, item_id, |session| session.set_comment(item_id, comment))
            .await
    }

    pub async fn set_photo(
        &self,
        session_id: Uuid,
        item_id: &str,
        reference: String,
    ) -> Result<ItemAnswerDto> {
        let photo = PhotoRef::new(reference)
            .ok_or_else(|| AppError::Validation("Photo reference must not be blank".to_string()))?;
        self.edit_item(session_id, item_id, |session| session.set_photo(item_id, photo))
            .await
    }

    pub async fn clear_photo(&self, session_id: Uuid, item_id: &str) -> Result<ItemAnswerDto> {
        self.edit_item(session_id, item_id, |session| session.clear_photo(item_id))
            .await
    }

    /// Store an uploaded photo and attach it to the item
    pub async fn upload_photo(
        &self,
        session_id: Uuid,
        item_id: &str,
        upload: PhotoUpload,
    ) -> Result<ItemAnswerDto> {
        let driver_id = self
            .with_session(session_id, |session| {
                if session.contains_item(item_id) {
                    Ok(session.driver().id.clone())
                } else {
                    Err(AppError::NotFound(format!(
                        "Item {} is not part of this checklist",
                        item_id
                    )))
                }
            })
            .await?;

        let photo = self
            .evidence
            .store_photo(upload, &driver_id, session_id, item_id)
            .await?;

        self.edit_item(session_id, item_id, |session| session.set_photo(item_id, photo))
            .await
    }

    pub async fn progress(&self, session_id: Uuid) -> Result<Progress> {
        self.with_session(session_id, |session| Ok(session.progress()))
            .await
    }

    /// Validate, then hand the checklist to persistence
    ///
    /// Rejections never reach the store. On success the session is closed;
    /// on a store failure it is reopened with every answer intact.
    pub async fn submit(&self, session_id: Uuid) -> Result<SubmissionResultDto> {
        let submission = self
            .with_session(session_id, ChecklistSession::prepare_submission)
            .await
            .inspect_err(|e| {
                if let AppError::Submission(rejection) = e {
                    tracing::info!(
                        "Submission rejected for session {}: {} ({:?})",
                        session_id,
                        rejection,
                        rejection.item_ids()
                    );
                }
            })?;

        match self.store.submit_checklist(&submission).await {
            Ok(checklist_id) => {
                self.sessions.write().await.remove(&session_id);
                tracing::info!(
                    "Checklist submitted: session={}, checklist={}, items={}",
                    session_id,
                    checklist_id,
                    submission.items.len()
                );
                Ok(SubmissionResultDto::new(checklist_id, &submission))
            }
            Err(e) => {
                if let Some(session) = self.sessions.write().await.get_mut(&session_id) {
                    session.abort_submission();
                }
                tracing::error!("Failed to submit session {}: {:?}", session_id, e);
                Err(AppError::SubmissionFailure(format!(
                    "{}; your answers were kept",
                    e.detail()
                )))
            }
        }
    }

    pub async fn discard(&self, session_id: Uuid) -> Result<()> {
        match self.sessions.write().await.remove(&session_id) {
            Some(_) => {
                tracing::info!("Checklist session discarded: {}", session_id);
                Ok(())
            }
            None => Err(Self::not_found(session_id)),
        }
    }

    /// Drop sessions idle for longer than `ttl`; returns how many were dropped
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() < ttl);
        before - sessions.len()
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Fetch definitions for `ticket` and apply them unless superseded
    async fn run_reload(&self, session_id: Uuid, ticket: ReloadTicket) {
        let definitions = self
            .definitions
            .fetch(ticket.checklist_type)
            .await
            .map_err(|e| match e {
                AppError::LoadFailure(message) => message,
                other => other.to_string(),
            });

        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&session_id) else {
            tracing::debug!("Session {} closed before definitions arrived", session_id);
            return;
        };

        if !session.apply_reload(ticket, definitions) {
            tracing::debug!(
                "Discarded stale definitions for session {} (generation {})",
                session_id,
                ticket.generation
            );
        }
    }

    async fn edit_item<F>(&self, session_id: Uuid, item_id: &str, edit: F) -> Result<ItemAnswerDto>
    where
        F: FnOnce(&mut ChecklistSession) -> Result<()>,
    {
        self.with_session(session_id, |session| {
            edit(session)?;
            Ok(ItemAnswerDto::new(
                item_id,
                session.answer(item_id),
                session.progress(),
            ))
        })
        .await
    }

    async fn with_session<T, F>(&self, session_id: Uuid, f: F) -> Result<T>
    where
        F: FnOnce(&mut ChecklistSession) -> Result<T>,
    {
        let mut sessions = self.sessions.write().await;
        let session = Self::lookup(&mut sessions, session_id)?;
        f(session)
    }

    fn lookup(
        sessions: &mut HashMap<Uuid, ChecklistSession>,
        session_id: Uuid,
    ) -> Result<&mut ChecklistSession> {
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| Self::not_found(session_id))?;
        session.touch();
        Ok(session)
    }

    fn not_found(session_id: Uuid) -> AppError {
        AppError::NotFound(format!("Checklist session {} not found", session_id))
    }
}
