use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checklists::models::{ChecklistSubmission, ItemStatus};
use crate::features::definitions::models::{ChecklistItemDefinition, ChecklistType};
use crate::features::history::models::{
    ChecklistStatus, CorrectiveAction, NewCorrectiveAction, PersistedChecklist,
    PersistedChecklistItem,
};
use crate::features::vehicles::models::Vehicle;

use super::FleetStore;

#[derive(Debug, FromRow)]
struct ChecklistRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    checklist_type: ChecklistType,
    status: ChecklistStatus,
    vehicle_id: Option<Uuid>,
    vehicle_plate: Option<String>,
}

#[derive(Debug, FromRow)]
struct ChecklistItemRow {
    checklist_id: Uuid,
    item_id: Option<String>,
    item_name: Option<String>,
    status: ItemStatus,
    photo: Option<String>,
    comment: Option<String>,
}

impl From<ChecklistItemRow> for PersistedChecklistItem {
    fn from(row: ChecklistItemRow) -> Self {
        Self {
            id: row.item_id,
            name: row.item_name,
            status: row.status,
            comment: row.comment,
            photo: row.photo,
        }
    }
}

/// Postgres-backed [`FleetStore`]
pub struct PgFleetStore {
    pool: PgPool,
}

impl PgFleetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach items to their checklists, keeping the row order of `rows`
    async fn with_items(&self, rows: Vec<ChecklistRow>) -> Result<Vec<PersistedChecklist>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let item_rows = sqlx::query_as::<_, ChecklistItemRow>(
            r#"
            SELECT checklist_id, item_id, item_name, status, photo, comment
            FROM checklist_items
            WHERE checklist_id = ANY($1)
            ORDER BY checklist_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_checklist: HashMap<Uuid, Vec<PersistedChecklistItem>> = HashMap::new();
        for row in item_rows {
            items_by_checklist
                .entry(row.checklist_id)
                .or_default()
                .push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| PersistedChecklist {
                items: items_by_checklist.remove(&row.id).unwrap_or_default(),
                id: row.id,
                date: row.created_at,
                checklist_type: row.checklist_type,
                status: row.status,
                vehicle_id: row.vehicle_id,
                vehicle_plate: row.vehicle_plate,
            })
            .collect())
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn load_definitions(
        &self,
        checklist_type: ChecklistType,
    ) -> Result<Vec<ChecklistItemDefinition>> {
        let definitions = sqlx::query_as::<_, ChecklistItemDefinition>(
            r#"
            SELECT id, name, category, vehicle_scope
            FROM checklist_item_definitions
            WHERE checklist_type = $1 AND is_active = TRUE
            ORDER BY position, id
            "#,
        )
        .bind(checklist_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(definitions)
    }

    async fn load_vehicles_for_driver(&self, driver_id: &str) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT v.id, v.plate, v.kind, v.brand, v.model, v.year,
                   v.trailer_type, v.axle_count, v.created_at
            FROM vehicles v
            INNER JOIN driver_vehicles dv ON dv.vehicle_id = v.id
            WHERE dv.driver_id = $1
            ORDER BY v.kind, v.plate
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn submit_checklist(&self, submission: &ChecklistSubmission) -> Result<Uuid> {
        let checklist_id = Uuid::now_v7();
        let status = if submission.has_problems() {
            ChecklistStatus::Pending
        } else {
            ChecklistStatus::Completed
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO checklists (id, driver_id, driver_name, vehicle_id, checklist_type, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(checklist_id)
        .bind(&submission.driver_id)
        .bind(&submission.driver_name)
        .bind(submission.vehicle_id)
        .bind(submission.checklist_type)
        .bind(status)
        .execute(&mut *tx)
        .await?;

        for (position, item) in submission.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO checklist_items
                    (id, checklist_id, item_id, item_name, position, status, photo, comment)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::now_v7())
            .bind(checklist_id)
            .bind(&item.item_id)
            .bind(&item.label)
            .bind(position as i32)
            .bind(item.status)
            .bind(item.photo.as_ref().map(|p| p.as_str()))
            .bind(item.stored_comment())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Checklist stored: id={}, driver={}, vehicle={}, items={}, status={:?}",
            checklist_id,
            submission.driver_id,
            submission.vehicle_id,
            submission.items.len(),
            status
        );

        Ok(checklist_id)
    }

    async fn load_checklist_history(&self, driver_id: &str) -> Result<Vec<PersistedChecklist>> {
        let rows = sqlx::query_as::<_, ChecklistRow>(
            r#"
            SELECT c.id, c.created_at, c.checklist_type, c.status,
                   c.vehicle_id, v.plate AS vehicle_plate
            FROM checklists c
            LEFT JOIN vehicles v ON v.id = c.vehicle_id
            WHERE c.driver_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        self.with_items(rows).await
    }

    async fn load_checklist(&self, checklist_id: Uuid) -> Result<Option<PersistedChecklist>> {
        let row = sqlx::query_as::<_, ChecklistRow>(
            r#"
            SELECT c.id, c.created_at, c.checklist_type, c.status,
                   c.vehicle_id, v.plate AS vehicle_plate
            FROM checklists c
            LEFT JOIN vehicles v ON v.id = c.vehicle_id
            WHERE c.id = $1
            "#,
        )
        .bind(checklist_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_items(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn load_corrective_actions(&self, checklist_id: Uuid) -> Result<Vec<CorrectiveAction>> {
        let actions = sqlx::query_as::<_, CorrectiveAction>(
            r#"
            SELECT id, checklist_id, item_id, corrected_by, action_taken, verified, created_at
            FROM corrective_actions
            WHERE checklist_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(checklist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(actions)
    }

    async fn save_corrective_action(&self, action: &NewCorrectiveAction) -> Result<CorrectiveAction> {
        let saved = sqlx::query_as::<_, CorrectiveAction>(
            r#"
            INSERT INTO corrective_actions (id, checklist_id, item_id, corrected_by, action_taken)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, checklist_id, item_id, corrected_by, action_taken, verified, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(action.checklist_id)
        .bind(&action.item_id)
        .bind(&action.corrected_by)
        .bind(&action.action_taken)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                format!("Item {} already has a corrective action", action.item_id),
            ),
            other => AppError::Database(other),
        })?;

        tracing::info!(
            "Corrective action recorded: checklist={}, item={}",
            saved.checklist_id,
            saved.item_id
        );

        Ok(saved)
    }
}
