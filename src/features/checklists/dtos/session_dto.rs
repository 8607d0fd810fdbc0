use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::checklists::models::{
    AnswerEntry, AnswerStatus, ChecklistSubmission, ItemStatus, PhotoRef,
};
use crate::features::checklists::services::{ChecklistSession, Progress};
use crate::features::definitions::models::ChecklistType;
use crate::features::vehicles::dtos::VehicleResponseDto;

/// Request DTO for starting a checklist session
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionDto {
    #[validate(length(min = 1, max = 128, message = "Driver id must be 1-128 characters"))]
    pub driver_id: String,

    #[validate(length(min = 1, max = 200, message = "Driver name must be 1-200 characters"))]
    pub driver_name: String,

    pub checklist_type: ChecklistType,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectVehicleDto {
    pub vehicle_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetChecklistTypeDto {
    pub checklist_type: ChecklistType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusDto {
    pub status: AnswerStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetCommentDto {
    #[validate(length(max = 2000, message = "Comment must not exceed 2000 characters"))]
    pub comment: String,
}

/// Attach an already-stored photo by reference
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetPhotoDto {
    #[validate(length(min = 1, max = 2048, message = "Photo reference must be 1-2048 characters"))]
    pub photo: String,
}

/// Multipart form for capturing a photo
#[derive(Debug, ToSchema)]
pub struct UploadPhotoDto {
    /// JPEG, PNG, WebP or HEIC image, at most 10 MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photo: String,
}

/// One item with its current answer
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionItemDto {
    pub id: String,
    pub name: String,
    pub status: AnswerStatus,
    pub photo: Option<PhotoRef>,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSectionDto {
    pub category: String,
    pub items: Vec<SessionItemDto>,
}

/// Full state of a checklist session
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewDto {
    pub id: Uuid,
    pub driver_id: String,
    pub driver_name: String,
    pub checklist_type: ChecklistType,
    pub vehicles: Vec<VehicleResponseDto>,
    pub selected_vehicle_id: Option<Uuid>,
    pub loading: bool,
    /// Set when the last definition load failed; retry via the reload endpoint
    pub load_error: Option<String>,
    pub sections: Vec<SessionSectionDto>,
    pub progress: Progress,
    pub created_at: DateTime<Utc>,
}

impl From<&ChecklistSession> for SessionViewDto {
    fn from(session: &ChecklistSession) -> Self {
        let sections = session
            .sections()
            .iter()
            .map(|section| SessionSectionDto {
                category: section.category.clone(),
                items: section
                    .items
                    .iter()
                    .map(|item| {
                        let answer = session.answer(&item.id);
                        SessionItemDto {
                            id: item.id.clone(),
                            name: item.name.clone(),
                            status: answer.status,
                            photo: answer.photo,
                            comment: answer.comment,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: session.id(),
            driver_id: session.driver().id.clone(),
            driver_name: session.driver().name.clone(),
            checklist_type: session.checklist_type(),
            vehicles: session.vehicles().iter().map(VehicleResponseDto::from).collect(),
            selected_vehicle_id: session.selected_vehicle().map(|v| v.id),
            loading: session.is_loading(),
            load_error: session.load_error().map(String::from),
            sections,
            progress: session.progress(),
            created_at: session.created_at(),
        }
    }
}

/// Answer of one item after an edit, with the updated progress
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemAnswerDto {
    pub item_id: String,
    pub status: AnswerStatus,
    pub photo: Option<PhotoRef>,
    pub comment: String,
    pub progress: Progress,
}

impl ItemAnswerDto {
    pub fn new(item_id: &str, answer: AnswerEntry, progress: Progress) -> Self {
        Self {
            item_id: item_id.to_string(),
            status: answer.status,
            photo: answer.photo,
            comment: answer.comment,
            progress,
        }
    }
}

/// Outcome of a successful submission
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResultDto {
    pub checklist_id: Uuid,
    pub checklist_type: ChecklistType,
    pub vehicle_id: Uuid,
    pub item_count: usize,
    pub problem_count: usize,
}

impl SubmissionResultDto {
    pub fn new(checklist_id: Uuid, submission: &ChecklistSubmission) -> Self {
        Self {
            checklist_id,
            checklist_type: submission.checklist_type,
            vehicle_id: submission.vehicle_id,
            item_count: submission.items.len(),
            problem_count: submission
                .items
                .iter()
                .filter(|item| item.status == ItemStatus::Problem)
                .count(),
        }
    }
}
