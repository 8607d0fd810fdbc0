use thiserror::Error;

use crate::features::checklists::models::{AnswerStatus, ChecklistSubmission, SubmissionItem};
use crate::features::definitions::models::{all_items, ChecklistSection, ChecklistType};
use crate::features::vehicles::models::Vehicle;

use super::AnswerLedger;

/// Reasons a checklist cannot be submitted yet. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    #[error("Answer all items before submitting")]
    UnansweredItems(Vec<String>),

    #[error("Problem items require a photo and a comment")]
    MissingEvidence(Vec<String>),

    #[error("Select a vehicle before submitting")]
    NoVehicleSelected,
}

impl SubmissionRejection {
    /// Items responsible for the rejection
    pub fn item_ids(&self) -> &[String] {
        match self {
            SubmissionRejection::UnansweredItems(ids) => ids,
            SubmissionRejection::MissingEvidence(ids) => ids,
            SubmissionRejection::NoVehicleSelected => &[],
        }
    }
}

/// Who is submitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverIdentity {
    pub id: String,
    pub name: String,
}

/// Validate the ledger against the sections and build the submission payload
///
/// Labels are copied from the definitions as they are right now.
pub fn assemble_submission(
    driver: &DriverIdentity,
    checklist_type: ChecklistType,
    vehicle: Option<&Vehicle>,
    sections: &[ChecklistSection],
    ledger: &AnswerLedger,
) -> Result<ChecklistSubmission, SubmissionRejection> {
    let unanswered: Vec<String> = all_items(sections)
        .filter(|item| !ledger.status(&item.id).is_answered())
        .map(|item| item.id.clone())
        .collect();
    if !unanswered.is_empty() {
        return Err(SubmissionRejection::UnansweredItems(unanswered));
    }

    let missing_evidence: Vec<String> = all_items(sections)
        .filter(|item| {
            let entry = ledger.entry(&item.id);
            entry.status == AnswerStatus::Problem && !entry.has_required_evidence()
        })
        .map(|item| item.id.clone())
        .collect();
    if !missing_evidence.is_empty() {
        return Err(SubmissionRejection::MissingEvidence(missing_evidence));
    }

    let vehicle = vehicle.ok_or(SubmissionRejection::NoVehicleSelected)?;

    let items = all_items(sections)
        .filter_map(|item| {
            let entry = ledger.entry(&item.id);
            let status = entry.status.to_item_status()?;
            Some(SubmissionItem {
                item_id: item.id.clone(),
                label: item.name.clone(),
                status,
                photo: entry.photo,
                comment: entry.comment,
            })
        })
        .collect();

    Ok(ChecklistSubmission {
        vehicle_id: vehicle.id,
        driver_id: driver.id.clone(),
        driver_name: driver.name.clone(),
        checklist_type,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::checklists::models::{ItemStatus, PhotoRef};
    use crate::features::definitions::models::ChecklistItemDefinition;
    use crate::features::vehicles::models::VehicleKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn driver() -> DriverIdentity {
        DriverIdentity {
            id: "driver-1".to_string(),
            name: "Ana Souza".to_string(),
        }
    }

    fn tractor() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: "ABC-1234".to_string(),
            kind: VehicleKind::Tractor,
            brand: Some("Volvo".to_string()),
            model: Some("FH 540".to_string()),
            year: Some(2021),
            trailer_type: None,
            axle_count: None,
            created_at: Utc::now(),
        }
    }

    fn sections(items: &[(&str, &str)]) -> Vec<ChecklistSection> {
        vec![ChecklistSection {
            category: "Safety".to_string(),
            items: items
                .iter()
                .map(|(id, name)| ChecklistItemDefinition {
                    id: id.to_string(),
                    name: name.to_string(),
                    category: Some("Safety".to_string()),
                    vehicle_scope: None,
                })
                .collect(),
        }]
    }

    #[test]
    fn test_rejects_unanswered_items_first() {
        let sections = sections(&[("1", "Tires"), ("2", "Lights")]);
        let mut ledger = AnswerLedger::new();
        ledger.set_status("1", AnswerStatus::Problem);

        // no vehicle and missing evidence too, but unanswered wins
        let result = assemble_submission(
            &driver(),
            ChecklistType::Maintenance,
            None,
            &sections,
            &ledger,
        );

        assert_eq!(
            result,
            Err(SubmissionRejection::UnansweredItems(vec!["2".to_string()]))
        );
    }

    #[test]
    fn test_rejects_problem_without_photo() {
        let sections = sections(&[("5", "Windshield")]);
        let mut ledger = AnswerLedger::new();
        ledger.set_status("5", AnswerStatus::Problem);
        ledger.set_comment("5", "cracked");

        let vehicle = tractor();
        let result = assemble_submission(
            &driver(),
            ChecklistType::Maintenance,
            Some(&vehicle),
            &sections,
            &ledger,
        );

        assert_eq!(
            result,
            Err(SubmissionRejection::MissingEvidence(vec!["5".to_string()]))
        );
    }

    #[test]
    fn test_rejects_problem_with_whitespace_comment() {
        let sections = sections(&[("5", "Windshield")]);
        let mut ledger = AnswerLedger::new();
        ledger.set_status("5", AnswerStatus::Problem);
        ledger.set_photo("5", PhotoRef::new("photo-5").unwrap());
        ledger.set_comment("5", "   ");

        let vehicle = tractor();
        let result = assemble_submission(
            &driver(),
            ChecklistType::Maintenance,
            Some(&vehicle),
            &sections,
            &ledger,
        );

        assert!(matches!(
            result,
            Err(SubmissionRejection::MissingEvidence(_))
        ));
    }

    #[test]
    fn test_rejects_missing_vehicle_last() {
        let sections = sections(&[("1", "Tires")]);
        let mut ledger = AnswerLedger::new();
        ledger.set_status("1", AnswerStatus::Ok);

        let result = assemble_submission(
            &driver(),
            ChecklistType::Cargo,
            None,
            &sections,
            &ledger,
        );

        assert_eq!(result, Err(SubmissionRejection::NoVehicleSelected));
    }

    #[test]
    fn test_problem_item_accepted_after_photo_attached() {
        let sections = sections(&[("5", "Windshield")]);
        let mut ledger = AnswerLedger::new();
        ledger.set_status("5", AnswerStatus::Problem);
        ledger.set_comment("5", "cracked");

        let vehicle = tractor();
        assert!(assemble_submission(
            &driver(),
            ChecklistType::Maintenance,
            Some(&vehicle),
            &sections,
            &ledger,
        )
        .is_err());

        ledger.set_photo("5", PhotoRef::new("photo-ref-5").unwrap());
        let submission = assemble_submission(
            &driver(),
            ChecklistType::Maintenance,
            Some(&vehicle),
            &sections,
            &ledger,
        )
        .unwrap();

        assert_eq!(submission.vehicle_id, vehicle.id);
        assert_eq!(submission.driver_id, "driver-1");
        assert_eq!(submission.driver_name, "Ana Souza");
        assert_eq!(
            submission.items,
            vec![SubmissionItem {
                item_id: "5".to_string(),
                label: "Windshield".to_string(),
                status: ItemStatus::Problem,
                photo: PhotoRef::new("photo-ref-5"),
                comment: "cracked".to_string(),
            }]
        );
        assert!(submission.has_problems());
    }

    #[test]
    fn test_ok_items_need_no_evidence_and_keep_order() {
        let sections = vec![
            ChecklistSection {
                category: "Safety".to_string(),
                items: vec![ChecklistItemDefinition {
                    id: "2".to_string(),
                    name: "Lights".to_string(),
                    category: Some("Safety".to_string()),
                    vehicle_scope: None,
                }],
            },
            ChecklistSection {
                category: "Cab".to_string(),
                items: vec![ChecklistItemDefinition {
                    id: "1".to_string(),
                    name: "Horn".to_string(),
                    category: Some("Cab".to_string()),
                    vehicle_scope: None,
                }],
            },
        ];
        let mut ledger = AnswerLedger::new();
        ledger.set_status("1", AnswerStatus::Ok);
        ledger.set_status("2", AnswerStatus::Ok);
        ledger.set_comment("2", "optional note");

        let vehicle = tractor();
        let submission = assemble_submission(
            &driver(),
            ChecklistType::Maintenance,
            Some(&vehicle),
            &sections,
            &ledger,
        )
        .unwrap();

        let ids: Vec<&str> = submission.items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(submission.items[0].comment, "optional note");
        assert!(!submission.has_problems());
    }
}
