//! Complaint status workflow.
//!
//! Statuses are free-text names. The well-known ones map to [`StatusKind`]
//! variants; anything else an admin creates is [`StatusKind::Custom`]. Every
//! transition is permitted. [`classify`] only labels a change so callers can
//! offer the one-click quick actions and log overrides.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::features::complaints::dtos::ComplaintResponseDto;
use crate::shared::constants::{MILLIS_PER_DAY, OVERDUE_AFTER_DAYS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Pending,
    InProgress,
    Resolved,
    Rejected,
    Custom(String),
}

impl StatusKind {
    /// Case-insensitive; "In Progress", "in_progress" and "inprogress" all match
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "pending" => StatusKind::Pending,
            "inprogress" => StatusKind::InProgress,
            "resolved" => StatusKind::Resolved,
            "rejected" => StatusKind::Rejected,
            _ => StatusKind::Custom(name.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusKind::Pending => "Pending",
            StatusKind::InProgress => "In Progress",
            StatusKind::Resolved => "Resolved",
            StatusKind::Rejected => "Rejected",
            StatusKind::Custom(name) => name,
        }
    }

    fn same_as(&self, other: &StatusKind) -> bool {
        match (self, other) {
            (StatusKind::Custom(a), StatusKind::Custom(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two one-click buttons offered on a complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    StartProgress,
    MarkResolved,
}

impl QuickAction {
    pub fn label(self) -> &'static str {
        match self {
            QuickAction::StartProgress => "Start Progress",
            QuickAction::MarkResolved => "Mark Resolved",
        }
    }

    pub fn target(self) -> StatusKind {
        match self {
            QuickAction::StartProgress => StatusKind::InProgress,
            QuickAction::MarkResolved => StatusKind::Resolved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    QuickAction(QuickAction),
    /// Any other change, made through the generic status picker
    Override,
    NoChange,
}

/// Quick action available from `current`, if any
pub fn quick_action(current: &StatusKind) -> Option<QuickAction> {
    match current {
        StatusKind::Pending => Some(QuickAction::StartProgress),
        StatusKind::InProgress => Some(QuickAction::MarkResolved),
        _ => None,
    }
}

/// Every (from, to) pair is allowed
pub fn is_permitted(_from: &StatusKind, _to: &StatusKind) -> bool {
    true
}

pub fn classify(from: &StatusKind, to: &StatusKind) -> Transition {
    if from.same_as(to) {
        return Transition::NoChange;
    }
    match quick_action(from) {
        Some(action) if action.target() == *to => Transition::QuickAction(action),
        _ => Transition::Override,
    }
}

/// Whole days since `created_on`, floored
pub fn days_pending(created_on: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_on)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

pub fn is_overdue(created_on: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    days_pending(created_on, now) > OVERDUE_AFTER_DAYS
}

/// Receipt for a status change applied locally before the server confirmed it
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "call rollback if the update fails"]
pub struct OptimisticUpdate {
    complaint_id: Uuid,
    previous_status_id: Option<Uuid>,
    previous_name: String,
}

impl OptimisticUpdate {
    /// Set the status on the matching complaint; `None` if it is not in the list
    pub fn apply(
        complaints: &mut [ComplaintResponseDto],
        complaint_id: Uuid,
        status_id: Uuid,
        status_name: &str,
    ) -> Option<Self> {
        let complaint = complaints.iter_mut().find(|c| c.id == complaint_id)?;
        let receipt = Self {
            complaint_id,
            previous_status_id: complaint.status_id,
            previous_name: std::mem::replace(&mut complaint.status_name, status_name.to_string()),
        };
        complaint.status_id = Some(status_id);
        Some(receipt)
    }

    /// Restore the status captured by [`OptimisticUpdate::apply`]
    pub fn rollback(self, complaints: &mut [ComplaintResponseDto]) {
        if let Some(complaint) = complaints.iter_mut().find(|c| c.id == self.complaint_id) {
            complaint.status_id = self.previous_status_id;
            complaint.status_name = self.previous_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_kind_matching() {
        assert_eq!(StatusKind::from_name("pending"), StatusKind::Pending);
        assert_eq!(StatusKind::from_name(" In Progress "), StatusKind::InProgress);
        assert_eq!(StatusKind::from_name("in_progress"), StatusKind::InProgress);
        assert_eq!(StatusKind::from_name("INPROGRESS"), StatusKind::InProgress);
        assert_eq!(StatusKind::from_name("Resolved"), StatusKind::Resolved);
        assert_eq!(StatusKind::from_name("rejected"), StatusKind::Rejected);
        assert_eq!(
            StatusKind::from_name("Escalated"),
            StatusKind::Custom("Escalated".to_string())
        );
        assert_eq!(StatusKind::from_name("in_progress").label(), "In Progress");
    }

    #[test]
    fn test_every_transition_is_permitted() {
        let all = [
            StatusKind::Pending,
            StatusKind::InProgress,
            StatusKind::Resolved,
            StatusKind::Rejected,
            StatusKind::Custom("Escalated".to_string()),
        ];
        for from in &all {
            for to in &all {
                assert!(is_permitted(from, to));
            }
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(&StatusKind::Pending, &StatusKind::InProgress),
            Transition::QuickAction(QuickAction::StartProgress)
        );
        assert_eq!(
            classify(&StatusKind::InProgress, &StatusKind::Resolved),
            Transition::QuickAction(QuickAction::MarkResolved)
        );
        assert_eq!(
            classify(&StatusKind::Resolved, &StatusKind::Pending),
            Transition::Override
        );
        assert_eq!(
            classify(&StatusKind::Pending, &StatusKind::Resolved),
            Transition::Override
        );
        assert_eq!(
            classify(&StatusKind::Rejected, &StatusKind::Rejected),
            Transition::NoChange
        );
        assert_eq!(
            classify(
                &StatusKind::Custom("Escalated".into()),
                &StatusKind::Custom("ESCALATED".into())
            ),
            Transition::NoChange
        );
    }

    #[test]
    fn test_quick_actions() {
        let start = quick_action(&StatusKind::Pending).unwrap();
        assert_eq!(start.label(), "Start Progress");
        assert_eq!(start.target(), StatusKind::InProgress);

        let resolve = quick_action(&StatusKind::InProgress).unwrap();
        assert_eq!(resolve.label(), "Mark Resolved");
        assert_eq!(resolve.target(), StatusKind::Resolved);

        assert_eq!(quick_action(&StatusKind::Resolved), None);
        assert_eq!(quick_action(&StatusKind::Custom("x".into())), None);
    }

    #[test]
    fn test_days_pending_and_overdue() {
        let created = Utc::now();

        assert_eq!(days_pending(created, created + Duration::hours(23)), 0);
        assert_eq!(days_pending(created, created + Duration::days(6)), 6);
        assert!(!is_overdue(created, created + Duration::days(6)));

        // exactly seven days is not yet overdue
        assert!(!is_overdue(created, created + Duration::days(7)));
        assert!(!is_overdue(
            created,
            created + Duration::days(8) - Duration::milliseconds(1)
        ));
        assert!(is_overdue(created, created + Duration::days(8)));
    }

    fn complaint(status_name: &str) -> ComplaintResponseDto {
        let now = Utc::now();
        ComplaintResponseDto {
            id: Uuid::new_v4(),
            title: "Pothole".to_string(),
            description: "Deep pothole on Main St".to_string(),
            category_id: None,
            category_name: "Road Maintenance".to_string(),
            status_id: Some(Uuid::new_v4()),
            status_name: status_name.to_string(),
            user_id: Uuid::new_v4(),
            user_name: "Citizen".to_string(),
            user_email: "citizen@example.com".to_string(),
            latitude: None,
            longitude: None,
            media_url: None,
            created_on: now,
            last_modified_on: now,
        }
    }

    #[test]
    fn test_optimistic_update_and_rollback() {
        let mut list = vec![complaint("Pending"), complaint("Resolved")];
        let target = list[0].id;
        let original = list.clone();
        let new_status = Uuid::new_v4();

        let receipt = OptimisticUpdate::apply(&mut list, target, new_status, "In Progress").unwrap();
        assert_eq!(list[0].status_name, "In Progress");
        assert_eq!(list[0].status_id, Some(new_status));
        assert_eq!(list[1], original[1]);

        receipt.rollback(&mut list);
        assert_eq!(list, original);
    }

    #[test]
    fn test_optimistic_update_unknown_complaint() {
        let mut list = vec![complaint("Pending")];
        assert!(OptimisticUpdate::apply(&mut list, Uuid::new_v4(), Uuid::new_v4(), "x").is_none());
    }
}
