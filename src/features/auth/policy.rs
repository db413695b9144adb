//! Role-based access policy.
//!
//! The permission table is a pure function of [`Role`]: admins hold every
//! flag, users hold the handful needed to file and follow their own
//! complaints. [`check_access`] is the view-gating counterpart used by
//! clients; the server enforces the same rules through the guards in
//! [`crate::features::auth::guards`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::Role;

/// A single capability in the permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewDashboard,
    CreateComplaint,
    ViewOwnComplaints,
    ViewAllComplaints,
    UpdateComplaintStatus,
    DeleteComplaint,
    ExportComplaints,
    ViewCategories,
    CreateCategory,
    EditCategory,
    DeleteCategory,
    ViewStatuses,
    CreateStatus,
    EditStatus,
    DeleteStatus,
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,
    ChangeUserRole,
    ViewAnalytics,
    ViewReports,
    ManageSettings,
    ViewAuditLog,
    EditProfile,
}

impl Permission {
    pub const ALL: [Permission; 25] = [
        Permission::ViewDashboard,
        Permission::CreateComplaint,
        Permission::ViewOwnComplaints,
        Permission::ViewAllComplaints,
        Permission::UpdateComplaintStatus,
        Permission::DeleteComplaint,
        Permission::ExportComplaints,
        Permission::ViewCategories,
        Permission::CreateCategory,
        Permission::EditCategory,
        Permission::DeleteCategory,
        Permission::ViewStatuses,
        Permission::CreateStatus,
        Permission::EditStatus,
        Permission::DeleteStatus,
        Permission::ViewUsers,
        Permission::CreateUser,
        Permission::EditUser,
        Permission::DeleteUser,
        Permission::ChangeUserRole,
        Permission::ViewAnalytics,
        Permission::ViewReports,
        Permission::ManageSettings,
        Permission::ViewAuditLog,
        Permission::EditProfile,
    ];

    /// Granted to every signed-in user regardless of role
    pub fn is_baseline(self) -> bool {
        matches!(
            self,
            Permission::ViewDashboard
                | Permission::CreateComplaint
                | Permission::ViewOwnComplaints
                | Permission::ViewCategories
                | Permission::ViewStatuses
                | Permission::EditProfile
        )
    }
}

/// The full permission table for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_view_dashboard: bool,
    pub can_create_complaint: bool,
    pub can_view_own_complaints: bool,
    pub can_view_all_complaints: bool,
    pub can_update_complaint_status: bool,
    pub can_delete_complaint: bool,
    pub can_export_complaints: bool,
    pub can_view_categories: bool,
    pub can_create_category: bool,
    pub can_edit_category: bool,
    pub can_delete_category: bool,
    pub can_view_statuses: bool,
    pub can_create_status: bool,
    pub can_edit_status: bool,
    pub can_delete_status: bool,
    pub can_view_users: bool,
    pub can_create_user: bool,
    pub can_edit_user: bool,
    pub can_delete_user: bool,
    pub can_change_user_role: bool,
    pub can_view_analytics: bool,
    pub can_view_reports: bool,
    pub can_manage_settings: bool,
    pub can_view_audit_log: bool,
    pub can_edit_profile: bool,
}

impl Permissions {
    pub fn for_role(role: Role) -> Self {
        let mut permissions = Self::default();
        for permission in Permission::ALL {
            if role.is_admin() || permission.is_baseline() {
                *permissions.flag_mut(permission) = true;
            }
        }
        permissions
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ViewDashboard => self.can_view_dashboard,
            Permission::CreateComplaint => self.can_create_complaint,
            Permission::ViewOwnComplaints => self.can_view_own_complaints,
            Permission::ViewAllComplaints => self.can_view_all_complaints,
            Permission::UpdateComplaintStatus => self.can_update_complaint_status,
            Permission::DeleteComplaint => self.can_delete_complaint,
            Permission::ExportComplaints => self.can_export_complaints,
            Permission::ViewCategories => self.can_view_categories,
            Permission::CreateCategory => self.can_create_category,
            Permission::EditCategory => self.can_edit_category,
            Permission::DeleteCategory => self.can_delete_category,
            Permission::ViewStatuses => self.can_view_statuses,
            Permission::CreateStatus => self.can_create_status,
            Permission::EditStatus => self.can_edit_status,
            Permission::DeleteStatus => self.can_delete_status,
            Permission::ViewUsers => self.can_view_users,
            Permission::CreateUser => self.can_create_user,
            Permission::EditUser => self.can_edit_user,
            Permission::DeleteUser => self.can_delete_user,
            Permission::ChangeUserRole => self.can_change_user_role,
            Permission::ViewAnalytics => self.can_view_analytics,
            Permission::ViewReports => self.can_view_reports,
            Permission::ManageSettings => self.can_manage_settings,
            Permission::ViewAuditLog => self.can_view_audit_log,
            Permission::EditProfile => self.can_edit_profile,
        }
    }

    fn flag_mut(&mut self, permission: Permission) -> &mut bool {
        match permission {
            Permission::ViewDashboard => &mut self.can_view_dashboard,
            Permission::CreateComplaint => &mut self.can_create_complaint,
            Permission::ViewOwnComplaints => &mut self.can_view_own_complaints,
            Permission::ViewAllComplaints => &mut self.can_view_all_complaints,
            Permission::UpdateComplaintStatus => &mut self.can_update_complaint_status,
            Permission::DeleteComplaint => &mut self.can_delete_complaint,
            Permission::ExportComplaints => &mut self.can_export_complaints,
            Permission::ViewCategories => &mut self.can_view_categories,
            Permission::CreateCategory => &mut self.can_create_category,
            Permission::EditCategory => &mut self.can_edit_category,
            Permission::DeleteCategory => &mut self.can_delete_category,
            Permission::ViewStatuses => &mut self.can_view_statuses,
            Permission::CreateStatus => &mut self.can_create_status,
            Permission::EditStatus => &mut self.can_edit_status,
            Permission::DeleteStatus => &mut self.can_delete_status,
            Permission::ViewUsers => &mut self.can_view_users,
            Permission::CreateUser => &mut self.can_create_user,
            Permission::EditUser => &mut self.can_edit_user,
            Permission::DeleteUser => &mut self.can_delete_user,
            Permission::ChangeUserRole => &mut self.can_change_user_role,
            Permission::ViewAnalytics => &mut self.can_view_analytics,
            Permission::ViewReports => &mut self.can_view_reports,
            Permission::ManageSettings => &mut self.can_manage_settings,
            Permission::ViewAuditLog => &mut self.can_view_audit_log,
            Permission::EditProfile => &mut self.can_edit_profile,
        }
    }
}

/// What a protected view needs before it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Role(Role),
    Permission(Permission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No session; callers redirect to login
    Unauthenticated,
    /// Signed in but lacking the role or permission ("Access Denied")
    Denied,
}

/// Gate a view on the current role. `None` means nobody is signed in.
///
/// This is presentation gating only; the backend re-checks every request.
pub fn check_access(role: Option<Role>, requirement: Requirement) -> Access {
    let Some(role) = role else {
        return Access::Unauthenticated;
    };

    let granted = match requirement {
        Requirement::Authenticated => true,
        Requirement::Role(required) => role == required || role.is_admin(),
        Requirement::Permission(permission) => Permissions::for_role(role).allows(permission),
    };

    if granted {
        Access::Granted
    } else {
        Access::Denied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_holds_every_permission() {
        let admin = Permissions::for_role(Role::Admin);
        for permission in Permission::ALL {
            assert!(admin.allows(permission), "{:?}", permission);
        }
        assert!(admin.can_delete_category);
    }

    #[test]
    fn test_user_holds_only_baseline() {
        let user = Permissions::for_role(Role::User);
        for permission in Permission::ALL {
            assert_eq!(
                user.allows(permission),
                permission.is_baseline(),
                "{:?}",
                permission
            );
        }
        assert!(!user.can_delete_category);
        assert!(user.can_create_complaint);
    }

    #[test]
    fn test_table_has_25_flags() {
        let value = serde_json::to_value(Permissions::for_role(Role::Admin)).unwrap();
        let flags = value.as_object().unwrap();
        assert_eq!(flags.len(), 25);
        assert!(flags.values().all(|v| v == &serde_json::json!(true)));
        assert_eq!(flags["canDeleteCategory"], serde_json::json!(true));
    }

    #[test]
    fn test_check_access() {
        assert_eq!(
            check_access(None, Requirement::Authenticated),
            Access::Unauthenticated
        );
        assert_eq!(
            check_access(Some(Role::User), Requirement::Role(Role::Admin)),
            Access::Denied
        );
        assert_eq!(
            check_access(Some(Role::Admin), Requirement::Role(Role::User)),
            Access::Granted
        );
        assert_eq!(
            check_access(
                Some(Role::User),
                Requirement::Permission(Permission::DeleteCategory)
            ),
            Access::Denied
        );
        assert_eq!(
            check_access(
                Some(Role::User),
                Requirement::Permission(Permission::CreateComplaint)
            ),
            Access::Granted
        );
    }
}
