//! Requirement tables declared by the backend's resource handlers.

use crate::catalog::{codes, module_codes};
use crate::{AuthorizationConfig, PermissionCode, ResourceOperation};

macro_rules! resource_operations {
    (
        $(#[$meta:meta])*
        $name:ident => $resource:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $operation:literal, $code:expr;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl ResourceOperation for $name {
            const RESOURCE: &'static str = $resource;

            fn all() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $operation,)+
                }
            }

            fn required_code(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }
    };
}

resource_operations! {
    /// Role administration operations.
    RoleOperation => "roles" {
        /// Lists roles.
        List => "list", Some(codes::ROLES_LIST);
        /// Reads one role.
        Retrieve => "retrieve", Some(codes::ROLES_LIST);
        /// Creates a role.
        Create => "create", Some(codes::ROLES_CREATE);
        /// Replaces a role.
        Update => "update", Some(codes::ROLES_UPDATE);
        /// Patches a role.
        PartialUpdate => "partial_update", Some(codes::ROLES_UPDATE);
        /// Deletes a role.
        Destroy => "destroy", Some(codes::ROLES_DELETE);
        /// Activates or deactivates a role.
        ToggleStatus => "toggle_status", Some(codes::ROLES_UPDATE);
        /// Replaces the role permission set.
        SetPermissions => "set_permissions", Some(codes::ROLES_UPDATE_PERMISSIONS);
        /// Lists the role permission codes.
        GetPermissions => "get_permissions_list", Some(codes::ROLES_LIST);
    }
}

resource_operations! {
    /// User administration operations.
    UserOperation => "users" {
        /// Lists users.
        List => "list", Some(codes::USERS_LIST);
        /// Reads one user.
        Retrieve => "retrieve", Some(codes::USERS_LIST);
        /// Creates a user.
        Create => "create", Some(codes::USERS_CREATE);
        /// Replaces a user.
        Update => "update", Some(codes::USERS_UPDATE);
        /// Patches a user.
        PartialUpdate => "partial_update", Some(codes::USERS_UPDATE);
        /// Deletes a user.
        Destroy => "destroy", Some(codes::USERS_DELETE);
        /// Enables or disables a user.
        ToggleActiveStatus => "toggle_active_status", Some(codes::USERS_UPDATE);
        /// Changes a user's password.
        ChangePassword => "change_password", Some(codes::USERS_CHANGE_PASSWORD);
        /// Lists roles assignable to users.
        ListRoles => "list_roles", Some(codes::USERS_LIST);
        /// Assigns or clears a user's role.
        AssignRole => "assign_role", Some(codes::USERS_UPDATE);
    }
}

resource_operations! {
    /// Ministry operations.
    MinistryOperation => "ministries" {
        /// Lists ministries.
        List => "list", Some(codes::MINISTRIES_LIST);
        /// Reads one ministry.
        Retrieve => "retrieve", Some(codes::MINISTRIES_LIST);
        /// Creates a ministry.
        Create => "create", Some(codes::MINISTRIES_CREATE);
        /// Replaces a ministry.
        Update => "update", Some(codes::MINISTRIES_UPDATE);
        /// Patches a ministry.
        PartialUpdate => "partial_update", Some(codes::MINISTRIES_UPDATE);
        /// Deletes a ministry. No requirement is declared for it.
        Destroy => "destroy", None;
        /// Toggles ministry state.
        ToggleStatus => "toggle_status", Some(codes::MINISTRIES_UPDATE);
        /// Lists the managers of a ministry.
        ManagersByMinistry => "managers_by_ministry", Some(codes::MANAGERS_LIST);
    }
}

resource_operations! {
    /// Ministry manager operations.
    ManagerOperation => "managers" {
        /// Lists managers.
        List => "list", Some(codes::MANAGERS_LIST);
        /// Reads one manager.
        Retrieve => "retrieve", Some(codes::MANAGERS_LIST);
        /// Creates a manager.
        Create => "create", Some(codes::MANAGERS_CREATE);
        /// Replaces a manager.
        Update => "update", Some(codes::MANAGERS_UPDATE);
        /// Patches a manager.
        PartialUpdate => "partial_update", Some(codes::MANAGERS_UPDATE);
        /// Deletes a manager. No requirement is declared for it.
        Destroy => "destroy", None;
        /// Toggles manager state.
        ToggleStatus => "toggle_status", Some(codes::MANAGERS_UPDATE);
    }
}

resource_operations! {
    /// Course catalog operations.
    CourseOperation => "courses" {
        /// Lists courses.
        List => "list", Some(codes::COURSES_LIST);
        /// Reads one course.
        Retrieve => "retrieve", Some(codes::COURSES_LIST);
        /// Creates a course.
        Create => "create", Some(codes::COURSES_CREATE);
        /// Replaces a course.
        Update => "update", Some(codes::COURSES_UPDATE);
        /// Patches a course.
        PartialUpdate => "partial_update", Some(codes::COURSES_UPDATE);
        /// Deletes a course.
        Destroy => "destroy", Some(codes::COURSES_DELETE);
        /// Toggles course state.
        ToggleStatus => "toggle_status", Some(codes::COURSES_UPDATE);
        /// Counts a course view.
        IncrementViews => "increment_views", Some(codes::COURSES_LIST);
        /// Lists active courses.
        Active => "active", Some(codes::COURSES_LIST_ACTIVE);
    }
}

resource_operations! {
    /// Read-only department operations.
    DepartmentOperation => "departments" {
        /// Lists departments.
        List => "list", Some(codes::DEPARTMENTS_LIST);
        /// Reads one department.
        Retrieve => "retrieve", Some(codes::DEPARTMENTS_LIST);
    }
}

resource_operations! {
    /// Permission tree presentation.
    PermissionTreeOperation => "permission_tree" {
        /// Reads the full tree; open to any authenticated caller.
        Read => "read", None;
    }
}

resource_operations! {
    /// Calls for proposals.
    CallOperation => "calls" {
        /// Lists calls.
        List => "list", Some(module_codes::CALLS_LIST);
        /// Reads one call.
        Retrieve => "retrieve", Some(module_codes::CALLS_LIST);
        /// Creates a call.
        Create => "create", Some(module_codes::CALLS_CREATE);
        /// Replaces a call.
        Update => "update", Some(module_codes::CALLS_UPDATE);
        /// Patches a call.
        PartialUpdate => "partial_update", Some(module_codes::CALLS_UPDATE);
        /// Deletes a call.
        Destroy => "destroy", Some(module_codes::CALLS_DELETE);
        /// Toggles call state.
        ToggleStatus => "toggle_status", Some(module_codes::CALLS_UPDATE);
        /// Lists calls together with their dates.
        WithDates => "with_dates", Some(module_codes::CALLS_LIST);
    }
}

resource_operations! {
    /// Call date operations.
    CallDateOperation => "call_dates" {
        /// Lists call dates.
        List => "list", Some(module_codes::CALL_DATES_LIST);
        /// Reads one call date.
        Retrieve => "retrieve", Some(module_codes::CALL_DATES_LIST);
        /// Creates a call date.
        Create => "create", Some(module_codes::CALL_DATES_CREATE);
        /// Replaces a call date.
        Update => "update", Some(module_codes::CALL_DATES_UPDATE);
        /// Patches a call date.
        PartialUpdate => "partial_update", Some(module_codes::CALL_DATES_UPDATE);
        /// Deletes a call date.
        Destroy => "destroy", Some(module_codes::CALL_DATES_DELETE);
        /// Toggles call date state.
        ToggleStatus => "toggle_status", Some(module_codes::CALL_DATES_UPDATE);
        /// Notifies subscribers about a call date.
        SendNotification => "send_notification", Some(module_codes::CALL_DATES_CREATE);
    }
}

resource_operations! {
    /// Call date attachment operations.
    CallDateFileOperation => "call_date_files" {
        List => "list", Some(module_codes::CALL_DATE_FILES_LIST);
        Retrieve => "retrieve", Some(module_codes::CALL_DATE_FILES_LIST);
        Create => "create", Some(module_codes::CALL_DATE_FILES_CREATE);
        Destroy => "destroy", Some(module_codes::CALL_DATE_FILES_DELETE);
    }
}

resource_operations! {
    /// Seal type operations.
    SealTypeOperation => "seal_types" {
        List => "list", Some(module_codes::SEAL_TYPES_LIST);
        Retrieve => "retrieve", Some(module_codes::SEAL_TYPES_LIST);
        Create => "create", Some(module_codes::SEAL_TYPES_CREATE);
        Update => "update", Some(module_codes::SEAL_TYPES_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::SEAL_TYPES_UPDATE);
        Destroy => "destroy", Some(module_codes::SEAL_TYPES_DELETE);
    }
}

resource_operations! {
    /// Certification requirement operations.
    RequirementOperation => "requirements" {
        List => "list", Some(module_codes::REQUIREMENTS_LIST);
        Retrieve => "retrieve", Some(module_codes::REQUIREMENTS_LIST);
        Create => "create", Some(module_codes::REQUIREMENTS_CREATE);
        Update => "update", Some(module_codes::REQUIREMENTS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::REQUIREMENTS_UPDATE);
        Destroy => "destroy", Some(module_codes::REQUIREMENTS_DELETE);
    }
}

resource_operations! {
    /// Evaluation checklist operations.
    EvaluationChecklistOperation => "evaluation_checklists" {
        List => "list", Some(module_codes::EVALUATION_CHECKLISTS_LIST);
        Retrieve => "retrieve", Some(module_codes::EVALUATION_CHECKLISTS_LIST);
        Create => "create", Some(module_codes::EVALUATION_CHECKLISTS_CREATE);
        Update => "update", Some(module_codes::EVALUATION_CHECKLISTS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::EVALUATION_CHECKLISTS_UPDATE);
        Destroy => "destroy", Some(module_codes::EVALUATION_CHECKLISTS_DELETE);
    }
}

resource_operations! {
    /// Evaluation operations.
    EvaluationOperation => "evaluations" {
        List => "list", Some(module_codes::EVALUATIONS_LIST);
        Retrieve => "retrieve", Some(module_codes::EVALUATIONS_LIST);
        Create => "create", Some(module_codes::EVALUATIONS_CREATE);
        Update => "update", Some(module_codes::EVALUATIONS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::EVALUATIONS_UPDATE);
        Destroy => "destroy", Some(module_codes::EVALUATIONS_DELETE);
        /// Moves an evaluation to another state.
        ChangeStatus => "change_status", Some(module_codes::EVALUATIONS_UPDATE);
    }
}

resource_operations! {
    /// Requirement input operations.
    RequirementInputOperation => "requirement_inputs" {
        List => "list", Some(module_codes::REQUIREMENT_INPUTS_LIST);
        Retrieve => "retrieve", Some(module_codes::REQUIREMENT_INPUTS_LIST);
        Create => "create", Some(module_codes::REQUIREMENT_INPUTS_CREATE);
        Update => "update", Some(module_codes::REQUIREMENT_INPUTS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::REQUIREMENT_INPUTS_UPDATE);
        Destroy => "destroy", Some(module_codes::REQUIREMENT_INPUTS_DELETE);
    }
}

resource_operations! {
    /// Company operations.
    CompanyOperation => "companies" {
        List => "list", Some(module_codes::COMPANIES_VIEW);
        Retrieve => "retrieve", Some(module_codes::COMPANIES_VIEW);
        Create => "create", Some(module_codes::COMPANIES_CREATE);
        Update => "update", Some(module_codes::COMPANIES_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::COMPANIES_UPDATE);
        Destroy => "destroy", Some(module_codes::COMPANIES_DELETE);
        /// Toggles company state.
        ToggleStatus => "toggle_status", Some(module_codes::COMPANIES_UPDATE);
        /// Lists the users of a company.
        ListUsers => "list_users", Some(module_codes::COMPANIES_VIEW);
        /// Lists the departments a company operates in.
        ListDepartments => "list_departments", Some(module_codes::COMPANIES_VIEW);
    }
}

resource_operations! {
    /// Advisory operations.
    AdvisoryOperation => "advisories" {
        List => "list", Some(module_codes::ADVISORIES_VIEW);
        Retrieve => "retrieve", Some(module_codes::ADVISORIES_VIEW);
        Create => "create", Some(module_codes::ADVISORIES_CREATE);
        Update => "update", Some(module_codes::ADVISORIES_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::ADVISORIES_UPDATE);
        Destroy => "destroy", Some(module_codes::ADVISORIES_DELETE);
        /// Toggles advisory state.
        ToggleStatus => "toggle_status", Some(module_codes::ADVISORIES_UPDATE);
        /// Lists published advisories.
        ListPublic => "list_public", Some(module_codes::ADVISORIES_VIEW_PUBLIC);
        /// Lists the managers of an advisory.
        ListManagers => "list_advisory_managers", Some(module_codes::ADVISORY_MANAGERS_LIST);
        /// Lists the attachments of an advisory.
        ListFiles => "list_advisory_files", Some(module_codes::ADVISORY_FILES_LIST);
    }
}

resource_operations! {
    /// Advisory request operations.
    ///
    /// Retrieval, updates and deletion declare no requirement.
    AdvisoryRequestOperation => "advisory_requests" {
        /// Lists requests.
        List => "list", Some(module_codes::ADVISORY_REQUESTS_VIEW);
        /// Files a request.
        Create => "create", Some(module_codes::ADVISORY_REQUESTS_CREATE);
        /// Approves a request.
        Approve => "approve", Some(module_codes::ADVISORY_REQUESTS_APPROVE);
        /// Rejects a request.
        Reject => "reject", Some(module_codes::ADVISORY_REQUESTS_REJECT);
        /// Marks a request as completed.
        Complete => "complete", Some(module_codes::ADVISORY_REQUESTS_COMPLETE);
        /// Cancels a request.
        Cancel => "cancel", Some(module_codes::ADVISORY_REQUESTS_CANCEL);
    }
}

resource_operations! {
    /// Community post operations.
    CommunityPostOperation => "community_posts" {
        List => "list", Some(module_codes::COMMUNITY_POSTS_VIEW);
        Retrieve => "retrieve", Some(module_codes::COMMUNITY_POSTS_VIEW);
        Create => "create", Some(module_codes::COMMUNITY_POSTS_CREATE);
        Update => "update", Some(module_codes::COMMUNITY_POSTS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::COMMUNITY_POSTS_UPDATE);
        Destroy => "destroy", Some(module_codes::COMMUNITY_POSTS_DELETE);
        /// Toggles post visibility.
        ToggleStatus => "toggle_status", Some(module_codes::COMMUNITY_POSTS_UPDATE);
        /// Lists the posts of one company.
        ByCompany => "by_company", Some(module_codes::COMMUNITY_POSTS_VIEW);
    }
}

resource_operations! {
    /// Advisory attachment operations.
    AdvisoryFileOperation => "advisory_files" {
        List => "list", Some(module_codes::ADVISORY_FILES_LIST);
        Retrieve => "retrieve", Some(module_codes::ADVISORY_FILES_LIST);
        Create => "create", Some(module_codes::ADVISORY_FILES_CREATE);
        Destroy => "destroy", Some(module_codes::ADVISORY_FILES_DELETE);
    }
}

resource_operations! {
    /// Advisory manager operations.
    AdvisoryManagerOperation => "advisory_managers" {
        List => "list", Some(module_codes::ADVISORY_MANAGERS_LIST);
        Retrieve => "retrieve", Some(module_codes::ADVISORY_MANAGERS_LIST);
        Create => "create", Some(module_codes::ADVISORY_MANAGERS_CREATE);
        Update => "update", Some(module_codes::ADVISORY_MANAGERS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::ADVISORY_MANAGERS_UPDATE);
        Destroy => "destroy", Some(module_codes::ADVISORY_MANAGERS_DELETE);
        /// Toggles manager state.
        ToggleStatus => "toggle_status", Some(module_codes::ADVISORY_MANAGERS_UPDATE);
    }
}

resource_operations! {
    /// Training operations.
    TrainingOperation => "trainings" {
        List => "list", Some(module_codes::TRAININGS_VIEW);
        Retrieve => "retrieve", Some(module_codes::TRAININGS_VIEW);
        Create => "create", Some(module_codes::TRAININGS_CREATE);
        Update => "update", Some(module_codes::TRAININGS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::TRAININGS_UPDATE);
        Destroy => "destroy", Some(module_codes::TRAININGS_DELETE);
        /// Toggles training state.
        ToggleStatus => "toggle_status", Some(module_codes::TRAININGS_UPDATE);
    }
}

resource_operations! {
    /// Recognition event operations.
    EventOperation => "events" {
        List => "list", Some(module_codes::EVENTS_LIST);
        Retrieve => "retrieve", Some(module_codes::EVENTS_LIST);
        Create => "create", Some(module_codes::EVENTS_CREATE);
        Update => "update", Some(module_codes::EVENTS_UPDATE);
        PartialUpdate => "partial_update", Some(module_codes::EVENTS_UPDATE);
        Destroy => "destroy", Some(module_codes::EVENTS_DELETE);
    }
}

resource_operations! {
    /// Dashboard analytics operations.
    DashboardOperation => "dashboard" {
        /// Counts companies per seal type.
        CompaniesBySealType => "companies_by_seal_type", Some(module_codes::DASHBOARD_ANALYTICS_READ);
        /// Counts companies per department.
        CompaniesByDepartment => "companies_by_department", Some(module_codes::DASHBOARD_ANALYTICS_READ);
        /// Counts active users per month.
        ActiveUsersByMonth => "active_users_by_month", Some(module_codes::DASHBOARD_ANALYTICS_READ);
        /// Lists courses with their view counts.
        CoursesWithViews => "courses_with_views", Some(module_codes::DASHBOARD_ANALYTICS_READ);
    }
}

/// Resource name of the global audit log endpoint.
pub const AUDIT_LOG_RESOURCE: &str = "audit_log";

/// Returns the authorization config of every declared resource.
#[must_use]
pub fn declared_resources() -> Vec<(&'static str, AuthorizationConfig)> {
    vec![
        (
            RoleOperation::RESOURCE,
            AuthorizationConfig::per_operation::<RoleOperation>(),
        ),
        (
            UserOperation::RESOURCE,
            AuthorizationConfig::per_operation::<UserOperation>(),
        ),
        (
            MinistryOperation::RESOURCE,
            AuthorizationConfig::per_operation::<MinistryOperation>(),
        ),
        (
            ManagerOperation::RESOURCE,
            AuthorizationConfig::per_operation::<ManagerOperation>(),
        ),
        (
            CourseOperation::RESOURCE,
            AuthorizationConfig::per_operation::<CourseOperation>(),
        ),
        (
            DepartmentOperation::RESOURCE,
            AuthorizationConfig::per_operation::<DepartmentOperation>(),
        ),
        (
            CallOperation::RESOURCE,
            AuthorizationConfig::per_operation::<CallOperation>(),
        ),
        (
            CallDateOperation::RESOURCE,
            AuthorizationConfig::per_operation::<CallDateOperation>(),
        ),
        (
            CallDateFileOperation::RESOURCE,
            AuthorizationConfig::per_operation::<CallDateFileOperation>(),
        ),
        (
            SealTypeOperation::RESOURCE,
            AuthorizationConfig::per_operation::<SealTypeOperation>(),
        ),
        (
            RequirementOperation::RESOURCE,
            AuthorizationConfig::per_operation::<RequirementOperation>(),
        ),
        (
            EvaluationChecklistOperation::RESOURCE,
            AuthorizationConfig::per_operation::<EvaluationChecklistOperation>(),
        ),
        (
            EvaluationOperation::RESOURCE,
            AuthorizationConfig::per_operation::<EvaluationOperation>(),
        ),
        (
            RequirementInputOperation::RESOURCE,
            AuthorizationConfig::per_operation::<RequirementInputOperation>(),
        ),
        (
            CompanyOperation::RESOURCE,
            AuthorizationConfig::per_operation::<CompanyOperation>(),
        ),
        (
            AdvisoryOperation::RESOURCE,
            AuthorizationConfig::per_operation::<AdvisoryOperation>(),
        ),
        (
            AdvisoryRequestOperation::RESOURCE,
            AuthorizationConfig::per_operation::<AdvisoryRequestOperation>(),
        ),
        (
            CommunityPostOperation::RESOURCE,
            AuthorizationConfig::per_operation::<CommunityPostOperation>(),
        ),
        (
            AdvisoryFileOperation::RESOURCE,
            AuthorizationConfig::per_operation::<AdvisoryFileOperation>(),
        ),
        (
            AdvisoryManagerOperation::RESOURCE,
            AuthorizationConfig::per_operation::<AdvisoryManagerOperation>(),
        ),
        (
            TrainingOperation::RESOURCE,
            AuthorizationConfig::per_operation::<TrainingOperation>(),
        ),
        (
            EventOperation::RESOURCE,
            AuthorizationConfig::per_operation::<EventOperation>(),
        ),
        (
            DashboardOperation::RESOURCE,
            AuthorizationConfig::per_operation::<DashboardOperation>(),
        ),
        (
            PermissionTreeOperation::RESOURCE,
            AuthorizationConfig::per_operation::<PermissionTreeOperation>(),
        ),
        (
            AUDIT_LOG_RESOURCE,
            AuthorizationConfig::single(PermissionCode::from_static(
                codes::AUDIT_GLOBAL_HISTORY_READ,
            )),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        AdvisoryRequestOperation, CompanyOperation, DashboardOperation, MinistryOperation,
        RoleOperation, declared_resources,
    };
    use crate::catalog::{canonical_permission_tree, module_codes};
    use crate::{AuthorizationConfig, Requirement, ResourceOperation};

    #[test]
    fn every_declared_code_is_seeded_or_a_module_code() {
        let tree = canonical_permission_tree();
        let mut seeded: HashSet<&str> =
            tree.codes().into_iter().map(|code| code.as_str()).collect();
        seeded.extend(module_codes::ALL.iter().copied());

        for (resource, config) in declared_resources() {
            match config {
                AuthorizationConfig::SinglePermission { code } => {
                    assert!(seeded.contains(code.as_str()), "{resource}: {code}");
                }
                AuthorizationConfig::PerOperation { map } => {
                    for (operation, code) in map.iter() {
                        assert!(
                            seeded.contains(code.as_str()),
                            "{resource}.{operation}: {code}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn resource_names_are_unique() {
        let resources = declared_resources();
        let names: HashSet<&str> = resources.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), resources.len());
    }

    #[test]
    fn operation_names_are_unique_per_resource() {
        let names: HashSet<&str> = RoleOperation::all()
            .iter()
            .map(ResourceOperation::name)
            .collect();
        assert_eq!(names.len(), RoleOperation::all().len());
    }

    #[test]
    fn undeclared_ministry_deletion_is_public() {
        assert_eq!(MinistryOperation::Destroy.requirement(), Requirement::Public);
        assert_eq!(
            RoleOperation::SetPermissions
                .requirement()
                .code()
                .map(|code| code.as_str().to_owned()),
            Some("roles.update_permissions".to_owned())
        );
    }

    #[test]
    fn advisory_request_retrieval_is_undeclared() {
        let names: HashSet<&str> = AdvisoryRequestOperation::all()
            .iter()
            .map(ResourceOperation::name)
            .collect();
        assert!(!names.contains("retrieve"));
        assert!(names.contains("approve"));
    }

    #[test]
    fn module_operations_share_their_module_codes() {
        assert_eq!(
            CompanyOperation::ListUsers
                .requirement()
                .code()
                .map(|code| code.as_str().to_owned()),
            Some(module_codes::COMPANIES_VIEW.to_owned())
        );
        for operation in DashboardOperation::all() {
            assert_eq!(
                operation
                    .requirement()
                    .code()
                    .map(|code| code.as_str().to_owned()),
                Some(module_codes::DASHBOARD_ANALYTICS_READ.to_owned())
            );
        }
    }
}
