//! Canonical permission tree and the codes it defines.

use crate::PermissionDefinition;

/// Stable permission codes referenced by resource declarations.
pub mod codes {
    /// Root of the canonical tree.
    pub const ROOT: &str = "permissions";

    /// Users branch.
    pub const USERS: &str = "users";
    /// Create users.
    pub const USERS_CREATE: &str = "users.create";
    /// Update users.
    pub const USERS_UPDATE: &str = "users.update";
    /// Delete users.
    pub const USERS_DELETE: &str = "users.delete";
    /// List users.
    pub const USERS_LIST: &str = "users.list";
    /// Change another user's password.
    pub const USERS_CHANGE_PASSWORD: &str = "users.change_password";

    /// Roles branch.
    pub const ROLES: &str = "roles";
    /// Create roles.
    pub const ROLES_CREATE: &str = "roles.create";
    /// Update roles.
    pub const ROLES_UPDATE: &str = "roles.update";
    /// Delete roles.
    pub const ROLES_DELETE: &str = "roles.delete";
    /// List roles.
    pub const ROLES_LIST: &str = "roles.list";
    /// Replace role permission sets.
    pub const ROLES_UPDATE_PERMISSIONS: &str = "roles.update_permissions";

    /// Audit branch.
    pub const AUDIT: &str = "audit";
    /// Read the global action history.
    pub const AUDIT_GLOBAL_HISTORY_READ: &str = "audit.global_history.read";

    /// Ministries branch.
    pub const MINISTRIES: &str = "ministries";
    /// Create ministries.
    pub const MINISTRIES_CREATE: &str = "ministries.create";
    /// Update ministries.
    pub const MINISTRIES_UPDATE: &str = "ministries.update";
    /// Delete ministries.
    pub const MINISTRIES_DELETE: &str = "ministries.delete";
    /// List ministries.
    pub const MINISTRIES_LIST: &str = "ministries.list";

    /// Managers branch.
    pub const MANAGERS: &str = "managers";
    /// Create managers.
    pub const MANAGERS_CREATE: &str = "managers.create";
    /// Update managers.
    pub const MANAGERS_UPDATE: &str = "managers.update";
    /// Delete managers.
    pub const MANAGERS_DELETE: &str = "managers.delete";
    /// List managers.
    pub const MANAGERS_LIST: &str = "managers.list";
    /// List managers of one ministry.
    pub const MANAGERS_LIST_BY_MINISTRY: &str = "managers.list_by_ministry";

    /// Courses branch.
    pub const COURSES: &str = "courses";
    /// Create courses.
    pub const COURSES_CREATE: &str = "courses.create";
    /// Update courses.
    pub const COURSES_UPDATE: &str = "courses.update";
    /// Delete courses.
    pub const COURSES_DELETE: &str = "courses.delete";
    /// List courses.
    pub const COURSES_LIST: &str = "courses.list";
    /// List published courses only.
    pub const COURSES_LIST_ACTIVE: &str = "courses.list_active";

    /// Departments branch.
    pub const DEPARTMENTS: &str = "departments";
    /// List departments.
    pub const DEPARTMENTS_LIST: &str = "departments.list";
}

/// Codes required by content-module handlers that the canonical tree does not seed.
///
/// Assigning them to a role is a no-op until they are added to the catalog, so only
/// superusers satisfy them on a freshly seeded system.
pub mod module_codes {
    /// List calls for proposals.
    pub const CALLS_LIST: &str = "calls.list";
    /// Create calls for proposals.
    pub const CALLS_CREATE: &str = "calls.create";
    /// Update calls for proposals.
    pub const CALLS_UPDATE: &str = "calls.update";
    /// Delete calls for proposals.
    pub const CALLS_DELETE: &str = "calls.delete";

    /// List call dates.
    pub const CALL_DATES_LIST: &str = "call_dates.list";
    /// Create call dates and send their notifications.
    pub const CALL_DATES_CREATE: &str = "call_dates.create";
    /// Update call dates.
    pub const CALL_DATES_UPDATE: &str = "call_dates.update";
    /// Delete call dates.
    pub const CALL_DATES_DELETE: &str = "call_dates.delete";

    /// List call date attachments.
    pub const CALL_DATE_FILES_LIST: &str = "call_date_files.list";
    /// Upload call date attachments.
    pub const CALL_DATE_FILES_CREATE: &str = "call_date_files.create";
    /// Delete call date attachments.
    pub const CALL_DATE_FILES_DELETE: &str = "call_date_files.delete";

    /// List seal types.
    pub const SEAL_TYPES_LIST: &str = "seal_types.list";
    /// Create seal types.
    pub const SEAL_TYPES_CREATE: &str = "seal_types.create";
    /// Update seal types.
    pub const SEAL_TYPES_UPDATE: &str = "seal_types.update";
    /// Delete seal types.
    pub const SEAL_TYPES_DELETE: &str = "seal_types.delete";

    /// List certification requirements.
    pub const REQUIREMENTS_LIST: &str = "requirements.list";
    /// Create certification requirements.
    pub const REQUIREMENTS_CREATE: &str = "requirements.create";
    /// Update certification requirements.
    pub const REQUIREMENTS_UPDATE: &str = "requirements.update";
    /// Delete certification requirements.
    pub const REQUIREMENTS_DELETE: &str = "requirements.delete";

    /// List evaluation checklists.
    pub const EVALUATION_CHECKLISTS_LIST: &str = "evaluation_checklists.list";
    /// Create evaluation checklists.
    pub const EVALUATION_CHECKLISTS_CREATE: &str = "evaluation_checklists.create";
    /// Update evaluation checklists.
    pub const EVALUATION_CHECKLISTS_UPDATE: &str = "evaluation_checklists.update";
    /// Delete evaluation checklists.
    pub const EVALUATION_CHECKLISTS_DELETE: &str = "evaluation_checklists.delete";

    /// List evaluations.
    pub const EVALUATIONS_LIST: &str = "evaluations.list";
    /// Create evaluations.
    pub const EVALUATIONS_CREATE: &str = "evaluations.create";
    /// Update evaluations and change their state.
    pub const EVALUATIONS_UPDATE: &str = "evaluations.update";
    /// Delete evaluations.
    pub const EVALUATIONS_DELETE: &str = "evaluations.delete";

    /// List requirement inputs.
    pub const REQUIREMENT_INPUTS_LIST: &str = "requirement_inputs.list";
    /// Create requirement inputs.
    pub const REQUIREMENT_INPUTS_CREATE: &str = "requirement_inputs.create";
    /// Update requirement inputs.
    pub const REQUIREMENT_INPUTS_UPDATE: &str = "requirement_inputs.update";
    /// Delete requirement inputs.
    pub const REQUIREMENT_INPUTS_DELETE: &str = "requirement_inputs.delete";

    /// View companies.
    pub const COMPANIES_VIEW: &str = "companies.view";
    /// Create companies.
    pub const COMPANIES_CREATE: &str = "companies.create";
    /// Update companies.
    pub const COMPANIES_UPDATE: &str = "companies.update";
    /// Delete companies.
    pub const COMPANIES_DELETE: &str = "companies.delete";

    /// View advisories.
    pub const ADVISORIES_VIEW: &str = "advisories.view";
    /// View published advisories.
    pub const ADVISORIES_VIEW_PUBLIC: &str = "advisories.view_public";
    /// Create advisories.
    pub const ADVISORIES_CREATE: &str = "advisories.create";
    /// Update advisories.
    pub const ADVISORIES_UPDATE: &str = "advisories.update";
    /// Delete advisories.
    pub const ADVISORIES_DELETE: &str = "advisories.delete";

    /// View advisory requests.
    pub const ADVISORY_REQUESTS_VIEW: &str = "advisory_requests.view";
    /// Create advisory requests.
    pub const ADVISORY_REQUESTS_CREATE: &str = "advisory_requests.create";
    /// Approve advisory requests.
    pub const ADVISORY_REQUESTS_APPROVE: &str = "advisory_requests.approve";
    /// Reject advisory requests.
    pub const ADVISORY_REQUESTS_REJECT: &str = "advisory_requests.reject";
    /// Complete advisory requests.
    pub const ADVISORY_REQUESTS_COMPLETE: &str = "advisory_requests.complete";
    /// Cancel advisory requests.
    pub const ADVISORY_REQUESTS_CANCEL: &str = "advisory_requests.cancel";

    /// View community posts.
    pub const COMMUNITY_POSTS_VIEW: &str = "community_posts.view";
    /// Create community posts.
    pub const COMMUNITY_POSTS_CREATE: &str = "community_posts.create";
    /// Update community posts.
    pub const COMMUNITY_POSTS_UPDATE: &str = "community_posts.update";
    /// Delete community posts.
    pub const COMMUNITY_POSTS_DELETE: &str = "community_posts.delete";

    /// List advisory attachments.
    pub const ADVISORY_FILES_LIST: &str = "advisory_files.list";
    /// Upload advisory attachments.
    pub const ADVISORY_FILES_CREATE: &str = "advisory_files.create";
    /// Delete advisory attachments.
    pub const ADVISORY_FILES_DELETE: &str = "advisory_files.delete";

    /// List advisory managers.
    pub const ADVISORY_MANAGERS_LIST: &str = "advisory_managers.list";
    /// Create advisory managers.
    pub const ADVISORY_MANAGERS_CREATE: &str = "advisory_managers.create";
    /// Update advisory managers.
    pub const ADVISORY_MANAGERS_UPDATE: &str = "advisory_managers.update";
    /// Delete advisory managers.
    pub const ADVISORY_MANAGERS_DELETE: &str = "advisory_managers.delete";

    /// View trainings.
    pub const TRAININGS_VIEW: &str = "trainings.view";
    /// Create trainings.
    pub const TRAININGS_CREATE: &str = "trainings.create";
    /// Update trainings.
    pub const TRAININGS_UPDATE: &str = "trainings.update";
    /// Delete trainings.
    pub const TRAININGS_DELETE: &str = "trainings.delete";

    /// List recognition events.
    pub const EVENTS_LIST: &str = "events.list";
    /// Create recognition events.
    pub const EVENTS_CREATE: &str = "events.create";
    /// Update recognition events.
    pub const EVENTS_UPDATE: &str = "events.update";
    /// Delete recognition events.
    pub const EVENTS_DELETE: &str = "events.delete";

    /// Read dashboard analytics.
    pub const DASHBOARD_ANALYTICS_READ: &str = "dashboard.analytics.read";

    /// Every module code, in declaration order.
    pub const ALL: &[&str] = &[
        CALLS_LIST,
        CALLS_CREATE,
        CALLS_UPDATE,
        CALLS_DELETE,
        CALL_DATES_LIST,
        CALL_DATES_CREATE,
        CALL_DATES_UPDATE,
        CALL_DATES_DELETE,
        CALL_DATE_FILES_LIST,
        CALL_DATE_FILES_CREATE,
        CALL_DATE_FILES_DELETE,
        SEAL_TYPES_LIST,
        SEAL_TYPES_CREATE,
        SEAL_TYPES_UPDATE,
        SEAL_TYPES_DELETE,
        REQUIREMENTS_LIST,
        REQUIREMENTS_CREATE,
        REQUIREMENTS_UPDATE,
        REQUIREMENTS_DELETE,
        EVALUATION_CHECKLISTS_LIST,
        EVALUATION_CHECKLISTS_CREATE,
        EVALUATION_CHECKLISTS_UPDATE,
        EVALUATION_CHECKLISTS_DELETE,
        EVALUATIONS_LIST,
        EVALUATIONS_CREATE,
        EVALUATIONS_UPDATE,
        EVALUATIONS_DELETE,
        REQUIREMENT_INPUTS_LIST,
        REQUIREMENT_INPUTS_CREATE,
        REQUIREMENT_INPUTS_UPDATE,
        REQUIREMENT_INPUTS_DELETE,
        COMPANIES_VIEW,
        COMPANIES_CREATE,
        COMPANIES_UPDATE,
        COMPANIES_DELETE,
        ADVISORIES_VIEW,
        ADVISORIES_VIEW_PUBLIC,
        ADVISORIES_CREATE,
        ADVISORIES_UPDATE,
        ADVISORIES_DELETE,
        ADVISORY_REQUESTS_VIEW,
        ADVISORY_REQUESTS_CREATE,
        ADVISORY_REQUESTS_APPROVE,
        ADVISORY_REQUESTS_REJECT,
        ADVISORY_REQUESTS_COMPLETE,
        ADVISORY_REQUESTS_CANCEL,
        COMMUNITY_POSTS_VIEW,
        COMMUNITY_POSTS_CREATE,
        COMMUNITY_POSTS_UPDATE,
        COMMUNITY_POSTS_DELETE,
        ADVISORY_FILES_LIST,
        ADVISORY_FILES_CREATE,
        ADVISORY_FILES_DELETE,
        ADVISORY_MANAGERS_LIST,
        ADVISORY_MANAGERS_CREATE,
        ADVISORY_MANAGERS_UPDATE,
        ADVISORY_MANAGERS_DELETE,
        TRAININGS_VIEW,
        TRAININGS_CREATE,
        TRAININGS_UPDATE,
        TRAININGS_DELETE,
        EVENTS_LIST,
        EVENTS_CREATE,
        EVENTS_UPDATE,
        EVENTS_DELETE,
        DASHBOARD_ANALYTICS_READ,
    ];
}

/// Returns the canonical permission tree seeded at bootstrap.
#[must_use]
pub fn canonical_permission_tree() -> PermissionDefinition {
    use PermissionDefinition as Node;

    Node::branch(
        codes::ROOT,
        "Permissions",
        vec![
            Node::branch(
                codes::USERS,
                "Users",
                vec![
                    Node::leaf(codes::USERS_CREATE, "Create users"),
                    Node::leaf(codes::USERS_UPDATE, "Edit users"),
                    Node::leaf(codes::USERS_DELETE, "Delete users"),
                    Node::leaf(codes::USERS_LIST, "List users"),
                    Node::leaf(codes::USERS_CHANGE_PASSWORD, "Change user passwords"),
                ],
            ),
            Node::branch(
                codes::ROLES,
                "Roles",
                vec![
                    Node::leaf(codes::ROLES_CREATE, "Create roles"),
                    Node::leaf(codes::ROLES_UPDATE, "Edit roles"),
                    Node::leaf(codes::ROLES_DELETE, "Delete roles"),
                    Node::leaf(codes::ROLES_LIST, "List roles"),
                    Node::leaf(codes::ROLES_UPDATE_PERMISSIONS, "Edit role permissions"),
                ],
            ),
            Node::branch(
                codes::AUDIT,
                "Audit",
                vec![Node::leaf(
                    codes::AUDIT_GLOBAL_HISTORY_READ,
                    "View global history",
                )],
            ),
            Node::branch(
                codes::MINISTRIES,
                "Ministries",
                vec![
                    Node::leaf(codes::MINISTRIES_CREATE, "Create ministries"),
                    Node::leaf(codes::MINISTRIES_UPDATE, "Edit ministries"),
                    Node::leaf(codes::MINISTRIES_DELETE, "Delete ministries"),
                    Node::leaf(codes::MINISTRIES_LIST, "List ministries"),
                ],
            ),
            Node::branch(
                codes::MANAGERS,
                "Managers",
                vec![
                    Node::leaf(codes::MANAGERS_CREATE, "Create managers"),
                    Node::leaf(codes::MANAGERS_UPDATE, "Edit managers"),
                    Node::leaf(codes::MANAGERS_DELETE, "Delete managers"),
                    Node::leaf(codes::MANAGERS_LIST, "List managers"),
                    Node::leaf(
                        codes::MANAGERS_LIST_BY_MINISTRY,
                        "List managers by ministry",
                    ),
                ],
            ),
            Node::branch(
                codes::COURSES,
                "Courses",
                vec![
                    Node::leaf(codes::COURSES_CREATE, "Create courses"),
                    Node::leaf(codes::COURSES_UPDATE, "Edit courses"),
                    Node::leaf(codes::COURSES_DELETE, "Delete courses"),
                    Node::leaf(codes::COURSES_LIST, "List courses"),
                    Node::leaf(codes::COURSES_LIST_ACTIVE, "List active courses"),
                ],
            ),
            Node::branch(
                codes::DEPARTMENTS,
                "Departments",
                vec![Node::leaf(codes::DEPARTMENTS_LIST, "List departments")],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{canonical_permission_tree, module_codes};
    use crate::PermissionCode;

    #[test]
    fn canonical_codes_are_valid_and_unique() {
        let tree = canonical_permission_tree();
        let codes = tree.codes();

        let mut seen = HashSet::new();
        for code in &codes {
            assert!(PermissionCode::new(code.as_str()).is_ok(), "{code}");
            assert!(seen.insert(code.as_str()), "duplicate code {code}");
        }

        assert_eq!(codes.len(), 34);
    }

    #[test]
    fn module_codes_stay_outside_the_canonical_tree() {
        let tree = canonical_permission_tree();
        let seeded: HashSet<&str> = tree.codes().into_iter().map(|code| code.as_str()).collect();

        let mut seen = HashSet::new();
        for code in module_codes::ALL {
            assert!(PermissionCode::new(*code).is_ok(), "{code}");
            assert!(seen.insert(*code), "duplicate module code {code}");
            assert!(!seeded.contains(code), "{code} is seeded");
        }
    }
}
