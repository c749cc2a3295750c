use std::collections::BTreeSet;

use rolegate_application::{
    CreateRoleInput, PermissionCatalogRepository, PrincipalRepository, RoleRepository,
};
use rolegate_core::AppError;
use rolegate_domain::{PermissionCode, Principal, RoleId};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresRoleRepository;
use crate::{PostgresPermissionCatalogRepository, PostgresPrincipalRepository};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres role tests: {error}");
    }

    Some(pool)
}

fn unique(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

fn code(value: String) -> PermissionCode {
    PermissionCode::new(value).unwrap_or_else(|_| unreachable!())
}

async fn seed_codes(pool: &PgPool, root: &str) -> (PermissionCode, PermissionCode) {
    let catalog = PostgresPermissionCatalogRepository::new(pool.clone());
    let parent = code(root.to_owned());
    let first = code(format!("{root}.first"));
    let second = code(format!("{root}.second"));

    assert!(catalog.upsert_permission(&parent, "Root", None).await.is_ok());
    assert!(
        catalog
            .upsert_permission(&first, "First", Some(&parent))
            .await
            .is_ok()
    );
    assert!(
        catalog
            .upsert_permission(&second, "Second", Some(&parent))
            .await
            .is_ok()
    );

    (first, second)
}

async fn create_role(repository: &PostgresRoleRepository, name: &str) -> RoleId {
    let created = repository
        .create_role(CreateRoleInput {
            name: name.to_owned(),
            description: Some("Test role".to_owned()),
            permissions: BTreeSet::new(),
        })
        .await;
    match created {
        Ok(role) => role.id(),
        Err(error) => panic!("role should be created: {error}"),
    }
}

#[tokio::test]
async fn replace_role_permissions_drops_unknown_codes() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRoleRepository::new(pool.clone());
    let (first, second) = seed_codes(&pool, unique("grants").as_str()).await;
    let role_id = create_role(&repository, unique("Editor ").as_str()).await;

    let ghost = code(unique("ghost."));
    let replaced = repository
        .replace_role_permissions(role_id, &BTreeSet::from([first.clone(), ghost]))
        .await;
    assert_eq!(
        replaced.ok().map(|role| role.permissions().clone()),
        Some(BTreeSet::from([first]))
    );

    let replaced_again = repository
        .replace_role_permissions(role_id, &BTreeSet::from([second.clone()]))
        .await;
    assert!(replaced_again.is_ok());

    let stored = repository.find_role(role_id).await.ok().flatten();
    assert_eq!(
        stored.map(|role| role.permissions().clone()),
        Some(BTreeSet::from([second]))
    );
}

#[tokio::test]
async fn duplicate_role_name_maps_to_duplicate_name() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRoleRepository::new(pool);
    let name = unique("Auditor ");
    create_role(&repository, name.as_str()).await;

    let duplicate = repository
        .create_role(CreateRoleInput {
            name,
            description: None,
            permissions: BTreeSet::new(),
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::DuplicateName(_))));
}

#[tokio::test]
async fn deactivation_guard_respects_active_dependents() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRoleRepository::new(pool.clone());
    let principals = PostgresPrincipalRepository::new(pool);
    let role_id = create_role(&repository, unique("Guarded ").as_str()).await;
    let subject = unique("holder-");
    let holder = Principal::authenticated(subject.as_str(), false, true, Some(role_id))
        .unwrap_or_else(|_| unreachable!());
    assert!(principals.save_principal(&holder).await.is_ok());

    let blocked = repository.toggle_role_active(role_id).await;
    assert!(matches!(blocked, Err(AppError::HasActiveDependents(_))));

    assert!(principals.assign_role(subject.as_str(), None).await.is_ok());
    let toggled = repository.toggle_role_active(role_id).await;
    assert_eq!(toggled.ok().map(|role| role.is_active()), Some(false));

    let reassigned = principals.assign_role(subject.as_str(), Some(role_id)).await;
    assert!(matches!(reassigned, Err(AppError::Validation(_))));
}
