use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    entities::admins::AdminEntity,
    errors::StoreError,
    repositories::admins::AdminRepository,
    value_objects::{
        admins::{
            AdminDto, ChangePasswordModel, InsertAdminModel, UpdateAdminModel, validate_password,
        },
        enums::admin_roles::AdminRole,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    auth::{AuthAdmin, password::hash_password},
    config::config_model::BootstrapAdmin,
};

#[derive(Debug, Error)]
pub enum AdminAccountError {
    #[error("admin account not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("email already in use")]
    DuplicateEmail,
    #[error("session account no longer exists")]
    Unauthenticated,
    #[error("Account is deactivated")]
    Inactive,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, AdminAccountError>;

const CANNOT_MANAGE_ROLE: &str = "You cannot manage accounts with this role";
const CANNOT_DELETE_SELF: &str = "You cannot delete your own account";
const CANNOT_CHANGE_OWN_PRIVILEGES: &str = "You cannot change your own role or active status";

pub struct AdminAccountUseCase<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    admin_repository: Arc<A>,
}

impl<A> AdminAccountUseCase<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    pub fn new(admin_repository: Arc<A>) -> Self {
        Self { admin_repository }
    }

    pub async fn list(&self) -> UseCaseResult<Vec<AdminDto>> {
        let admins = self.admin_repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "admin_accounts: failed to list accounts");
            AdminAccountError::Internal(err)
        })?;
        Ok(admins.into_iter().map(AdminDto::from).collect())
    }

    pub async fn create(&self, acting: &AuthAdmin, model: InsertAdminModel) -> UseCaseResult<AdminDto> {
        let acting_role = self.acting_role(acting).await?;
        if !acting_role.can_manage(model.role) {
            warn!(
                acting_id = %acting.admin_id,
                %acting_role,
                requested_role = %model.role,
                "admin_accounts: create denied"
            );
            return Err(AdminAccountError::Forbidden(CANNOT_MANAGE_ROLE));
        }

        let created = self.insert(model, Some(acting.admin_id)).await?;
        info!(
            admin_id = %created.id,
            role = %created.role,
            created_by = %acting.admin_id,
            "admin_accounts: account created"
        );
        Ok(created)
    }

    /// Self-edits may change name and email only. Role changes need the
    /// acting role to manage both the current and the requested role.
    pub async fn update(
        &self,
        acting: &AuthAdmin,
        admin_id: Uuid,
        model: UpdateAdminModel,
    ) -> UseCaseResult<AdminDto> {
        let acting_role = self.acting_role(acting).await?;
        if acting.admin_id == admin_id {
            if model.touches_privileges() {
                return Err(AdminAccountError::Forbidden(CANNOT_CHANGE_OWN_PRIVILEGES));
            }
        } else {
            let target = self.find(admin_id).await?;
            ensure_can_manage(acting.admin_id, acting_role, &target)?;
            if let Some(role) = model.role {
                if !acting_role.can_manage(role) {
                    return Err(AdminAccountError::Forbidden(CANNOT_MANAGE_ROLE));
                }
            }
        }

        let entity = model
            .to_entity(Utc::now())
            .map_err(|err| AdminAccountError::Validation(err.to_string()))?;

        let updated = self
            .admin_repository
            .update(admin_id, entity)
            .await
            .map_err(duplicate_or_internal)?
            .ok_or(AdminAccountError::NotFound)?;

        info!(%admin_id, acting_id = %acting.admin_id, "admin_accounts: account updated");
        Ok(AdminDto::from(updated))
    }

    pub async fn delete(&self, acting: &AuthAdmin, admin_id: Uuid) -> UseCaseResult<()> {
        let acting_role = self.acting_role(acting).await?;
        if acting.admin_id == admin_id {
            return Err(AdminAccountError::Forbidden(CANNOT_DELETE_SELF));
        }

        let target = self.find(admin_id).await?;
        ensure_can_manage(acting.admin_id, acting_role, &target)?;

        if !self.admin_repository.delete(admin_id).await? {
            return Err(AdminAccountError::NotFound);
        }
        info!(%admin_id, acting_id = %acting.admin_id, "admin_accounts: account deleted");
        Ok(())
    }

    pub async fn change_password(
        &self,
        acting: &AuthAdmin,
        admin_id: Uuid,
        model: ChangePasswordModel,
    ) -> UseCaseResult<()> {
        validate_password(&model.new_password)
            .map_err(|err| AdminAccountError::Validation(err.to_string()))?;

        let acting_role = self.acting_role(acting).await?;
        if acting.admin_id != admin_id {
            let target = self.find(admin_id).await?;
            ensure_can_manage(acting.admin_id, acting_role, &target)?;
        }

        let password_hash = hash_password(&model.new_password)?;
        if !self
            .admin_repository
            .update_password(admin_id, password_hash, Utc::now())
            .await?
        {
            return Err(AdminAccountError::NotFound);
        }

        info!(%admin_id, acting_id = %acting.admin_id, "admin_accounts: password changed");
        Ok(())
    }

    /// Creates the first super admin when the accounts table is empty.
    /// Returns `None` when accounts already exist or nothing is configured.
    pub async fn ensure_bootstrap_admin(
        &self,
        bootstrap: Option<&BootstrapAdmin>,
    ) -> UseCaseResult<Option<AdminDto>> {
        let existing = self.admin_repository.count(None).await?;
        if existing > 0 {
            return Ok(None);
        }

        let Some(bootstrap) = bootstrap else {
            warn!("admin_accounts: no admin accounts exist and no bootstrap admin is configured");
            return Ok(None);
        };

        let created = self
            .insert(
                InsertAdminModel {
                    name: bootstrap.name.clone(),
                    email: bootstrap.email.clone(),
                    password: bootstrap.password.clone(),
                    role: AdminRole::SuperAdmin,
                },
                None,
            )
            .await?;

        info!(admin_id = %created.id, email = %created.email, "admin_accounts: bootstrap super admin created");
        Ok(Some(created))
    }

    async fn insert(
        &self,
        model: InsertAdminModel,
        created_by: Option<Uuid>,
    ) -> UseCaseResult<AdminDto> {
        validate_password(&model.password)
            .map_err(|err| AdminAccountError::Validation(err.to_string()))?;
        let password_hash = hash_password(&model.password)?;
        let entity = model
            .to_entity(password_hash, created_by, Utc::now())
            .map_err(|err| AdminAccountError::Validation(err.to_string()))?;

        let created = self
            .admin_repository
            .create(entity)
            .await
            .map_err(duplicate_or_internal)?;
        Ok(AdminDto::from(created))
    }

    /// Token claims can outlive a demotion or deactivation, so permissions
    /// come from the stored account.
    async fn acting_role(&self, acting: &AuthAdmin) -> UseCaseResult<AdminRole> {
        let account = self
            .admin_repository
            .find_by_id(acting.admin_id)
            .await?
            .ok_or_else(|| {
                warn!(acting_id = %acting.admin_id, "admin_accounts: acting account is gone");
                AdminAccountError::Unauthenticated
            })?;
        if !account.is_active {
            warn!(acting_id = %acting.admin_id, "admin_accounts: acting account is deactivated");
            return Err(AdminAccountError::Inactive);
        }
        Ok(AdminRole::parse(&account.role)?)
    }

    async fn find(&self, admin_id: Uuid) -> UseCaseResult<AdminEntity> {
        self.admin_repository
            .find_by_id(admin_id)
            .await?
            .ok_or(AdminAccountError::NotFound)
    }
}

fn ensure_can_manage(
    acting_id: Uuid,
    acting_role: AdminRole,
    target: &AdminEntity,
) -> UseCaseResult<()> {
    let target_role = AdminRole::parse(&target.role)?;
    if acting_role.can_manage(target_role) {
        Ok(())
    } else {
        warn!(
            %acting_id,
            %acting_role,
            target_id = %target.id,
            %target_role,
            "admin_accounts: management denied"
        );
        Err(AdminAccountError::Forbidden(CANNOT_MANAGE_ROLE))
    }
}

fn duplicate_or_internal(err: anyhow::Error) -> AdminAccountError {
    if StoreError::is_duplicate(&err) {
        AdminAccountError::DuplicateEmail
    } else {
        error!(db_error = ?err, "admin_accounts: write failed");
        AdminAccountError::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crates::domain::{
        entities::admins::InsertAdminEntity, repositories::admins::MockAdminRepository,
    };
    use mockall::predicate::eq;

    fn acting(role: AdminRole) -> AuthAdmin {
        AuthAdmin {
            admin_id: Uuid::new_v4(),
            email: "acting@example.com".to_string(),
            role,
        }
    }

    fn account(role: AdminRole) -> AdminEntity {
        let now = Utc::now();
        AdminEntity {
            id: Uuid::new_v4(),
            name: "Target".to_string(),
            email: "target@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
            is_active: true,
            created_by: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn created_from(entity: InsertAdminEntity) -> AdminEntity {
        AdminEntity {
            id: Uuid::new_v4(),
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            is_active: entity.is_active,
            created_by: entity.created_by,
            last_login: None,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    fn insert_model(role: AdminRole) -> InsertAdminModel {
        InsertAdminModel {
            name: "New Admin".to_string(),
            email: "New@Example.com".to_string(),
            password: "a-strong-password".to_string(),
            role,
        }
    }

    fn expect_target(repo: &mut MockAdminRepository, target: &AdminEntity) {
        let target = target.clone();
        repo.expect_find_by_id()
            .with(eq(target.id))
            .returning(move |_| {
                let target = target.clone();
                Box::pin(async move { Ok(Some(target)) })
            });
    }

    fn expect_acting(repo: &mut MockAdminRepository, acting: &AuthAdmin) {
        let stored = AdminEntity {
            id: acting.admin_id,
            email: acting.email.clone(),
            ..account(acting.role)
        };
        expect_target(repo, &stored);
    }

    #[tokio::test]
    async fn admin_creates_manager_with_hashed_password() {
        let acting = acting(AdminRole::Admin);
        let acting_id = acting.admin_id;

        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_create()
            .withf(move |entity| {
                entity.email == "new@example.com"
                    && entity.role == "manager"
                    && entity.created_by == Some(acting_id)
                    && verify_password("a-strong-password", &entity.password_hash)
            })
            .times(1)
            .returning(|entity| Box::pin(async move { Ok(created_from(entity)) }));

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let created = usecase
            .create(&acting, insert_model(AdminRole::Manager))
            .await
            .unwrap();

        assert_eq!(created.role, "manager");
        assert_eq!(created.created_by, Some(acting_id));
    }

    #[tokio::test]
    async fn only_super_admin_creates_super_admin() {
        let admin = acting(AdminRole::Admin);
        let super_admin = acting(AdminRole::SuperAdmin);

        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &admin);
        expect_acting(&mut repo, &super_admin);
        repo.expect_create()
            .times(1)
            .returning(|entity| Box::pin(async move { Ok(created_from(entity)) }));

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        let denied = usecase
            .create(&admin, insert_model(AdminRole::SuperAdmin))
            .await;
        assert!(matches!(denied, Err(AdminAccountError::Forbidden(_))));

        let allowed = usecase
            .create(&super_admin, insert_model(AdminRole::SuperAdmin))
            .await;
        assert!(allowed.is_ok());
    }

    #[tokio::test]
    async fn manager_cannot_create_accounts() {
        let acting = acting(AdminRole::Manager);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_create().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .create(&acting, insert_model(AdminRole::Manager))
            .await;

        assert!(matches!(result, Err(AdminAccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_hashing() {
        let acting = acting(AdminRole::Admin);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_create().never();

        let mut model = insert_model(AdminRole::Manager);
        model.password = "short".to_string();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase.create(&acting, model).await;

        assert!(matches!(result, Err(AdminAccountError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let acting = acting(AdminRole::Admin);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_create().returning(|_| {
            Box::pin(async { Err(anyhow::Error::new(StoreError::Duplicate("email"))) })
        });

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .create(&acting, insert_model(AdminRole::Manager))
            .await;

        assert!(matches!(result, Err(AdminAccountError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn admin_cannot_delete_self() {
        let acting = acting(AdminRole::SuperAdmin);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_delete().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        assert!(matches!(
            usecase.delete(&acting, acting.admin_id).await,
            Err(AdminAccountError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn admin_cannot_delete_super_admin() {
        let acting = acting(AdminRole::Admin);
        let target = account(AdminRole::SuperAdmin);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        expect_target(&mut repo, &target);
        repo.expect_delete().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        assert!(matches!(
            usecase.delete(&acting, target.id).await,
            Err(AdminAccountError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn admin_deletes_manager() {
        let acting = acting(AdminRole::Admin);
        let target = account(AdminRole::Manager);
        let target_id = target.id;
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        expect_target(&mut repo, &target);
        repo.expect_delete()
            .with(eq(target_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(true) }));

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        assert!(usecase.delete(&acting, target_id).await.is_ok());
    }

    #[tokio::test]
    async fn deleting_unknown_account_is_not_found() {
        let acting = acting(AdminRole::Admin);
        let unknown = Uuid::new_v4();
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_find_by_id()
            .with(eq(unknown))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        assert!(matches!(
            usecase.delete(&acting, unknown).await,
            Err(AdminAccountError::NotFound)
        ));
    }

    #[tokio::test]
    async fn self_update_may_not_touch_role_or_active_flag() {
        let acting = acting(AdminRole::Admin);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_update().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        let result = usecase
            .update(
                &acting,
                acting.admin_id,
                UpdateAdminModel {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AdminAccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn self_update_of_name_is_allowed() {
        let acting = acting(AdminRole::Manager);
        let me = AdminEntity {
            id: acting.admin_id,
            ..account(AdminRole::Manager)
        };

        let mut repo = MockAdminRepository::new();
        expect_target(&mut repo, &me);
        repo.expect_update()
            .withf(|_, entity| entity.name.as_deref() == Some("Renamed"))
            .times(1)
            .returning(move |_, entity| {
                let mut me = me.clone();
                me.name = entity.name.unwrap_or_default();
                Box::pin(async move { Ok(Some(me)) })
            });

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let updated = usecase
            .update(
                &acting,
                acting.admin_id,
                UpdateAdminModel {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn admin_cannot_promote_to_super_admin() {
        let acting = acting(AdminRole::Admin);
        let target = account(AdminRole::Manager);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        expect_target(&mut repo, &target);
        repo.expect_update().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .update(
                &acting,
                target.id,
                UpdateAdminModel {
                    role: Some(AdminRole::SuperAdmin),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AdminAccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn manager_cannot_reset_another_password() {
        let acting = acting(AdminRole::Manager);
        let target = account(AdminRole::Manager);
        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        expect_target(&mut repo, &target);
        repo.expect_update_password().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .change_password(
                &acting,
                target.id,
                ChangePasswordModel {
                    new_password: "another-password".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AdminAccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn anyone_may_change_their_own_password() {
        let acting = acting(AdminRole::Manager);
        let acting_id = acting.admin_id;

        let mut repo = MockAdminRepository::new();
        expect_acting(&mut repo, &acting);
        repo.expect_update_password()
            .withf(move |id, hash, _| *id == acting_id && verify_password("another-password", hash))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(true) }));

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .change_password(
                &acting,
                acting_id,
                ChangePasswordModel {
                    new_password: "another-password".to_string(),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn demoted_account_with_stale_super_admin_token_cannot_create_super_admin() {
        let acting = acting(AdminRole::SuperAdmin);
        let stored = AdminEntity {
            id: acting.admin_id,
            ..account(AdminRole::Manager)
        };

        let mut repo = MockAdminRepository::new();
        expect_target(&mut repo, &stored);
        repo.expect_create().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .create(&acting, insert_model(AdminRole::SuperAdmin))
            .await;

        assert!(matches!(result, Err(AdminAccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn deactivated_account_is_refused_while_its_token_is_still_valid() {
        let acting = acting(AdminRole::SuperAdmin);
        let stored = AdminEntity {
            id: acting.admin_id,
            is_active: false,
            ..account(AdminRole::SuperAdmin)
        };
        let target = account(AdminRole::Manager);

        let mut repo = MockAdminRepository::new();
        expect_target(&mut repo, &stored);
        repo.expect_create().never();
        repo.expect_delete().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        assert!(matches!(
            usecase.create(&acting, insert_model(AdminRole::Manager)).await,
            Err(AdminAccountError::Inactive)
        ));
        assert!(matches!(
            usecase.delete(&acting, target.id).await,
            Err(AdminAccountError::Inactive)
        ));
    }

    #[tokio::test]
    async fn deleted_account_is_unauthenticated() {
        let acting = acting(AdminRole::Admin);
        let acting_id = acting.admin_id;

        let mut repo = MockAdminRepository::new();
        repo.expect_find_by_id()
            .with(eq(acting_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        repo.expect_update_password().never();

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let result = usecase
            .change_password(
                &acting,
                acting_id,
                ChangePasswordModel {
                    new_password: "another-password".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AdminAccountError::Unauthenticated)));
    }

    #[tokio::test]
    async fn bootstrap_creates_super_admin_only_when_empty() {
        let mut repo = MockAdminRepository::new();
        repo.expect_count()
            .with(eq(None))
            .times(1)
            .returning(|_| Box::pin(async { Ok(0) }));
        repo.expect_create()
            .withf(|entity| entity.role == "super_admin" && entity.created_by.is_none())
            .times(1)
            .returning(|entity| Box::pin(async move { Ok(created_from(entity)) }));

        let bootstrap = BootstrapAdmin {
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            password: "initial-password".to_string(),
        };

        let usecase = AdminAccountUseCase::new(Arc::new(repo));
        let created = usecase.ensure_bootstrap_admin(Some(&bootstrap)).await.unwrap();

        assert_eq!(created.map(|admin| admin.role), Some("super_admin".to_string()));
    }

    #[tokio::test]
    async fn bootstrap_is_skipped_when_accounts_exist() {
        let mut repo = MockAdminRepository::new();
        repo.expect_count()
            .returning(|_| Box::pin(async { Ok(3) }));
        repo.expect_create().never();

        let bootstrap = BootstrapAdmin {
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            password: "initial-password".to_string(),
        };

        let usecase = AdminAccountUseCase::new(Arc::new(repo));

        assert_eq!(usecase.ensure_bootstrap_admin(Some(&bootstrap)).await.unwrap(), None);
    }
}
