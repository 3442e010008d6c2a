//! Admins service.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::domain::admins::{
    data::{NewAdmin, normalize_email},
    errors::AdminsServiceError,
    records::AdminRecord,
    repository::PgAdminsRepository,
};

#[derive(Debug, Clone)]
pub struct PgAdminsService {
    repository: PgAdminsRepository,
}

impl PgAdminsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAdminsRepository::new(pool),
        }
    }
}

#[async_trait]
impl AdminsService for PgAdminsService {
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, AdminsServiceError> {
        let created = self.repository.create_admin(admin).await?;

        info!(admin_uuid = %created.uuid, email = %created.email, "added admin to allow-list");

        Ok(created)
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, AdminsServiceError> {
        self.repository.list_admins().await.map_err(Into::into)
    }

    async fn remove_admin(&self, email: &str) -> Result<(), AdminsServiceError> {
        let email = normalize_email(email);

        if self.repository.delete_admin(&email).await? == 0 {
            return Err(AdminsServiceError::NotFound);
        }

        info!(email = %email, "removed admin from allow-list");

        Ok(())
    }
}

/// Admin allow-list operations.
#[async_trait]
pub trait AdminsService: Send + Sync {
    /// Adds an email address to the allow-list.
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, AdminsServiceError>;

    /// All allow-list entries ordered by email.
    async fn list_admins(&self) -> Result<Vec<AdminRecord>, AdminsServiceError>;

    /// Removes an email address from the allow-list.
    async fn remove_admin(&self, email: &str) -> Result<(), AdminsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn allow_list_emails_ignore_case_and_whitespace() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .admins
            .create_admin(NewAdmin::new("Admin@Example.com", "管理員"))
            .await?;

        assert_eq!(created.email, "admin@example.com");
        assert_eq!(ctx.admins.list_admins().await?, vec![created]);

        ctx.admins.remove_admin("  ADMIN@example.com ").await?;

        assert!(ctx.admins.list_admins().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.admins
            .create_admin(NewAdmin::new("admin@example.com", "管理員"))
            .await?;

        let result = ctx
            .admins
            .create_admin(NewAdmin::new("ADMIN@example.com", "Other"))
            .await;

        assert!(matches!(result, Err(AdminsServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn removed_admin_is_no_longer_listed() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.admins
            .create_admin(NewAdmin::new("admin@example.com", "管理員"))
            .await?;

        ctx.admins.remove_admin("admin@example.com").await?;

        assert!(ctx.admins.list_admins().await?.is_empty());
        assert!(matches!(
            ctx.admins.remove_admin("admin@example.com").await,
            Err(AdminsServiceError::NotFound)
        ));

        Ok(())
    }
}
