//! Register Use Case
//!
//! Creates a new account with a fixed role.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{handle::Handle, role::Role};
use crate::error::{UsersError, UsersResult};

/// Register input
pub struct RegisterInput {
    pub handle: String,
    pub password: String,
    pub role: String,
}

/// Register output
pub struct RegisterOutput {
    pub user_id: uuid::Uuid,
    pub handle: String,
    pub role: Role,
}

/// Register use case
pub struct RegisterUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> RegisterUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> UsersResult<RegisterOutput> {
        // Validate role (closed set)
        let role =
            Role::from_code(&input.role).ok_or_else(|| UsersError::InvalidRole(input.role))?;

        // Validate handle
        let handle =
            Handle::new(&input.handle).map_err(|e| UsersError::InvalidHandle(e.to_string()))?;

        // Check if handle is taken
        if self.user_repo.exists_by_handle(&handle).await? {
            return Err(UsersError::HandleTaken);
        }

        // Validate and hash password
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| UsersError::PasswordValidation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| UsersError::Internal(e.to_string()))?;

        // Create user and credential
        let user = User::new(handle, role);
        let credential = Credential::new(user.user_id, password_hash);

        // Persist. The unique index on the canonical handle is the real
        // duplicate guard; the exists check above only improves the error.
        self.user_repo.create(&user).await?;
        self.credential_repo.create(&credential).await?;

        tracing::info!(
            user_id = %user.user_id,
            handle = %user.handle,
            role = %user.role,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id.into_uuid(),
            handle: user.handle.original().to_string(),
            role,
        })
    }
}
