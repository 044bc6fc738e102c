//! Login Use Case
//!
//! Verifies credentials and issues a signed bearer token.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;
use platform::token::{self, TokenClaims};

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{handle::Handle, role::Role};
use crate::error::{UsersError, UsersResult};

/// Login input
pub struct LoginInput {
    pub handle: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub user_id: uuid::Uuid,
    pub handle: String,
    pub role: Role,
    pub points: i64,
}

/// Login use case
pub struct LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> LoginUseCase<U, C>
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

    pub async fn execute(&self, input: LoginInput) -> UsersResult<LoginOutput> {
        // Unknown handle and wrong password both map to InvalidCredentials
        // so the response does not reveal which part failed.
        let handle = Handle::new(&input.handle).map_err(|_| UsersError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_handle(&handle)
            .await?
            .ok_or(UsersError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or(UsersError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| UsersError::InvalidCredentials)?;

        if !credential
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(UsersError::InvalidCredentials);
        }

        // Issue bearer token
        let claims = TokenClaims::new(
            user.user_id.into_uuid(),
            user.role.code(),
            Utc::now(),
            self.config.token_ttl_chrono(),
        );
        let token = token::issue(&claims, &self.config.token_secret)
            .map_err(|e| UsersError::Internal(e.to_string()))?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User logged in"
        );

        Ok(LoginOutput {
            token,
            user_id: user.user_id.into_uuid(),
            handle: user.handle.original().to_string(),
            role: user.role,
            points: user.points,
        })
    }
}
