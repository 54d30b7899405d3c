// src/services/auth.rs

use bcrypt::{hash, verify};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{LoginClient, TokenPair, User, UserType},
    services::token::TokenService,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, tokens: TokenService) -> Self {
        Self { user_repo, tokens }
    }

    // Login. E-mail inexistente, senha errada e conta desativada devolvem
    // o MESMO erro genérico — o cliente não consegue distinguir os casos.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: LoginClient,
    ) -> Result<(User, TokenPair), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::LoginFailed)?;

        // bcrypt é lento de propósito; roda fora do executor async
        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))??;

        if !is_password_valid || !user.is_active {
            return Err(AppError::LoginFailed);
        }

        // O cliente de operação do hotel não aceita contas master.
        // Essa recusa é explícita (diferente do "Login failed" genérico).
        if user.user_type == UserType::MasterAdmin && client == LoginClient::Hotel {
            return Err(AppError::MasterAdminOnTenantClient);
        }

        let pair = self.tokens.issue(&user)?;

        // Um refresh token por usuário: gravar o novo invalida o anterior
        self.user_repo
            .set_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        Ok((user, pair))
    }

    // Troca um refresh token válido por um novo par. O token apresentado
    // precisa bater byte a byte com o que está gravado na linha do usuário.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .tokens
            .verify_refresh(refresh_token)
            .ok_or(AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AppError::UserNotFoundOrInactive)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::InvalidToken);
        }

        let pair = self.tokens.issue(&user)?;
        self.user_repo
            .set_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        Ok(pair)
    }

    // Revoga o refresh token. O access token segue válido até expirar
    // (tradeoff aceito: a expiração curta limita a janela).
    pub async fn revoke(&self, user_id: uuid::Uuid) -> Result<(), AppError> {
        self.user_repo.set_refresh_token(user_id, None).await
    }

    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let current_clone = current_password.to_owned();
        let hash_clone = user.password_hash.clone();
        let current_ok =
            tokio::task::spawn_blocking(move || verify(&current_clone, &hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))??;

        if !current_ok {
            return Err(AppError::BadRequest("The current password is incorrect".into()));
        }

        let new_clone = new_password.to_owned();
        let new_hash = tokio::task::spawn_blocking(move || hash(&new_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))??;

        self.user_repo.update_password(user.id, &new_hash).await?;

        // Troca de senha derruba a sessão de refresh vigente
        self.user_repo.set_refresh_token(user.id, None).await
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))??;

        Ok(hashed)
    }
}
