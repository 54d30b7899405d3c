// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

// O tipo do usuário define o fallback de permissões (quando ele não tem
// nenhum cargo) e se ele enxerga dados de todas as properties ou só da sua.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    MasterAdmin,
    PropertyAdmin,
    Staff,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub user_type: UserType,

    // MASTER_ADMIN não tem property; os demais tipos sempre têm.
    pub property_id: Option<Uuid>,

    pub is_active: bool,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub refresh_token: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Qual cliente está fazendo o login. O cliente de operação do hotel não
// aceita contas MASTER_ADMIN; o console administrativo aceita qualquer uma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginClient {
    #[default]
    Hotel,
    Admin,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "The provided e-mail is invalid."))]
    #[schema(example = "admin@grandplaza.com")]
    pub email: String,

    #[validate(length(min = 6, message = "The password must have at least 6 characters."))]
    #[schema(example = "admin123")]
    pub password: String,

    #[serde(default)]
    pub client: LoginClient,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshPayload {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    pub current_password: String,

    #[validate(length(min = 6, message = "The new password must have at least 6 characters."))]
    pub new_password: String,
}

// O par de tokens devolvido no login e no refresh
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
    pub tokens: TokenPair,
}

// Perfil devolvido em GET /auth/profile: o usuário mais o conjunto efetivo
// de permissões (o frontend monta a UI a partir disso, sem duplicar tabela)
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: User,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

// Dados para criação de usuário pelo console (master) ou pelo admin da property
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "The first name is required."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "The last name is required."))]
    pub last_name: String,

    #[validate(email(message = "The provided e-mail is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "The password must have at least 6 characters."))]
    pub password: String,

    pub user_type: UserType,
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleUserStatusPayload {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub property_id: Option<Uuid>,
}

// Estrutura de dados ("claims") dentro do JWT.
// A mesma estrutura é usada no access e no refresh token; o que muda
// entre as duas classes é o segredo e o tempo de vida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub property_id: Option<Uuid>,
    pub iat: usize,
    pub exp: usize,
}
