// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As camadas de baixo (repos e services) nunca escolhem status HTTP;
// só o into_response() aqui embaixo faz essa tradução.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    // --- Autenticação (401). As mensagens são propositalmente genéricas
    // para não vazar qual condição exata falhou.
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found or inactive")]
    UserNotFoundOrInactive,

    #[error("Login failed")]
    LoginFailed,

    // --- Autorização (403)
    #[error("Master admin accounts must log in through the admin console")]
    MasterAdminOnTenantClient,

    #[error("{0}")]
    Forbidden(String),

    // --- Domínio
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("This e-mail is already in use")]
    EmailAlreadyExists,

    #[error("{0}")]
    Conflict(String),

    // --- Infra (500)
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn forbidden_permission(code: &str) -> Self {
        AppError::Forbidden(format!(
            "You need the '{code}' permission to perform this action"
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Devolve todos os detalhes da validação, campo a campo.
            AppError::Validation(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "message": "One or more fields are invalid",
                    "error": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),

            AppError::MissingToken | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token".into())
            }
            AppError::UserNotFoundOrInactive => {
                (StatusCode::UNAUTHORIZED, "User not found or inactive".into())
            }
            AppError::LoginFailed => (StatusCode::UNAUTHORIZED, "Login failed".into()),

            AppError::MasterAdminOnTenantClient => (
                StatusCode::FORBIDDEN,
                "Master admin accounts must log in through the admin console".into(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),

            AppError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "This e-mail is already in use".into())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),

            // Tudo que for infra vira 500 genérico; o detalhe fica no log.
            ref e => {
                tracing::error!("Internal server error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".into(),
                )
            }
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}
