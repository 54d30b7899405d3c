// src/services/token.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    models::auth::{Claims, TokenPair, User},
};

// Segredos e tempos de vida das duas classes de token.
// Montado uma única vez no boot (a partir do ambiente) e injetado no
// TokenService — nada de singleton global.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")?;
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")?;

        let access_hours: i64 = std::env::var("ACCESS_TOKEN_TTL_HOURS")
            .ok()
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(2);
        let refresh_days: i64 = std::env::var("REFRESH_TOKEN_TTL_DAYS")
            .ok()
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(7);

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::hours(access_hours),
            refresh_ttl: Duration::days(refresh_days),
        })
    }
}

// Serviço puro: assina e verifica tokens, sem tocar no banco.
// A persistência do refresh token (modelo de um por usuário) fica no
// AuthService.
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    // Emite o par access + refresh para o usuário. As duas classes carregam
    // as mesmas claims; o que muda é o segredo e o tempo de vida.
    pub fn issue(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.sign(user, &self.config.access_secret, self.config.access_ttl)?;
        let refresh_token = self.sign(user, &self.config.refresh_secret, self.config.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // Falha fechada: qualquer problema (assinatura, expiração, formato)
    // devolve None, nunca um erro.
    pub fn verify_access(&self, token: &str) -> Option<Claims> {
        Self::verify(token, &self.config.access_secret)
    }

    pub fn verify_refresh(&self, token: &str) -> Option<Claims> {
        Self::verify(token, &self.config.refresh_secret)
    }

    fn sign(&self, user: &User, secret: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            user_type: user.user_type,
            property_id: user.property_id,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )?)
    }

    fn verify(token: &str, secret: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .ok()
        .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserType;
    use uuid::Uuid;

    fn config(access_ttl: Duration) -> TokenConfig {
        TokenConfig {
            access_secret: "access-secret-for-tests".into(),
            refresh_secret: "refresh-secret-for-tests".into(),
            access_ttl,
            refresh_ttl: Duration::days(7),
        }
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "admin@grandplaza.com".into(),
            password_hash: "$2b$12$irrelevant".into(),
            user_type: UserType::PropertyAdmin,
            property_id: Some(Uuid::new_v4()),
            is_active: true,
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn round_trip_recovers_identity() {
        let service = TokenService::new(config(Duration::hours(2)));
        let user = sample_user();

        let pair = service.issue(&user).unwrap();

        let access = service.verify_access(&pair.access_token).unwrap();
        assert_eq!(access.sub, user.id);
        assert_eq!(access.email, user.email);
        assert_eq!(access.user_type, UserType::PropertyAdmin);
        assert_eq!(access.property_id, user.property_id);

        let refresh = service.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sub, user.id);
    }

    #[test]
    fn expired_access_token_verifies_to_none() {
        // Além da janela de leeway padrão do jsonwebtoken (60s)
        let service = TokenService::new(config(Duration::seconds(-120)));
        let pair = service.issue(&sample_user()).unwrap();

        assert!(service.verify_access(&pair.access_token).is_none());
    }

    #[test]
    fn tampered_token_verifies_to_none() {
        let service = TokenService::new(config(Duration::hours(2)));
        let pair = service.issue(&sample_user()).unwrap();

        let mut tampered = pair.access_token.clone();
        tampered.push('x');
        assert!(service.verify_access(&tampered).is_none());
        assert!(service.verify_access("not-a-jwt").is_none());
    }

    #[test]
    fn token_classes_are_not_interchangeable() {
        let service = TokenService::new(config(Duration::hours(2)));
        let pair = service.issue(&sample_user()).unwrap();

        // Um refresh token não vale como access token e vice-versa.
        assert!(service.verify_access(&pair.refresh_token).is_none());
        assert!(service.verify_refresh(&pair.access_token).is_none());
    }
}
