//! Bearer-token verification.

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::{StatusCode, header};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{errors::AuthError, supabase::SupabaseConfig};

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

pub type AuthFuture<'a> = Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + 'a>>;

pub trait AuthVerifier: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> AuthFuture<'a>;
}

/// Asks the hosted auth service who owns the token (`GET /auth/v1/user`).
pub struct SupabaseAuth {
    client: reqwest::Client,
    user_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(cfg: &SupabaseConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            user_url: format!("{}/auth/v1/user", cfg.url),
            anon_key: cfg.anon_key.clone(),
        })
    }
}

impl AuthVerifier for SupabaseAuth {
    fn verify<'a>(&'a self, token: &'a str) -> AuthFuture<'a> {
        Box::pin(async move {
            if token.trim().is_empty() {
                return Err(AuthError::MissingToken);
            }
            let resp = self
                .client
                .get(&self.user_url)
                .header("apikey", &self.anon_key)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .send()
                .await?;

            match resp.status() {
                s if s.is_success() => {
                    let user: AuthenticatedUser = resp.json().await?;
                    debug!(user_id = %user.id, "token verified");
                    Ok(user)
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
                s => {
                    warn!(status = %s, "auth service returned unexpected status");
                    Err(AuthError::Upstream(format!("auth service returned {s}")))
                }
            }
        })
    }
}

/// Development-only verifier: any non-empty token is a user, identified by
/// a UUIDv5 of the token so the same token always maps to the same profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct DevAuth;

impl AuthVerifier for DevAuth {
    fn verify<'a>(&'a self, token: &'a str) -> AuthFuture<'a> {
        Box::pin(async move {
            let token = token.trim();
            if token.is_empty() {
                return Err(AuthError::MissingToken);
            }
            Ok(AuthenticatedUser {
                id: services::uuid::stable_uuid(token).to_string(),
                email: None,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dev_auth_is_stable_per_token() {
        let a = DevAuth.verify("alice").await.unwrap();
        let b = DevAuth.verify(" alice ").await.unwrap();
        let c = DevAuth.verify("bob").await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a.id, c.id);
    }

    #[tokio::test]
    async fn dev_auth_rejects_blank_token() {
        assert!(matches!(DevAuth.verify("   ").await, Err(AuthError::MissingToken)));
    }
}
