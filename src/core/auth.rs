//! Registration, login, and signed session tokens.
//!
//! Tokens are `base64url(payload).base64url(hmac-sha256(payload))` with
//! the payload carrying the user id and an expiry timestamp; verification
//! uses the MAC's constant-time comparison. Passwords are stored as
//! salted SHA-256 digests peppered with the server secret. Login failures
//! never say whether the e-mail or the password was wrong.

use crate::config::AppConfig;
use crate::entities::{User, user};
use crate::errors::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Input for account registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    /// Display name
    pub name: String,
    /// Login e-mail
    pub email: String,
    /// Plain password, at least 8 characters
    pub password: String,
}

/// Input for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    /// Login e-mail
    pub email: String,
    /// Plain password
    pub password: String,
}

fn password_digest(secret: &str, salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(secret.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

fn sign(secret: &str, payload: &str) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| Error::Config {
        message: "token secret must not be empty".to_string(),
    })?;
    mac.update(payload.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Issues a token for `user_id` that expires at `expires_at` (unix secs).
pub fn issue_token(secret: &str, user_id: i64, expires_at: i64) -> Result<String> {
    let payload = format!("{user_id}.{expires_at}");
    let signature = sign(secret, &payload)?;
    Ok(format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(payload.as_bytes()),
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Verifies a token against `now` (unix secs) and returns the user id.
///
/// # Errors
/// [`Error::Unauthorized`] for anything malformed, forged, or expired.
pub fn verify_token(secret: &str, token: &str, now: i64) -> Result<i64> {
    let (payload_b64, signature_b64) = token.split_once('.').ok_or(Error::Unauthorized)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| Error::Unauthorized)?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| Error::Unauthorized)?;
    let payload = String::from_utf8(payload_bytes).map_err(|_| Error::Unauthorized)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| Error::Unauthorized)?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).map_err(|_| Error::Unauthorized)?;

    let (user_id, expires_at) = payload.split_once('.').ok_or(Error::Unauthorized)?;
    let user_id: i64 = user_id.parse().map_err(|_| Error::Unauthorized)?;
    let expires_at: i64 = expires_at.parse().map_err(|_| Error::Unauthorized)?;
    if expires_at <= now {
        return Err(Error::Unauthorized);
    }
    Ok(user_id)
}

fn validate_registration(input: &RegisterInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::validation("name must not be empty"));
    }
    if !input.email.contains('@') {
        return Err(Error::validation("e-mail address is not valid"));
    }
    if input.password.chars().count() < 8 {
        return Err(Error::validation(
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

/// Registers an account and returns it with a fresh session token.
///
/// # Errors
/// Validation errors for bad input or an already-registered e-mail.
pub async fn register(
    db: &DatabaseConnection,
    config: &AppConfig,
    input: RegisterInput,
) -> Result<(user::Model, String)> {
    validate_registration(&input)?;
    let email = input.email.trim().to_lowercase();

    let taken = User::find()
        .filter(user::Column::Email.eq(email.clone()))
        .one(db)
        .await?
        .is_some();
    if taken {
        return Err(Error::validation("e-mail is already registered"));
    }

    let salt = Uuid::new_v4().simple().to_string();
    let digest = password_digest(&config.token_secret, &salt, &input.password);

    let created = user::ActiveModel {
        name: Set(input.name.trim().to_string()),
        email: Set(email),
        password_digest: Set(digest),
        password_salt: Set(salt),
        partner_id: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let token = issue_token(
        &config.token_secret,
        created.id,
        Utc::now().timestamp() + config.token_ttl_secs,
    )?;
    Ok((created, token))
}

/// Authenticates credentials and returns the account with a fresh token.
///
/// # Errors
/// [`Error::Unauthorized`] for an unknown e-mail or wrong password alike.
pub async fn login(
    db: &DatabaseConnection,
    config: &AppConfig,
    input: LoginInput,
) -> Result<(user::Model, String)> {
    let email = input.email.trim().to_lowercase();
    let account = User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)?;

    let digest = password_digest(&config.token_secret, &account.password_salt, &input.password);
    if digest != account.password_digest {
        return Err(Error::Unauthorized);
    }

    let token = issue_token(
        &config.token_secret,
        account.id,
        Utc::now().timestamp() + config.token_ttl_secs,
    )?;
    Ok((account, token))
}
