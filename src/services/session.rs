use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use chrono::{Duration, NaiveDateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::errors::AppError;

type HmacSha1 = Hmac<Sha1>;

pub const SESSION_COOKIE: &str = "admin_session";

/// Holds the admin credential and the set of live admin sessions.
///
/// Tokens handed to clients are signed with the configured secret, so a
/// cookie is only honoured if it was issued by this process and has not been
/// revoked or outlived its TTL.
pub struct Authenticator {
    password: String,
    signing_key: Vec<u8>,
    ttl: Duration,
    sessions: Mutex<HashMap<String, NaiveDateTime>>,
}

impl Authenticator {
    pub fn new(password: &str, signing_key: &str, ttl_minutes: i64) -> Self {
        Self {
            password: password.to_string(),
            signing_key: signing_key.as_bytes().to_vec(),
            ttl: Duration::try_minutes(ttl_minutes).unwrap_or(Duration::MAX),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn mac(&self) -> Result<HmacSha1, AppError> {
        HmacSha1::new_from_slice(&self.signing_key)
            .map_err(|e| AppError::Session(format!("invalid signing key: {e}")))
    }

    /// Constant-time comparison against the configured password.
    fn password_matches(&self, candidate: &str) -> Result<bool, AppError> {
        let mut expected = self.mac()?;
        expected.update(self.password.as_bytes());
        let tag = expected.finalize().into_bytes();

        let mut given = self.mac()?;
        given.update(candidate.as_bytes());
        Ok(given.verify_slice(&tag).is_ok())
    }

    /// Issues a signed token. Expired entries are swept on every issue so
    /// cookies that never come back do not pile up.
    fn issue(&self) -> Result<String, AppError> {
        let now = Utc::now().naive_utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Session("session lifetime out of range".to_string()))?;

        let token = Uuid::new_v4().simple().to_string();
        let mut mac = self.mac()?;
        mac.update(token.as_bytes());
        let signature =
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|_, exp| *exp > now);
        sessions.insert(token.clone(), expires_at);

        Ok(format!("{token}.{signature}"))
    }

    /// Returns the token inside a cookie value if its signature checks out.
    fn verified_token<'a>(&self, cookie: &'a str) -> Option<&'a str> {
        let (token, signature) = cookie.split_once('.')?;
        let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(signature)
            .ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(token.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(token)
    }

    fn is_live(&self, cookie: &str) -> bool {
        let Some(token) = self.verified_token(cookie) else {
            return false;
        };

        let now = Utc::now().naive_utc();
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get(token).copied() {
            Some(expires_at) if expires_at > now => true,
            Some(_) => {
                sessions.remove(token);
                tracing::debug!("admin session expired");
                false
            }
            None => false,
        }
    }

    fn revoke(&self, cookie: &str) {
        if let Some(token) = self.verified_token(cookie) {
            self.sessions.lock().unwrap().remove(token);
        }
    }
}

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Per-request admin session, carried in the request's cookie jar.
///
/// Handlers hand the jar back with [`Session::into_jar`] so that a login or
/// logout reaches the client as a `Set-Cookie`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    jar: CookieJar,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }

    fn cookie_value(&self) -> Option<&str> {
        self.jar
            .get(SESSION_COOKIE)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
    }

    pub fn login(&mut self, auth: &Authenticator, password: &str) -> Result<(), AppError> {
        if !auth.password_matches(password)? {
            tracing::warn!("admin login rejected");
            return Err(AppError::WrongPassword);
        }

        if let Some(old) = self.cookie_value() {
            auth.revoke(old);
        }
        let value = auth.issue()?;
        self.jar = std::mem::take(&mut self.jar).add(session_cookie(value));
        tracing::info!("admin logged in");
        Ok(())
    }

    pub fn logout(&mut self, auth: &Authenticator) {
        if let Some(cookie) = self.cookie_value() {
            auth.revoke(cookie);
            tracing::info!("admin logged out");
        }
        let removal = Cookie::build(SESSION_COOKIE).path("/").build();
        self.jar = std::mem::take(&mut self.jar).remove(removal);
    }

    pub fn is_authenticated(&self, auth: &Authenticator) -> bool {
        self.cookie_value()
            .map(|cookie| auth.is_live(cookie))
            .unwrap_or(false)
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Session::from_headers(&parts.headers))
    }
}
