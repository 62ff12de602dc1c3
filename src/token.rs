use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::client::SpotifyClient;
use crate::models::TokenResponse;
use crate::RemoteError;

/// Renewal starts this long before the reported expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// A bearer token pair as issued by the accounts service. Replaced
/// wholesale on refresh, never mutated field-by-field.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: Instant,
}

impl Token {
    /// Build a token from an authorization-code exchange. All four fields
    /// are required; a 2xx response missing any of them is malformed, not a
    /// partial success.
    pub fn from_acquire_response(
        response: TokenResponse,
        obtained_at: Instant,
    ) -> Result<Self, RemoteError> {
        let TokenResponse {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            scope: Some(scope),
            expires_in: Some(expires_in),
        } = response
        else {
            return Err(RemoteError::MalformedResponse(
                "authorization-code grant must return access_token, refresh_token, scope and expires_in".to_string(),
            ));
        };

        Ok(Self {
            access_token,
            refresh_token,
            scope,
            expires_in,
            obtained_at,
        })
    }

    /// Build the replacement token from a refresh grant. Only access_token
    /// and expires_in are required; a missing refresh_token or scope keeps
    /// the previous one.
    pub fn refreshed_from_response(
        response: TokenResponse,
        previous: &Token,
        obtained_at: Instant,
    ) -> Result<Self, RemoteError> {
        let (Some(access_token), Some(expires_in)) = (response.access_token, response.expires_in)
        else {
            return Err(RemoteError::MalformedResponse(
                "refresh grant must return access_token and expires_in".to_string(),
            ));
        };

        Ok(Self {
            access_token,
            refresh_token: response
                .refresh_token
                .unwrap_or_else(|| previous.refresh_token.clone()),
            scope: response.scope.unwrap_or_else(|| previous.scope.clone()),
            expires_in,
            obtained_at,
        })
    }

    /// True exactly from `expires_in - 60` seconds after issuance onwards.
    pub fn needs_refresh(&self, now: Instant) -> bool {
        let lifetime = Duration::from_secs(self.expires_in).saturating_sub(REFRESH_MARGIN);
        now.duration_since(self.obtained_at) >= lifetime
    }
}

/// Authentication state. A token past its expiry stays `Authenticated` and
/// keeps being presented until a replacement lands; only the very first
/// acquisition transitions out of `Unauthenticated`.
pub enum AuthState {
    Unauthenticated,
    Authenticated(Token),
}

/// Issues and renews the token pair and decides when renewal is due.
pub struct TokenLifecycleManager {
    state: AuthState,
}

impl TokenLifecycleManager {
    pub fn new() -> Self {
        Self {
            state: AuthState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.state {
            AuthState::Authenticated(token) => Some(token),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.token().map(|token| token.access_token.as_str())
    }

    /// Exchange an authorization code for the initial token pair.
    pub async fn acquire(
        &mut self,
        client: &SpotifyClient,
        code: &str,
    ) -> Result<(), RemoteError> {
        let response = client.authorization_code_grant(code).await?;
        let token = Token::from_acquire_response(response, Instant::now())?;
        info!(scope = %token.scope, "access token acquired");
        self.state = AuthState::Authenticated(token);
        Ok(())
    }

    /// Renew the current token pair. On failure the previous token stays in
    /// place and the attempt repeats on the next eligible tick.
    pub async fn refresh(&mut self, client: &SpotifyClient) -> Result<(), RemoteError> {
        let AuthState::Authenticated(current) = &self.state else {
            return Err(RemoteError::NotAuthenticated);
        };
        let response = client.refresh_token_grant(&current.refresh_token).await?;
        let token = Token::refreshed_from_response(response, current, Instant::now())?;
        debug!("access token refreshed");
        self.state = AuthState::Authenticated(token);
        Ok(())
    }

    /// Whether renewal is due. Never true before authentication.
    pub fn needs_refresh(&self, now: Instant) -> bool {
        self.token().is_some_and(|token| token.needs_refresh(now))
    }
}

impl Default for TokenLifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
