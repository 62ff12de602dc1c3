use std::sync::Arc;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::commands::PlaybackCommand;
use crate::extract::{extract_field, require_field, ChunkedByteSource};
use crate::models::{TokenResponse, TrackSnapshot};
use crate::settings::Settings;
use crate::utils::SpotifyValueParser;
use crate::RemoteError;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

/// Outbound half of the controller: every request goes through one shared
/// reqwest client, so connections are pooled and released by the response's
/// own lifetime on every exit path.
pub struct SpotifyClient {
    http: Arc<Client>,
    settings: &'static Settings,
}

impl SpotifyClient {
    /// Create a new client. Optionally accepts a custom reqwest client for
    /// connection reuse and shared configuration.
    pub fn new(settings: &'static Settings, custom_client: Option<Arc<Client>>) -> Self {
        let http = custom_client.unwrap_or_else(|| {
            Arc::new(
                Client::builder()
                    .timeout(settings.request_timeout)
                    .connect_timeout(settings.request_timeout)
                    .build()
                    .unwrap(),
            )
        });
        Self { http, settings }
    }

    /// POST a grant to the token endpoint with Basic client authentication.
    /// Non-2xx → AuthServerError; a 2xx body that does not parse →
    /// MalformedResponse. Field presence is the grant's own concern.
    async fn token_request(&self, grant: &[(&str, &str)]) -> Result<TokenResponse, RemoteError> {
        let body = serde_urlencoded::to_string(grant)?;
        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "token endpoint rejected the grant");
            return Err(RemoteError::AuthServerError(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<TokenResponse>(&body)
            .map_err(|e| RemoteError::MalformedResponse(e.to_string()))
    }

    pub async fn authorization_code_grant(
        &self,
        code: &str,
    ) -> Result<TokenResponse, RemoteError> {
        debug!("exchanging authorization code");
        let grant = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
        ];
        self.token_request(&grant).await
    }

    pub async fn refresh_token_grant(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, RemoteError> {
        debug!("requesting token refresh");
        let grant = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        self.token_request(&grant).await
    }

    /// One poll of the currently-playing endpoint. `Ok(None)` means nothing
    /// is playing (204). The body is consumed field-by-field through the
    /// streaming extractor and never buffered whole; any missing or
    /// truncated field fails the whole poll.
    pub async fn poll_currently_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<TrackSnapshot>, RemoteError> {
        let response = self
            .http
            .get(format!("{API_BASE}/me/player/currently-playing"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            debug!("nothing playing");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RemoteError::UnexpectedStatus(status.as_u16()));
        }

        let mut source = ChunkedByteSource::new(response.bytes_stream());

        // Fields are requested in document order because all extractions
        // share one stream. The three `name` keys resolve to album artist,
        // album and track in turn.
        let progress =
            require_field(extract_field(&mut source, "progress_ms").await?, "progress_ms")?;
        let artist_name = require_field(extract_field(&mut source, "name").await?, "name")?;
        let album_name = require_field(extract_field(&mut source, "name").await?, "name")?;
        let duration =
            require_field(extract_field(&mut source, "duration_ms").await?, "duration_ms")?;
        let track_name = require_field(extract_field(&mut source, "name").await?, "name")?;
        let is_playing =
            require_field(extract_field(&mut source, "is_playing").await?, "is_playing")?;

        Ok(Some(TrackSnapshot {
            track_name,
            album_name,
            artist_name,
            is_playing: <str as SpotifyValueParser>::parse_bool(&is_playing),
            progress_ms: <str as SpotifyValueParser>::parse_millis(&progress),
            duration_ms: <str as SpotifyValueParser>::parse_millis(&duration),
        }))
    }

    /// Dispatch one playback command. The response body is uninteresting;
    /// any non-2xx status is surfaced to the caller.
    pub async fn send_command(
        &self,
        access_token: &str,
        command: PlaybackCommand,
    ) -> Result<(), RemoteError> {
        debug!(command = command.name(), "sending playback command");
        let response = self
            .http
            .request(command.method(), format!("{API_BASE}{}", command.path()))
            .bearer_auth(access_token)
            .body("")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, command = command.name(), "playback command rejected");
            return Err(RemoteError::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }

    /// Fetch the account's display name, streamed through the extractor
    /// like every other body.
    pub async fn display_name(&self, access_token: &str) -> Result<String, RemoteError> {
        let response = self
            .http
            .get(format!("{API_BASE}/me"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::UnexpectedStatus(status.as_u16()));
        }

        let mut source = ChunkedByteSource::new(response.bytes_stream());
        require_field(
            extract_field(&mut source, "display_name").await?,
            "display_name",
        )
    }
}
