use serde::Deserialize;

// Response type for the accounts-service token endpoint. Every field is
// optional here so each grant type can enforce its own required set.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// One complete reading of the currently-playing endpoint. Produced only by
/// a fully successful poll; a failed poll leaves the prior snapshot alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub track_name: String,
    pub album_name: String,
    pub artist_name: String,
    pub is_playing: bool,
    pub progress_ms: u64,
    pub duration_ms: u64,
}
