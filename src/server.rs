use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::settings::Settings;
use crate::RemoteError;

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

const SUCCESS_PAGE: &str = "<h1>Connection successful!</h1><p>You are now connected to your Spotify Account. You can now close this site.</p>";
const ERROR_PAGE: &str = "<h1>Something went wrong</h1><p>Connection to Spotify Account went wrong. Please retry.</p>";

/// An authorization code received on the callback route, together with the
/// channel its handler waits on to pick the response page.
pub struct AuthCodeRequest {
    pub code: String,
    pub respond_to: oneshot::Sender<bool>,
}

#[derive(Clone)]
struct ServerState {
    auth_tx: mpsc::Sender<AuthCodeRequest>,
    settings: &'static Settings,
}

/// Build the inbound router: login page, OAuth callback, catch-all echo.
pub fn router(auth_tx: mpsc::Sender<AuthCodeRequest>, settings: &'static Settings) -> Router {
    let state = ServerState { auth_tx, settings };
    Router::new()
        .route("/", get(handle_root))
        .route("/callback", get(handle_callback))
        .fallback(handle_not_found)
        .with_state(state)
}

/// Bind and serve the router until the process exits.
pub async fn serve(router: Router, settings: &'static Settings) -> Result<(), RemoteError> {
    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    info!(addr = %settings.listen_addr, "callback server listening");
    axum::serve(listener, router).await?;
    Ok(())
}

fn random_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

async fn handle_root(State(state): State<ServerState>) -> Html<String> {
    let settings = state.settings;
    let nonce = random_state_nonce();
    let query = serde_urlencoded::to_string([
        ("response_type", "code"),
        ("client_id", settings.client_id.as_str()),
        ("scope", settings.auth_scope.as_str()),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("state", nonce.as_str()),
    ])
    .unwrap_or_default();

    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>Spotify Authentication</title>\n\
         </head>\n\
         <body>\n\
         <p>Hello World! Press <a href='{AUTHORIZE_URL}?{query}'>here</a> to login to Spotify</p>\n\
         </body>\n\
         </html>\n"
    ))
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

/// Hand the code to the controller loop and serve whichever page matches
/// the exchange outcome. The handler blocks until the loop has serviced
/// the code on one of its ticks.
async fn handle_callback(
    State(state): State<ServerState>,
    Query(query): Query<CallbackQuery>,
) -> (StatusCode, Html<&'static str>) {
    let Some(code) = query.code else {
        warn!("callback hit without a code parameter");
        return (StatusCode::BAD_REQUEST, Html(ERROR_PAGE));
    };

    let (respond_to, outcome) = oneshot::channel();
    if state
        .auth_tx
        .send(AuthCodeRequest { code, respond_to })
        .await
        .is_err()
    {
        warn!("controller loop is gone; dropping authorization code");
        return (StatusCode::SERVICE_UNAVAILABLE, Html(ERROR_PAGE));
    }

    match outcome.await {
        Ok(true) => {
            info!("authorization code exchanged successfully");
            (StatusCode::OK, Html(SUCCESS_PAGE))
        }
        _ => (StatusCode::BAD_GATEWAY, Html(ERROR_PAGE)),
    }
}

/// Catch-all: echo the request back so a misconfigured redirect URI is
/// easy to spot from the browser.
async fn handle_not_found(method: Method, uri: Uri) -> (StatusCode, String) {
    let args: HashMap<String, String> = uri
        .query()
        .and_then(|q| serde_urlencoded::from_str(q).ok())
        .unwrap_or_default();

    let mut message = String::from("Something went wrong:(\nPlease retry\n\n");
    message.push_str(&format!("URI: {}\n", uri.path()));
    message.push_str(&format!("Method: {}\n", method));
    message.push_str(&format!("Arguments: {}\n", args.len()));
    for (name, value) in &args {
        message.push_str(&format!(" {}: {}\n", name, value));
    }
    (StatusCode::NOT_FOUND, message)
}
