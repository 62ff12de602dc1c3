use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};

use crate::client::SpotifyClient;
use crate::commands::PlaybackCommand;
use crate::display::{render_greeting, render_message, render_now_playing, DisplaySurface};
use crate::input::{ButtonEvent, DebouncedButton, InputPin};
use crate::server::AuthCodeRequest;
use crate::settings::Settings;
use crate::state::PlaybackStateTracker;
use crate::token::TokenLifecycleManager;

/// Everything the polling loop owns, collected into one explicit value.
/// All mutable state (token, snapshots, debounce state, device handles)
/// lives here and is touched only from the loop task.
pub struct Controller<D, P> {
    client: SpotifyClient,
    tokens: TokenLifecycleManager,
    tracker: PlaybackStateTracker,
    display: D,
    skip_pin: P,
    toggle_pin: P,
    skip_button: DebouncedButton,
    toggle_button: DebouncedButton,
    auth_rx: mpsc::Receiver<AuthCodeRequest>,
    settings: &'static Settings,
}

impl<D, P> Controller<D, P>
where
    D: DisplaySurface,
    P: InputPin,
{
    pub fn new(
        client: SpotifyClient,
        display: D,
        skip_pin: P,
        toggle_pin: P,
        auth_rx: mpsc::Receiver<AuthCodeRequest>,
        settings: &'static Settings,
    ) -> Self {
        Self {
            client,
            tokens: TokenLifecycleManager::new(),
            tracker: PlaybackStateTracker::new(),
            display,
            skip_pin,
            toggle_pin,
            skip_button: DebouncedButton::new(settings.debounce_window),
            toggle_button: DebouncedButton::new(settings.debounce_window),
            auth_rx,
            settings,
        }
    }

    /// Drive the loop at the configured rate. Network awaits dominate the
    /// period; at most one request is ever in flight.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.settings.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One loop iteration: pending login, buttons, poll, renewal. The
    /// steps after the first need a token, so they wait for the manager
    /// to leave the unauthenticated state.
    pub async fn tick(&mut self) {
        self.service_auth_callbacks().await;

        if !self.tokens.is_authenticated() {
            return;
        }

        self.service_buttons().await;
        self.poll_playback().await;
        self.service_renewal().await;
    }

    /// Step 1: drain codes delivered by the callback route and answer each
    /// waiting handler so it can render the matching page.
    async fn service_auth_callbacks(&mut self) {
        while let Ok(request) = self.auth_rx.try_recv() {
            let exchanged = match self.tokens.acquire(&self.client, &request.code).await {
                Ok(()) => {
                    self.greet_user().await;
                    true
                }
                Err(e) => {
                    warn!(error = %e, "authorization code exchange failed");
                    false
                }
            };
            let _ = request.respond_to.send(exchanged);
        }
    }

    /// Show the login greeting; a display-name fetch failure only costs
    /// the personalised text.
    async fn greet_user(&mut self) {
        let Some(token) = self.tokens.access_token() else {
            return;
        };
        let name = match self.client.display_name(token).await {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "could not fetch display name for greeting");
                String::new()
            }
        };
        render_greeting(&mut self.display, &name, self.settings);
    }

    /// Step 2: at most one command per button event per tick.
    async fn service_buttons(&mut self) {
        let now = Instant::now();
        let skip = self.skip_button.sample(self.skip_pin.is_high(), now);
        let toggle = self.toggle_button.sample(self.toggle_pin.is_high(), now);

        if let Some(ButtonEvent::Pressed) = skip {
            self.dispatch(PlaybackCommand::Next).await;
        }
        if let Some(ButtonEvent::Pressed) = toggle {
            // The service is authoritative for play state; the last
            // snapshot decides which way to toggle.
            let command = if self.tracker.is_playing() {
                PlaybackCommand::Pause
            } else {
                PlaybackCommand::Play
            };
            self.dispatch(command).await;
        }
    }

    async fn dispatch(&mut self, command: PlaybackCommand) {
        let Some(token) = self.tokens.access_token() else {
            return;
        };
        if let Err(e) = self.client.send_command(token, command).await {
            warn!(error = %e, command = command.name(), "playback command failed");
        }
    }

    /// Step 3: poll unconditionally; redraw only when the tracker says so.
    /// Any extraction or transport failure leaves the previous snapshot
    /// and the display untouched.
    async fn poll_playback(&mut self) {
        let Some(token) = self.tokens.access_token() else {
            return;
        };
        match self.client.poll_currently_playing(token).await {
            Ok(Some(snapshot)) => {
                if self.tracker.update(snapshot) {
                    if let Some(current) = self.tracker.current() {
                        render_now_playing(&mut self.display, current, self.settings);
                    }
                }
            }
            Ok(None) => debug!("nothing playing; keeping previous view"),
            Err(e) => warn!(error = %e, "poll failed; skipping display update"),
        }
    }

    /// Step 4: renewal check. A failed refresh keeps the stale token,
    /// shows the failure, and is retried on the next eligible tick.
    async fn service_renewal(&mut self) {
        if !self.tokens.needs_refresh(Instant::now()) {
            return;
        }
        if let Err(e) = self.tokens.refresh(&self.client).await {
            error!(error = %e, "token refresh failed");
            render_message(
                &mut self.display,
                "Couldn't refresh access token",
                self.settings,
            );
        }
    }
}
