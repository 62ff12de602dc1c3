//! Controller library for the Spotify Web API that authenticates with the
//! authorization-code flow, polls the currently-playing endpoint through a
//! bounded-memory streaming extractor, and drives a small pixel display
//! plus two physical buttons (skip, play/pause).
//!
//! The hardware seams are traits: anything that implements
//! [`DisplaySurface`] and [`InputPin`] can back a [`Controller`], so the
//! crate builds and tests on any host.
//!
//! # Logging
//!
//! This library uses the `tracing` crate for logging. To enable logs,
//! you'll need to initialize a tracing subscriber in your application.
//!
//! Example using `tracing_subscriber`:
//! ```no_run
//! use tracing::Level;
//! use tracing_subscriber::FmtSubscriber;
//!
//! // Create a subscriber with the desired log level
//! let subscriber = FmtSubscriber::builder()
//!     .with_max_level(Level::DEBUG) // Set to DEBUG, INFO, WARN, or ERROR
//!     .finish();
//!
//! // Initialize the global subscriber
//! tracing::subscriber::set_global_default(subscriber)
//!     .expect("Failed to set tracing subscriber");
//! ```

mod client;
pub use client::SpotifyClient;
mod commands;
pub use commands::PlaybackCommand;
mod controller;
pub use controller::Controller;
mod display;
pub use display::{render_greeting, render_message, render_now_playing, DisplaySurface};
mod error;
pub use error::RemoteError;
mod extract;
pub use extract::{
    extract_field, fit_to_width, require_field, strip_field_envelope, ByteSource,
    ChunkedByteSource, ExtractionResult, FieldScanner, ScanStep, SliceSource,
};
mod input;
pub use input::{ButtonEvent, DebouncedButton, InputPin};
mod models;
pub use models::{TokenResponse, TrackSnapshot};
mod server;
pub use server::{router, serve, AuthCodeRequest};
mod settings;
pub use settings::{Settings, SETTINGS};
mod state;
pub use state::PlaybackStateTracker;
mod token;
pub use token::{AuthState, Token, TokenLifecycleManager};
mod utils;
pub use utils::SpotifyValueParser;
