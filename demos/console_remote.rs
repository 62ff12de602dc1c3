// Console-backed demo: renders display frames as log lines and leaves both
// buttons unpressed. Useful for exercising the OAuth flow and the polling
// loop end to end without any hardware attached.
//
// Set SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET (or put them in .env),
// then open http://<listen addr>/ and follow the login link.

use spotify_remote_rs::{
    router, serve, Controller, DisplaySurface, InputPin, SpotifyClient, SETTINGS,
};
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

struct ConsoleDisplay {
    frame: Vec<String>,
}

impl DisplaySurface for ConsoleDisplay {
    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.frame.push(format!("text@({x},{y}): {text}"));
    }
    fn draw_play_icon(&mut self, x: i32, y: i32) {
        self.frame.push(format!("play@({x},{y})"));
    }
    fn draw_pause_icon(&mut self, x: i32, y: i32) {
        self.frame.push(format!("pause@({x},{y})"));
    }
    fn measure_width(&self, text: &str) -> u32 {
        // 6px per character, like the 6x10 font on the real panel
        text.chars().count() as u32 * 6
    }
    fn clear(&mut self) {
        self.frame.clear();
    }
    fn flush(&mut self) {
        for line in &self.frame {
            info!(target: "display", "{line}");
        }
    }
}

/// A line that is never pressed.
struct FloatingPin;

impl InputPin for FloatingPin {
    fn is_high(&mut self) -> bool {
        false
    }
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let settings = &*SETTINGS;
    let (auth_tx, auth_rx) = mpsc::channel(4);

    tokio::spawn(serve(router(auth_tx, settings), settings));

    let client = SpotifyClient::new(settings, None);
    let display = ConsoleDisplay { frame: Vec::new() };
    let controller = Controller::new(
        client,
        display,
        FloatingPin,
        FloatingPin,
        auth_rx,
        settings,
    );

    info!("open http://{}/ to log in", settings.listen_addr);

    tokio::select! {
        _ = controller.run() => {}
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }
}
