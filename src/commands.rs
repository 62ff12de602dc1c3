use reqwest::Method;

// Playback commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Next,
}

impl PlaybackCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackCommand::Play => "play",
            PlaybackCommand::Pause => "pause",
            PlaybackCommand::Next => "next",
        }
    }

    /// HTTP method the player API expects for this command.
    pub fn method(&self) -> Method {
        match self {
            PlaybackCommand::Play | PlaybackCommand::Pause => Method::PUT,
            PlaybackCommand::Next => Method::POST,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            PlaybackCommand::Play => "/me/player/play",
            PlaybackCommand::Pause => "/me/player/pause",
            PlaybackCommand::Next => "/me/player/next",
        }
    }
}
