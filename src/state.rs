use tracing::debug;

use crate::models::TrackSnapshot;

/// Decides whether a fresh snapshot warrants a display update. Snapshots
/// are swapped wholesale; a failed poll never reaches this type.
#[derive(Default)]
pub struct PlaybackStateTracker {
    current: Option<TrackSnapshot>,
}

impl PlaybackStateTracker {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Install `snapshot` as the current state. Returns true when the
    /// display needs redrawing: the track changed or playback flipped.
    /// Album, artist and progress changes alone never trigger a redraw;
    /// they are only ever shown alongside a track change.
    pub fn update(&mut self, snapshot: TrackSnapshot) -> bool {
        let redraw = match &self.current {
            Some(previous) => {
                previous.track_name != snapshot.track_name
                    || previous.is_playing != snapshot.is_playing
            }
            None => true,
        };

        if redraw {
            debug!(
                track = %snapshot.track_name,
                playing = snapshot.is_playing,
                "display update needed"
            );
        }
        self.current = Some(snapshot);
        redraw
    }

    pub fn current(&self) -> Option<&TrackSnapshot> {
        self.current.as_ref()
    }

    /// Play state of the last snapshot; unknown counts as paused so the
    /// toggle button's first press starts playback.
    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|s| s.is_playing)
    }
}
