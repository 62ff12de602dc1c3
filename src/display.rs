use crate::extract::fit_to_width;
use crate::models::TrackSnapshot;
use crate::settings::Settings;

/// Capability surface of the physical display. The core never names a
/// concrete device; anything that can draw text, draw the two glyphs and
/// measure pixel widths can back it.
pub trait DisplaySurface {
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    fn draw_play_icon(&mut self, x: i32, y: i32);
    fn draw_pause_icon(&mut self, x: i32, y: i32);
    fn measure_width(&self, text: &str) -> u32;
    fn clear(&mut self);
    fn flush(&mut self);
}

// Layout of the now-playing view
const TEXT_X: i32 = 10;
const TRACK_Y: i32 = 10;
const ARTIST_Y: i32 = 20;
const ALBUM_Y: i32 = 30;
const GLYPH_Y: i32 = 50;

/// Full redraw of the now-playing view. Names wider than the configured
/// text width are fitted with a trailing ellipsis.
pub fn render_now_playing<D: DisplaySurface>(
    display: &mut D,
    snapshot: &TrackSnapshot,
    settings: &Settings,
) {
    display.clear();

    let max = settings.max_text_width;
    let track = fit_to_width(&snapshot.track_name, |s| display.measure_width(s), max);
    let artist = fit_to_width(&snapshot.artist_name, |s| display.measure_width(s), max);
    let album = fit_to_width(&snapshot.album_name, |s| display.measure_width(s), max);

    display.draw_text(TEXT_X, TRACK_Y, &track);
    display.draw_text(TEXT_X, ARTIST_Y, &artist);
    display.draw_text(TEXT_X, ALBUM_Y, &album);

    let center_x = settings.display_width as i32 / 2;
    if snapshot.is_playing {
        display.draw_play_icon(center_x, GLYPH_Y);
    } else {
        display.draw_pause_icon(center_x, GLYPH_Y);
    }

    display.flush();
}

/// Centered single-line notice (refresh failures, startup messages).
pub fn render_message<D: DisplaySurface>(display: &mut D, text: &str, settings: &Settings) {
    display.clear();
    let x = (settings.display_width as i32 - display.measure_width(text) as i32) / 2;
    let y = settings.display_height as i32 / 2;
    display.draw_text(x.max(0), y, text);
    display.flush();
}

/// Post-login greeting, shown once after a successful code exchange.
pub fn render_greeting<D: DisplaySurface>(display: &mut D, display_name: &str, settings: &Settings) {
    display.clear();

    let greeting = format!("Hello {display_name}!");
    let info = "Music sleeping zzZZz";
    let width = settings.display_width as i32;
    let x_greeting = (width - display.measure_width(&greeting) as i32) / 2;
    let x_info = (width - display.measure_width(info) as i32) / 2;
    let y = settings.display_height as i32 / 2;

    display.draw_text(x_greeting.max(0), y, &greeting);
    display.draw_text(x_info.max(0), GLYPH_Y, info);
    display.flush();
}
