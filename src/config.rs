//! Fixed demo parameters. None of these are configurable at runtime.

/// Window size in pixels.
pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
/// Colour depth of the screen surface (RGBA8).
pub const SCREEN_BPP: u32 = 32;

/// Target frame rate.
pub const FRAMES_PER_SECOND: u32 = 10;

/// Size of a single walk-cycle frame on the sprite sheet.
pub const CHARACTER_WIDTH: u32 = 75;
pub const CHARACTER_HEIGHT: u32 = 100;
/// Horizontal pixels travelled per tick.
pub const CHARACTER_VELOCITY: i32 = 8;
/// Frames in the walk cycle.
pub const WALK_FRAME_COUNT: usize = 10;

pub const WINDOW_TITLE: &str = "SDL Walking Demo";
pub const SPRITE_SHEET_PATH: &str = "walk_iso.jpg";

/// Screen clear colour (RGBA).
pub const BACKGROUND: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
/// Sprite sheet pixels of this colour are transparent.
pub const COLOR_KEY: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// How often to log FPS (seconds).
pub const FPS_LOG_INTERVAL: f64 = 5.0;

/// Milliseconds available to each frame.
pub const fn frame_budget_ms() -> u32 {
    1000 / FRAMES_PER_SECOND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_at_ten_fps() {
        assert_eq!(frame_budget_ms(), 100);
    }

    #[test]
    fn bpp_matches_pixel_size() {
        assert_eq!(SCREEN_BPP as usize / 8, std::mem::size_of::<[u8; 4]>());
    }

    #[test]
    fn character_fits_on_screen() {
        assert!(CHARACTER_WIDTH < SCREEN_WIDTH);
        assert!(CHARACTER_HEIGHT < SCREEN_HEIGHT);
    }
}
