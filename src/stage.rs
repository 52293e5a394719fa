use crate::character::animation::WalkClips;
use crate::character::Character;
use crate::config::{BACKGROUND, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::surface::Surface;

/// Everything the loop updates and draws: the screen being composed, the
/// sprite sheet, its walk clips, and the character.
pub struct Stage {
    screen: Surface,
    sprite_sheet: Surface,
    clips: WalkClips,
    character: Character,
}

impl Stage {
    /// Build the stage around a loaded sprite sheet. The screen starts out
    /// cleared to the background colour.
    pub fn new(sprite_sheet: Surface) -> Self {
        Self {
            screen: Surface::filled(SCREEN_WIDTH, SCREEN_HEIGHT, BACKGROUND),
            sprite_sheet,
            clips: WalkClips::slice(),
            character: Character::new(),
        }
    }

    pub fn update(&mut self) {
        self.character.walk();
    }

    /// Clear the screen and draw the character's next frame.
    pub fn render(&mut self) {
        self.screen.fill(BACKGROUND);
        self.character
            .show(&self.sprite_sheet, &self.clips, &mut self.screen);
    }

    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    pub fn character(&self) -> &Character {
        &self.character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHARACTER_HEIGHT, COLOR_KEY};

    const INK: [u8; 4] = [0x20, 0x40, 0x60, 0xFF];

    fn solid_sheet() -> Surface {
        Surface::filled(750, 300, INK).with_color_key(COLOR_KEY)
    }

    #[test]
    fn starts_with_blank_screen() {
        let stage = Stage::new(solid_sheet());
        let screen = stage.screen();
        assert_eq!((screen.width(), screen.height()), (SCREEN_WIDTH, SCREEN_HEIGHT));
        assert!(screen.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn tick_moves_then_draws() {
        let mut stage = Stage::new(solid_sheet());
        stage.update();
        stage.render();

        let top = SCREEN_HEIGHT - CHARACTER_HEIGHT;
        assert_eq!(stage.character().offset(), 8);
        assert_eq!(stage.character().frame(), 1);
        assert_eq!(stage.screen().pixel(8, top), Some(INK));
        assert_eq!(stage.screen().pixel(7, top), Some(BACKGROUND));
    }

    #[test]
    fn render_clears_previous_frame() {
        let mut stage = Stage::new(solid_sheet());
        stage.render();
        let top = SCREEN_HEIGHT - CHARACTER_HEIGHT;
        assert_eq!(stage.screen().pixel(0, top), Some(INK));

        stage.update();
        stage.render();
        // The trailing column from the old position is background again.
        assert_eq!(stage.screen().pixel(0, top), Some(BACKGROUND));
    }
}
