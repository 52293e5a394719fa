pub mod animation;

use crate::config::{
    CHARACTER_HEIGHT, CHARACTER_VELOCITY, CHARACTER_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::surface::Surface;

use self::animation::{WalkClips, WalkCycle};

/// The walking character: horizontal offset, constant velocity, and its
/// place in the walk cycle. Always drawn standing on the bottom edge.
#[derive(Debug, Clone)]
pub struct Character {
    offset: i32,
    velocity: i32,
    cycle: WalkCycle,
    screen_w: u32,
    screen_h: u32,
}

impl Character {
    pub fn new() -> Self {
        Self::with_bounds(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn with_bounds(screen_w: u32, screen_h: u32) -> Self {
        Self {
            offset: 0,
            velocity: CHARACTER_VELOCITY,
            cycle: WalkCycle::default(),
            screen_w,
            screen_h,
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn frame(&self) -> usize {
        self.cycle.frame()
    }

    /// Take one step right. A step that would carry the sprite past the right
    /// edge is undone entirely rather than shortened, so the character can
    /// stop a few pixels short of the edge.
    pub fn walk(&mut self) {
        self.offset += self.velocity;

        if self.offset + CHARACTER_WIDTH as i32 > self.screen_w as i32 {
            self.offset -= self.velocity;
        }
    }

    /// Advance the walk cycle, then draw the current frame onto `screen`.
    pub fn show(&mut self, sheet: &Surface, clips: &WalkClips, screen: &mut Surface) {
        let frame = self.cycle.advance();
        let y = self.screen_h as i32 - CHARACTER_HEIGHT as i32;
        screen.blit(sheet, Some(clips.frame(frame)), self.offset, y);
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COLOR_KEY, WALK_FRAME_COUNT};
    use crate::surface::Pixel;
    use proptest::prelude::*;

    const WHITE: Pixel = [0xFF, 0xFF, 0xFF, 0xFF];

    fn frame_color(i: usize) -> Pixel {
        [i as u8 * 20, 0, 0, 0xFF]
    }

    /// White sheet with each walk frame painted a distinct solid colour.
    fn sheet_image() -> image::RgbaImage {
        let mut img = image::RgbaImage::from_pixel(
            CHARACTER_WIDTH * WALK_FRAME_COUNT as u32,
            CHARACTER_HEIGHT * 3,
            image::Rgba(WHITE),
        );
        for (i, clip) in WalkClips::slice().as_slice().iter().enumerate() {
            for y in clip.y..clip.bottom() {
                for x in clip.x..clip.right() {
                    img.put_pixel(x as u32, y as u32, image::Rgba(frame_color(i)));
                }
            }
        }
        img
    }

    fn to_sheet(img: image::RgbaImage) -> Surface {
        Surface::from_image(&image::DynamicImage::ImageRgba8(img)).with_color_key(COLOR_KEY)
    }

    fn test_sheet() -> Surface {
        to_sheet(sheet_image())
    }

    #[test]
    fn walks_right_by_velocity() {
        let mut c = Character::new();
        c.walk();
        assert_eq!(c.offset(), 8);
        c.walk();
        assert_eq!(c.offset(), 16);
    }

    #[test]
    fn stops_short_of_right_edge() {
        let mut c = Character::new();
        for _ in 0..100 {
            c.walk();
        }
        // Largest multiple of 8 not past 640 - 75 = 565.
        assert_eq!(c.offset(), 560);

        c.walk();
        assert_eq!(c.offset(), 560);
    }

    #[test]
    fn show_cycles_frames_from_one() {
        let sheet = test_sheet();
        let clips = WalkClips::slice();
        let mut screen = Surface::filled(SCREEN_WIDTH, SCREEN_HEIGHT, WHITE);
        let mut c = Character::new();

        let frames: Vec<usize> = (0..11)
            .map(|_| {
                c.show(&sheet, &clips, &mut screen);
                c.frame()
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1]);
    }

    #[test]
    fn show_draws_bottom_anchored_frame() {
        let sheet = test_sheet();
        let clips = WalkClips::slice();
        let mut screen = Surface::filled(SCREEN_WIDTH, SCREEN_HEIGHT, WHITE);
        let mut c = Character::new();
        c.walk();
        c.show(&sheet, &clips, &mut screen);

        let top = SCREEN_HEIGHT - CHARACTER_HEIGHT;
        assert_eq!(screen.pixel(8, top), Some(frame_color(1)));
        assert_eq!(
            screen.pixel(8 + CHARACTER_WIDTH - 1, SCREEN_HEIGHT - 1),
            Some(frame_color(1))
        );
        assert_eq!(screen.pixel(7, top), Some(WHITE));
        assert_eq!(screen.pixel(8, top - 1), Some(WHITE));
        assert_eq!(screen.pixel(8 + CHARACTER_WIDTH, top), Some(WHITE));
    }

    #[test]
    fn keyed_pixels_leave_background() {
        let clip = WalkClips::slice().frame(1);
        // Punch a keyed hole in the corner of frame 1.
        let mut img = sheet_image();
        img.put_pixel(clip.x as u32, clip.y as u32, image::Rgba(WHITE));
        let sheet = to_sheet(img);

        let backdrop: Pixel = [0, 0x80, 0, 0xFF];
        let mut screen = Surface::filled(SCREEN_WIDTH, SCREEN_HEIGHT, backdrop);
        let mut c = Character::new();
        c.show(&sheet, &WalkClips::slice(), &mut screen);

        let top = SCREEN_HEIGHT - CHARACTER_HEIGHT;
        assert_eq!(screen.pixel(0, top), Some(backdrop));
        assert_eq!(screen.pixel(1, top), Some(frame_color(1)));
    }

    proptest! {
        #[test]
        fn offset_never_leaves_screen(
            screen_w in CHARACTER_WIDTH..2000u32,
            steps in 0usize..400,
        ) {
            let mut c = Character::with_bounds(screen_w, SCREEN_HEIGHT);
            for _ in 0..steps {
                let before = c.offset();
                c.walk();
                let after = c.offset();
                prop_assert!(after >= 0);
                prop_assert!(after + CHARACTER_WIDTH as i32 <= screen_w as i32);
                if before + CHARACTER_VELOCITY + CHARACTER_WIDTH as i32 > screen_w as i32 {
                    prop_assert_eq!(after, before);
                } else {
                    prop_assert_eq!(after, before + CHARACTER_VELOCITY);
                }
            }
        }
    }
}
