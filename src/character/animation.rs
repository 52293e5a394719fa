use crate::config::{CHARACTER_HEIGHT, CHARACTER_WIDTH, WALK_FRAME_COUNT};
use crate::surface::Rect;

/// Sprite sheet rectangles for each walk-cycle frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkClips([Rect; WALK_FRAME_COUNT]);

impl WalkClips {
    /// Slice the walk row out of the sheet: frames tile left to right from
    /// x = 0 on the row two character-heights down.
    pub fn slice() -> Self {
        let y = (CHARACTER_HEIGHT * 2) as i32;
        Self(std::array::from_fn(|i| {
            Rect::new(
                (i as u32 * CHARACTER_WIDTH) as i32,
                y,
                CHARACTER_WIDTH,
                CHARACTER_HEIGHT,
            )
        }))
    }

    pub fn frame(&self, index: usize) -> Rect {
        self.0[index % WALK_FRAME_COUNT]
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.0
    }
}

/// Position in the walk cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkCycle {
    frame: usize,
}

impl WalkCycle {
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Step to the next frame, wrapping after the last. Returns the new frame.
    pub fn advance(&mut self) -> usize {
        self.frame = if self.frame >= WALK_FRAME_COUNT - 1 {
            0
        } else {
            self.frame + 1
        };
        self.frame
    }
}
