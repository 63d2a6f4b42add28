use std::fmt;
use std::time::Duration;

const WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second counter over a sliding one-second window.
///
/// Call [`frame`](Self::frame) once per drawn frame with the elapsed time
/// since the previous one; [`fps`](Self::fps) publishes the frame count of
/// the last completed window.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameRateCounter {
    frame_rate: u32,
    frame_counter: u32,
    elapsed: Duration,
}

impl FrameRateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame. Rolls the window when a full second has elapsed,
    /// carrying the remainder over instead of resetting to zero.
    pub fn frame(&mut self, delta: Duration) {
        self.elapsed += delta;
        if self.elapsed > WINDOW {
            self.elapsed -= WINDOW;
            self.frame_rate = self.frame_counter;
            self.frame_counter = 0;
        }
        self.frame_counter += 1;
    }

    /// Frame count of the last completed window.
    pub fn fps(&self) -> u32 {
        self.frame_rate
    }
}

impl fmt::Display for FrameRateCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fps: {}", self.frame_rate)
    }
}
