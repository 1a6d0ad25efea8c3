use instant::Instant;

/// Frame clock. Tracks how much time passed between two updates and keeps a
/// rolling frame rate for the window title.
#[derive(Debug, Clone)]
pub struct Time {
    last_update: Option<Instant>,
    delta_seconds: f32,

    // frame rate averaging
    frame_sum: f32,
    frame_count: u32,
    frames_per_sample: u32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Time {
    /// `frames_per_sample` frames are averaged before [`Time::fps_sample`]
    /// reports a value.
    pub fn new(frames_per_sample: u32) -> Self {
        Self {
            last_update: None,
            delta_seconds: 0.0,
            frame_sum: 0.0,
            frame_count: 0,
            frames_per_sample: frames_per_sample.max(1),
        }
    }

    /// Updates the internal time measurements.
    pub fn update(&mut self) {
        self.update_with_instant(Instant::now());
    }

    /// Updates time with a specified [`Instant`].
    pub fn update_with_instant(&mut self, instant: Instant) {
        if let Some(last_update) = self.last_update {
            self.delta_seconds = instant.saturating_duration_since(last_update).as_secs_f32();
            self.frame_sum += self.delta_seconds;
            self.frame_count += 1;
        }
        self.last_update = Some(instant);
    }

    /// Returns how much time has advanced since the last [`update`](#method.update), as [`f32`] seconds.
    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// Average frames per second over the last sample window, once a full
    /// window has been collected. Resets the window.
    pub fn fps_sample(&mut self) -> Option<f32> {
        if self.frame_count < self.frames_per_sample {
            return None;
        }
        let fps = if self.frame_sum > 0.0 {
            self.frame_count as f32 / self.frame_sum
        } else {
            0.0
        };
        self.frame_sum = 0.0;
        self.frame_count = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instant::Duration;

    #[test]
    fn first_update_has_no_delta() {
        let mut time = Time::new(2);
        time.update_with_instant(Instant::now() + Duration::from_millis(500));
        assert_eq!(time.delta_seconds(), 0.0);
    }

    #[test]
    fn delta_and_fps_follow_updates() {
        let mut time = Time::new(2);
        let start = Instant::now();
        time.update_with_instant(start);
        time.update_with_instant(start + Duration::from_millis(250));
        assert_eq!(time.delta_seconds(), 0.25);
        assert_eq!(time.fps_sample(), None);

        time.update_with_instant(start + Duration::from_millis(500));
        assert_eq!(time.fps_sample(), Some(4.0));
        assert_eq!(time.fps_sample(), None);
    }
}
