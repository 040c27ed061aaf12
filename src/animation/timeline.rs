/// Playback position of a clip against its duration.
///
/// Advancing past the end either restarts at zero (looping) or holds at
/// the end (clamped). Time never goes below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    current_time: f32,
    duration: f32,
    loops: bool,
}

impl Timeline {
    #[must_use]
    pub fn new(duration: f32, loops: bool) -> Self {
        Self {
            current_time: 0.0,
            duration: duration.max(0.0),
            loops,
        }
    }

    /// Adds `delta` to the current time.
    ///
    /// Past the end, a looping timeline restarts at `0` (the overshoot is
    /// dropped, not carried over); a clamped one holds at `duration`.
    pub fn advance(&mut self, delta: f32) {
        self.current_time = (self.current_time + delta).max(0.0);

        if self.current_time <= self.duration {
            return;
        }

        self.current_time = if self.loops { 0.0 } else { self.duration };
    }

    pub fn set_time(&mut self, time: f32) {
        self.current_time = time.max(0.0);
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
    }

    pub fn set_loops(&mut self, loops: bool) {
        self.loops = loops;
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.current_time
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn loops(&self) -> bool {
        self.loops
    }

    /// `time / duration`, or `None` for a zero-length timeline.
    #[must_use]
    pub fn unit_interval(&self) -> Option<f32> {
        if self.duration > 0.0 {
            Some(self.current_time / self.duration)
        } else {
            None
        }
    }

    /// A clamped timeline that has reached its end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.loops && self.current_time >= self.duration
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(0.0, true)
    }
}
