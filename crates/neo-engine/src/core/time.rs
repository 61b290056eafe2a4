/// Fixed timestep accumulator.
/// Game logic advances in whole steps of `dt` no matter how often the display refreshes.
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on steps produced by a single frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, 10)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Negative or non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // A backgrounded tab can hand us seconds at once; drop the excess instead of catching up.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = ((self.accumulator / self.dt) as u32).min(self.max_steps);
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}
