/// Splits each rendered frame into a fixed number of equal physics substeps.
#[derive(Debug, Clone, Copy)]
pub struct FrameSubsteps {
    /// Substeps per frame.
    count: u32,
    /// Longest frame delta honored; longer frames are clamped (tab switches,
    /// debugger pauses).
    max_frame_dt: f32,
}

impl FrameSubsteps {
    pub fn new(count: u32, max_frame_dt: f32) -> Self {
        Self {
            count: count.max(1),
            max_frame_dt,
        }
    }

    /// Substep delta for a frame. Zero for negative or non-finite frames.
    pub fn substep_dt(&self, frame_dt: f32) -> f32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0.0;
        }
        frame_dt.min(self.max_frame_dt) / self.count as f32
    }

    /// Iterator over the substep deltas of one frame. Empty when nothing
    /// should advance.
    pub fn split(&self, frame_dt: f32) -> impl Iterator<Item = f32> {
        let dt = self.substep_dt(frame_dt);
        let n = if dt > 0.0 { self.count } else { 0 };
        (0..n).map(move |_| dt)
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max_frame_dt(&self) -> f32 {
        self.max_frame_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_equal_substeps() {
        let steps = FrameSubsteps::new(16, 0.25);
        let dts: Vec<f32> = steps.split(1.0 / 60.0).collect();
        assert_eq!(dts.len(), 16);
        let total: f32 = dts.iter().sum();
        assert!((total - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn caps_long_frames() {
        let steps = FrameSubsteps::new(16, 0.25);
        let total: f32 = steps.split(3.0).sum();
        assert!((total - 0.25).abs() < 1e-6, "total was {}", total);
    }

    #[test]
    fn bad_deltas_do_nothing() {
        let steps = FrameSubsteps::new(16, 0.25);
        assert_eq!(steps.split(0.0).count(), 0);
        assert_eq!(steps.split(-0.1).count(), 0);
        assert_eq!(steps.split(f32::NAN).count(), 0);
        assert_eq!(steps.split(f32::INFINITY).count(), 0);
    }

    #[test]
    fn zero_count_is_one_step() {
        let steps = FrameSubsteps::new(0, 0.25);
        assert_eq!(steps.count(), 1);
        assert_eq!(steps.split(0.1).count(), 1);
    }
}
