// Small helpers shared by the engine and the UI.

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::log!(msg);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg; // no console off the browser
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::warn!(msg);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp `value` into `[min, max]` and snap it down onto the `step` grid anchored at `min`.
pub fn snap(value: u32, min: u32, max: u32, step: u32) -> u32 {
    let v = value.clamp(min, max);
    if step <= 1 {
        return v;
    }
    min + (v - min) / step * step
}

/// Seeded uniform source in `[0, 1)` for the unit tests.
#[cfg(test)]
pub(crate) fn uniform(seed: u64) -> impl FnMut() -> f64 {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    move || rng.random::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_respects_range_and_step() {
        assert_eq!(snap(3, 10, 200, 5), 10);
        assert_eq!(snap(23, 10, 200, 5), 20);
        assert_eq!(snap(999, 10, 200, 5), 200);
        assert_eq!(snap(7, 0, 300, 1), 7);
    }
}
