pub const PREVIEW_TRANSITION_MS: f64 = 260.0;

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

pub const PREVIEW_EASING: CubicBezier = CubicBezier::new(0.22, 0.61, 0.36, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const EPSILON: f64 = 1.0e-7;

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased output for linear progress `x` in `[0, 1]`.
    pub fn sample(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        bezier(t, self.y1, self.y2)
    }

    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = bezier(t, self.x1, self.x2) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1.0e-6 {
                break;
            }
            t -= error / slope;
        }

        let mut lo = 0.0;
        let mut hi = 1.0;
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = bezier(t, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * t + b) * t + c) * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    pub duration_ms: f64,
    pub easing: CubicBezier,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration_ms: PREVIEW_TRANSITION_MS,
            easing: PREVIEW_EASING,
        }
    }
}

impl TransitionTiming {
    /// Linear progress after `elapsed_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Eased progress after `elapsed_ms`.
    pub fn eased(&self, elapsed_ms: f64) -> f64 {
        self.easing.sample(self.progress(elapsed_ms))
    }
}
