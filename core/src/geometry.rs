use std::fmt;

pub const THUMBNAIL_RADIUS_FALLBACK: &str = "6px";
pub const PREVIEW_RADIUS_FALLBACK: &str = "10px";

/// Viewport-relative box, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when the box has no drawable area (also for NaN sizes).
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn intersects_viewport(&self, viewport: Viewport) -> bool {
        self.bottom() >= 0.0
            && self.top <= viewport.height
            && self.right() >= 0.0
            && self.left <= viewport.width
    }

    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        Rect {
            left: lerp(self.left, to.left, t),
            top: lerp(self.top, to.top, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A CSS `border-radius` value carried through a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CornerRadius(String);

impl CornerRadius {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Uses `fallback` when the computed style reports nothing.
    pub fn from_computed(value: &str, fallback: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::new(fallback)
        } else {
            Self::new(value)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Single pixel value, e.g. `"6px"` or `"0"`. Shorthands and other units
    /// return `None`.
    pub fn as_px(&self) -> Option<f64> {
        let raw = self.0.trim();
        if raw == "0" {
            return Some(0.0);
        }
        let number = raw.strip_suffix("px")?.trim();
        let value = number.parse::<f64>().ok()?;
        value.is_finite().then_some(value)
    }

    /// Interpolates pixel radii; anything else holds the start value until
    /// the transition lands on the end value.
    pub fn lerp(&self, to: &CornerRadius, t: f64) -> CornerRadius {
        if t >= 1.0 {
            return to.clone();
        }
        match (self.as_px(), to.as_px()) {
            (Some(from), Some(end)) => CornerRadius(format_px(lerp(from, end, t))),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for CornerRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionDescriptor {
    pub from: Rect,
    pub to: Rect,
    pub from_radius: CornerRadius,
    pub to_radius: CornerRadius,
    pub src: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionFrame {
    pub rect: Rect,
    pub radius: CornerRadius,
}

impl TransitionDescriptor {
    /// Frame at an already-eased progress in `[0, 1]`.
    pub fn frame_at(&self, eased: f64) -> TransitionFrame {
        let t = eased.clamp(0.0, 1.0);
        TransitionFrame {
            rect: self.from.lerp(&self.to, t),
            radius: self.from_radius.lerp(&self.to_radius, t),
        }
    }
}

/// Measured box plus the radius reported for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub rect: Rect,
    pub radius: CornerRadius,
}

impl Shape {
    pub fn new(rect: Rect, radius: CornerRadius) -> Self {
        Self { rect, radius }
    }
}

/// Thumbnail to preview image. `None` when either end has no area.
pub fn plan_open(source: Shape, target: Shape, src: &str) -> Option<TransitionDescriptor> {
    if src.is_empty() || source.rect.is_degenerate() || target.rect.is_degenerate() {
        return None;
    }
    Some(TransitionDescriptor {
        from: source.rect,
        to: target.rect,
        from_radius: source.radius,
        to_radius: target.radius,
        src: src.to_string(),
    })
}

/// Preview image back to the thumbnail. The thumbnail must still be on screen.
pub fn plan_close(
    preview: Shape,
    trigger: Shape,
    viewport: Viewport,
    src: &str,
) -> Option<TransitionDescriptor> {
    if src.is_empty() || preview.rect.is_degenerate() {
        return None;
    }
    if trigger.rect.is_degenerate() || !trigger.rect.intersects_viewport(viewport) {
        return None;
    }
    Some(TransitionDescriptor {
        from: preview.rect,
        to: trigger.rect,
        from_radius: preview.radius,
        to_radius: trigger.radius,
        src: src.to_string(),
    })
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn format_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}px")
}
