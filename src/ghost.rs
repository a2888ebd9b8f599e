use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::oneshot;
use futures_util::future::{select, Either};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::future::TimeoutFuture;
use lightbox_core::{
    CornerRadius, Rect, TransitionAnimator, TransitionDescriptor, TransitionFrame,
    TransitionTiming, Viewport,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, HtmlImageElement};

pub const GHOST_CLASS: &str = "image-preview-ghost";
pub const HIDDEN_DURING_OPEN_CLASS: &str = "is-hidden-during-open";

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
/// Upper bound on a single frame wait; hidden tabs may never paint.
const FRAME_WAIT_LIMIT_MS: u32 = 100;
/// Upper bound on waiting for the full-size image before measuring it.
pub const IMAGE_WAIT_LIMIT_MS: u32 = 1_500;

/// Animates a throwaway `<img>` between two boxes on top of the page.
pub struct GhostAnimator {
    preview_image: HtmlImageElement,
}

impl GhostAnimator {
    pub fn new(preview_image: HtmlImageElement) -> Self {
        Self { preview_image }
    }

    async fn run(
        &self,
        transition: &TransitionDescriptor,
        timing: &TransitionTiming,
    ) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("missing document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let ghost = document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| JsValue::from_str("ghost is not an image"))?;
        ghost.set_src(&transition.src);
        ghost.set_alt("");
        ghost.set_class_name(GHOST_CLASS);
        ghost.set_attribute("aria-hidden", "true")?;
        apply_frame(&ghost, &transition.frame_at(0.0))?;

        self.preview_image
            .class_list()
            .add_1(HIDDEN_DURING_OPEN_CLASS)?;
        let guard = GhostGuard {
            ghost,
            preview_image: &self.preview_image,
        };
        body.append_child(&guard.ghost)?;
        drive_frames(&guard.ghost, transition, timing).await
    }
}

/// Removes the ghost and unhides the preview image when dropped, so a
/// transition cancelled mid-flight leaves nothing behind.
struct GhostGuard<'a> {
    ghost: HtmlImageElement,
    preview_image: &'a HtmlImageElement,
}

impl Drop for GhostGuard<'_> {
    fn drop(&mut self) {
        self.ghost.remove();
        let _ = self
            .preview_image
            .class_list()
            .remove_1(HIDDEN_DURING_OPEN_CLASS);
    }
}

impl TransitionAnimator for GhostAnimator {
    async fn animate(&self, transition: &TransitionDescriptor, timing: &TransitionTiming) {
        if let Err(err) = self.run(transition, timing).await {
            gloo::console::warn!("image preview: transition skipped", err);
        }
    }
}

async fn drive_frames(
    ghost: &HtmlElement,
    transition: &TransitionDescriptor,
    timing: &TransitionTiming,
) -> Result<(), JsValue> {
    let start = next_frame().await;
    loop {
        let elapsed = next_frame().await - start;
        apply_frame(ghost, &transition.frame_at(timing.eased(elapsed)))?;
        if timing.progress(elapsed) >= 1.0 {
            return Ok(());
        }
    }
}

fn apply_frame(element: &HtmlElement, frame: &TransitionFrame) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("top", &format!("{}px", frame.rect.top))?;
    style.set_property("left", &format!("{}px", frame.rect.left))?;
    style.set_property("width", &format!("{}px", frame.rect.width))?;
    style.set_property("height", &format!("{}px", frame.rect.height))?;
    style.set_property("border-radius", frame.radius.as_str())?;
    Ok(())
}

/// Resolves on the next animation frame with its timestamp, or after a short
/// timeout when no frame arrives.
pub async fn next_frame() -> f64 {
    let (sender, receiver) = oneshot::channel();
    let _frame: AnimationFrame = request_animation_frame(move |timestamp| {
        let _ = sender.send(timestamp);
    });
    let timeout = TimeoutFuture::new(FRAME_WAIT_LIMIT_MS);
    futures_util::pin_mut!(receiver, timeout);
    match select(receiver, timeout).await {
        Either::Left((Ok(timestamp), _)) => timestamp,
        _ => now_ms(),
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Waits until the image has loaded or failed, for at most `limit_ms`.
/// Returns `false` when the wait timed out.
pub async fn wait_for_image_ready(image: &HtmlImageElement, limit_ms: u32) -> bool {
    if image.complete() {
        return true;
    }
    let (sender, receiver) = oneshot::channel::<()>();
    let sender = Rc::new(RefCell::new(Some(sender)));
    let _on_load = EventListener::once(image, "load", settle(Rc::clone(&sender)));
    let _on_error = EventListener::once(image, "error", settle(sender));
    let timeout = TimeoutFuture::new(limit_ms);
    futures_util::pin_mut!(receiver, timeout);
    matches!(select(receiver, timeout).await, Either::Left((Ok(()), _)))
}

fn settle(sender: Rc<RefCell<Option<oneshot::Sender<()>>>>) -> impl FnOnce(&Event) + 'static {
    move |_: &Event| {
        if let Some(sender) = sender.borrow_mut().take() {
            let _ = sender.send(());
        }
    }
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .is_some_and(|query| query.matches())
}

pub fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

pub fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn computed_radius(element: &Element, fallback: &str) -> CornerRadius {
    let value = web_sys::window()
        .and_then(|window| window.get_computed_style(element).ok().flatten())
        .and_then(|style| style.get_property_value("border-radius").ok())
        .unwrap_or_default();
    CornerRadius::from_computed(&value, fallback)
}
