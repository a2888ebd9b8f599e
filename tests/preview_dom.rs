#![cfg(target_arch = "wasm32")]

use blog_lightbox::dom_surface::{DomSurface, BODY_OPEN_CLASS, MODAL_OPEN_CLASS};
use blog_lightbox::ghost::{self, GhostAnimator, GHOST_CLASS, HIDDEN_DURING_OPEN_CLASS};
use blog_lightbox::modal::{self, ModalRefs};
use blog_lightbox::page_data::{PageData, PreviewLabels};
use blog_lightbox::preview::{collect_images, image_entry, init_image_preview, PREVIEWABLE_CLASS};
use futures_util::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use lightbox_core::{
    key_command, plan_open, CornerRadius, Direction, PreviewController, Rect, Shape,
    TransitionAnimator, TransitionDescriptor, TransitionTiming,
};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    window, Document, Element, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent,
    KeyboardEventInit, MouseEvent, MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

const PIXEL: &str = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

#[derive(Default)]
struct CountingAnimator {
    runs: Cell<usize>,
}

impl TransitionAnimator for CountingAnimator {
    async fn animate(&self, _transition: &TransitionDescriptor, _timing: &TransitionTiming) {
        self.runs.set(self.runs.get() + 1);
    }
}

fn document() -> Document {
    window()
        .expect("window missing")
        .document()
        .expect("document missing")
}

fn body() -> HtmlElement {
    document().body().expect("body missing")
}

/// Replaces the body with an article holding `count` images.
fn mount_article(count: usize) -> Vec<HtmlImageElement> {
    let document = document();
    let body = body();
    body.set_inner_html("");
    let article = document.create_element("div").expect("create article");
    article.set_class_name("article-body");
    for index in 0..count {
        let image = document
            .create_element("img")
            .expect("create img")
            .dyn_into::<HtmlImageElement>()
            .expect("img element");
        image.set_src(PIXEL);
        image.set_alt(&format!("Figure {index}"));
        image.set_width(120);
        image.set_height(80);
        image.set_attribute("tabindex", "0").expect("tabindex");
        article.append_child(&image).expect("append img");
    }
    body.append_child(&article).expect("append article");
    collect_images(&document)
}

fn build(count: usize) -> (ModalRefs, PreviewController<DomSurface, CountingAnimator>) {
    wire(mount_article(count))
}

fn wire(
    images: Vec<HtmlImageElement>,
) -> (ModalRefs, PreviewController<DomSurface, CountingAnimator>) {
    let refs = modal::build_modal(&document(), &PreviewLabels::default()).expect("modal");
    let entries = images.iter().map(image_entry).collect();
    let surface = DomSurface::new(refs.clone(), images, body());
    let controller = PreviewController::new(entries, surface, CountingAnimator::default());
    (refs, controller)
}

fn focused_element() -> Option<web_sys::Element> {
    document().active_element()
}

fn is_focused(element: &Element) -> bool {
    let node: &web_sys::Node = element.as_ref();
    focused_element().is_some_and(|focused| focused.is_same_node(Some(node)))
}

fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

/// Dispatches a bubbling, cancelable `keydown`; returns whether a listener
/// prevented the default action.
fn press(target: &EventTarget, key: &str) -> bool {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event");
    target.dispatch_event(&event).expect("dispatch keydown");
    event.default_prevented()
}

fn click(target: &EventTarget) {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).expect("mouse event");
    target.dispatch_event(&event).expect("dispatch click");
}

/// Polls `condition` every few milliseconds until it holds or `limit_ms`
/// passes.
async fn wait_until(limit_ms: u32, condition: impl Fn() -> bool) -> bool {
    let mut waited = 0;
    while !condition() {
        if waited >= limit_ms {
            return false;
        }
        TimeoutFuture::new(10).await;
        waited += 10;
    }
    true
}

#[wasm_bindgen_test]
fn modal_skeleton_is_hidden_dialog() {
    body().set_inner_html("");
    let labels = PreviewLabels {
        close: "Fermer".to_string(),
        ..PreviewLabels::default()
    };
    let refs = modal::build_modal(&document(), &labels).expect("modal");

    assert_eq!(refs.modal.get_attribute("role").as_deref(), Some("dialog"));
    assert_eq!(refs.modal.get_attribute("aria-modal").as_deref(), Some("true"));
    assert_eq!(refs.modal.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert!(refs.modal.hidden());
    assert_eq!(
        refs.close_button.get_attribute("aria-label").as_deref(),
        Some("Fermer")
    );
    assert!(refs.prev_button.class_list().contains(modal::PREV_CLASS));
    assert!(refs.next_button.class_list().contains(modal::NEXT_CLASS));
    assert!(refs.caption.hidden());
    assert_eq!(refs.caption.id(), modal::CAPTION_ID);
    let parent = refs.modal.parent_element().expect("modal attached");
    assert_eq!(parent.tag_name().to_ascii_lowercase(), "body");
}

#[wasm_bindgen_test]
fn collects_only_article_images() {
    let images = mount_article(2);
    assert_eq!(images.len(), 2);
    let entry = image_entry(&images[0]);
    assert!(entry.src().is_some());
    assert_eq!(entry.caption(), Some("Figure 0"));
}

#[wasm_bindgen_test(async)]
async fn open_navigate_and_close_in_dom() {
    let (refs, controller) = build(3);

    controller.open(1).await.expect("open");
    assert_eq!(controller.active_index(), 1);
    assert!(!refs.modal.hidden());
    assert!(refs.modal.class_list().contains(MODAL_OPEN_CLASS));
    assert!(body().class_list().contains(BODY_OPEN_CLASS));
    assert_eq!(refs.caption.text_content().as_deref(), Some("Figure 1"));
    assert!(!refs.prev_button.disabled());
    assert!(!refs.next_button.disabled());
    assert!(!refs.prev_button.hidden());
    let triggers = controller.surface().triggers();
    assert_eq!(
        triggers[1].get_attribute("aria-expanded").as_deref(),
        Some("true")
    );

    let right = key_command("ArrowRight").expect("arrow command");
    controller.dispatch(right).await.expect("navigate");
    assert_eq!(controller.active_index(), 2);
    assert!(refs.next_button.disabled());
    assert_eq!(refs.caption.text_content().as_deref(), Some("Figure 2"));

    controller.dispatch(key_command("Escape").expect("escape")).await.expect("close");
    assert_eq!(controller.active_index(), -1);
    assert!(refs.modal.hidden());
    assert_eq!(refs.modal.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert!(!body().class_list().contains(BODY_OPEN_CLASS));
    assert!(refs.image.get_attribute("src").is_none());
    let focused = focused_element().expect("focus restored");
    let trigger: &web_sys::Node = controller.surface().triggers()[2].as_ref();
    assert!(focused.is_same_node(Some(trigger)));
}

#[wasm_bindgen_test(async)]
async fn single_image_hides_navigation_controls() {
    let (refs, controller) = build(1);
    controller.open(0).await.expect("open");
    assert!(refs.prev_button.hidden());
    assert!(refs.next_button.hidden());
    assert!(controller.navigate(Direction::Next).is_err());
    controller.close().await.expect("close");
    assert!(refs.modal.hidden());
}

#[wasm_bindgen_test]
fn page_data_reads_embedded_json() {
    let document = document();
    body().set_inner_html(
        r#"<script type="application/json" id="page-data">{"pageType":"about","labels":{"imagePreviewOpen":"Zoom"}}</script>"#,
    );
    let page = PageData::load();
    assert!(page.preview_enabled());
    assert_eq!(PreviewLabels::from_page(&page).open, "Zoom");

    document
        .get_element_by_id("page-data")
        .expect("page data")
        .set_text_content(Some("not json"));
    assert!(!PageData::load().preview_enabled());
}

#[wasm_bindgen_test(async)]
async fn escape_closes_while_preview_image_never_loads() {
    let images = mount_article(1);
    // reserved TEST-NET address, never served
    images[0].set_src("http://192.0.2.1/never-loads.jpg");
    let (refs, controller) = wire(images);

    let started = js_sys::Date::now();
    let (opened, closed) = futures_util::join!(controller.open(0), async {
        TimeoutFuture::new(30).await;
        controller
            .dispatch(key_command("Escape").expect("escape"))
            .await
    });
    assert_eq!(opened, Ok(()));
    assert_eq!(closed, Ok(()));
    assert!(js_sys::Date::now() - started < f64::from(ghost::IMAGE_WAIT_LIMIT_MS));
    assert_eq!(controller.active_index(), -1);
    assert!(refs.modal.hidden());
    assert!(!body().class_list().contains(BODY_OPEN_CLASS));
}

fn sample_transition() -> TransitionDescriptor {
    let images = mount_article(1);
    let source = Shape::new(ghost::client_rect(&images[0]), CornerRadius::new("6px"));
    let target = Shape::new(Rect::new(40.0, 30.0, 320.0, 200.0), CornerRadius::new("10px"));
    plan_open(source, target, PIXEL).expect("laid-out thumbnail")
}

#[wasm_bindgen_test(async)]
async fn ghost_overlays_the_page_then_cleans_up() {
    let transition = sample_transition();
    let refs = modal::build_modal(&document(), &PreviewLabels::default()).expect("modal");
    let animator = GhostAnimator::new(refs.image.clone());
    let timing = TransitionTiming {
        duration_ms: 80.0,
        ..TransitionTiming::default()
    };

    let ((), (mid_ghost, mid_hidden)) =
        futures_util::join!(animator.animate(&transition, &timing), async {
            (
                query(&format!(".{GHOST_CLASS}")),
                refs.image.class_list().contains(HIDDEN_DURING_OPEN_CLASS),
            )
        });
    let mid_ghost = mid_ghost.expect("ghost appended while animating");
    assert_eq!(
        mid_ghost
            .parent_element()
            .map(|parent| parent.tag_name().to_ascii_lowercase())
            .as_deref(),
        Some("body")
    );
    assert_eq!(mid_ghost.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert!(mid_hidden);

    assert!(query(&format!(".{GHOST_CLASS}")).is_none());
    assert!(!refs.image.class_list().contains(HIDDEN_DURING_OPEN_CLASS));
    let ghost_style = mid_ghost
        .dyn_into::<HtmlElement>()
        .expect("ghost element")
        .style();
    assert_eq!(
        ghost_style.get_property_value("width").as_deref(),
        Ok("320px")
    );
}

#[wasm_bindgen_test(async)]
async fn dropped_ghost_transition_leaves_nothing_behind() {
    let transition = sample_transition();
    let refs = modal::build_modal(&document(), &PreviewLabels::default()).expect("modal");
    let animator = GhostAnimator::new(refs.image.clone());
    let timing = TransitionTiming::default();

    let run = Box::pin(animator.animate(&transition, &timing));
    match select(run, futures_util::future::ready(())).await {
        Either::Right(((), run)) => {
            assert!(query(&format!(".{GHOST_CLASS}")).is_some());
            drop(run);
        }
        Either::Left(_) => panic!("transition finished without waiting for a frame"),
    }
    assert!(query(&format!(".{GHOST_CLASS}")).is_none());
    assert!(!refs.image.class_list().contains(HIDDEN_DURING_OPEN_CLASS));
}

#[wasm_bindgen_test(async)]
async fn page_wiring_opens_from_keys_and_classifies_clicks() {
    let images = mount_article(3);
    let page = PageData::parse(r#"{"pageType":"post"}"#).expect("page data");
    init_image_preview(&page);

    for (index, image) in images.iter().enumerate() {
        assert!(image.class_list().contains(PREVIEWABLE_CLASS));
        assert_eq!(image.get_attribute("tabindex").as_deref(), Some("0"));
        assert_eq!(image.get_attribute("role").as_deref(), Some("button"));
        assert_eq!(
            image.get_attribute("aria-label"),
            Some(format!("Figure {index}"))
        );
        assert_eq!(image.get_attribute("aria-haspopup").as_deref(), Some("dialog"));
        assert_eq!(image.get_attribute("aria-expanded").as_deref(), Some("false"));
    }
    let modal: HtmlElement = query(&format!(".{}", modal::MODAL_CLASS))
        .expect("modal built")
        .dyn_into()
        .expect("modal element");
    let close_button = query(&format!(".{}", modal::CLOSE_CLASS)).expect("close button");
    let preview_image = query(&format!(".{}", modal::IMAGE_CLASS)).expect("preview image");
    let caption = query(&format!(".{}", modal::CAPTION_CLASS)).expect("caption");
    assert!(modal.hidden());

    // Enter on a trigger opens its image and moves focus to the close control.
    assert!(press(&images[1], "Enter"));
    assert!(wait_until(500, || !modal.hidden()).await);
    assert_eq!(images[1].get_attribute("aria-expanded").as_deref(), Some("true"));
    assert!(wait_until(2_000, || is_focused(&close_button)).await);
    assert!(query(&format!(".{GHOST_CLASS}")).is_none());
    assert!(!preview_image.class_list().contains(HIDDEN_DURING_OPEN_CLASS));

    // Clicking the image itself keeps the preview open.
    click(&preview_image);
    TimeoutFuture::new(50).await;
    assert!(!modal.hidden());

    // Clicking the caption closes and returns focus to the trigger.
    click(&caption);
    assert!(wait_until(2_000, || modal.hidden()).await);
    assert!(wait_until(500, || is_focused(&images[1])).await);
    assert_eq!(images[1].get_attribute("aria-expanded").as_deref(), Some("false"));

    // Space opens too; arrows navigate while the preview is up.
    assert!(press(&images[0], " "));
    assert!(wait_until(2_000, || is_focused(&close_button)).await);
    assert!(press(&document(), "ArrowRight"));
    assert!(wait_until(500, || caption.text_content().as_deref() == Some("Figure 1")).await);

    // Unrelated keys on a trigger do nothing.
    assert!(!press(&images[2], "a"));

    // A click on the backdrop closes.
    click(&modal);
    assert!(wait_until(2_000, || modal.hidden()).await);
    assert!(wait_until(500, || is_focused(&images[1])).await);
}
