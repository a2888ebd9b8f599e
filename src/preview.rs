use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use lightbox_core::{
    click_command, is_trigger_activation_key, key_command, ClickTarget, ImageEntry,
    PreviewCommand, PreviewController,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlImageElement, KeyboardEvent};

use crate::dom_surface::DomSurface;
use crate::ghost::GhostAnimator;
use crate::modal::{self, ModalRefs, CLOSE_CLASS, IMAGE_CLASS, NEXT_CLASS, PREV_CLASS};
use crate::page_data::{PageData, PreviewLabels};

pub const PREVIEW_IMAGE_SELECTOR: &str = ".article-body img, .article-cover img";
pub const PREVIEWABLE_CLASS: &str = "is-previewable";

pub type DomController = PreviewController<DomSurface, GhostAnimator>;

/// Keeps the page's listeners (and through them the controller) alive.
struct PreviewRuntime {
    _listeners: Vec<EventListener>,
}

thread_local! {
    static PREVIEW_RUNTIME: RefCell<Option<PreviewRuntime>> = RefCell::new(None);
}

/// Scans the page for eligible images and wires the preview. Runs at most
/// once per page; later calls are ignored.
pub fn init_image_preview(page: &PageData) {
    if !page.preview_enabled() {
        return;
    }
    if PREVIEW_RUNTIME.with(|slot| slot.borrow().is_some()) {
        return;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let images = collect_images(&document);
    if images.is_empty() {
        return;
    }

    let labels = PreviewLabels::from_page(page);
    let refs = match modal::build_modal(&document, &labels) {
        Ok(refs) => refs,
        Err(err) => {
            console::warn!("image preview: modal build failed", err);
            return;
        }
    };

    let entries: Vec<ImageEntry> = images.iter().map(image_entry).collect();
    let animator = GhostAnimator::new(refs.image.clone());
    let surface = DomSurface::new(refs.clone(), images.clone(), body);
    let controller = Rc::new(PreviewController::new(entries, surface, animator));

    let mut listeners = Vec::with_capacity(images.len() * 2 + 2);
    for (index, image) in images.iter().enumerate() {
        prepare_trigger(image, &labels);
        listeners.extend(bind_trigger(&controller, image, index));
    }
    listeners.push(bind_modal_clicks(&controller, &refs));
    listeners.push(bind_document_keys(&controller, &document));

    console::log!("image preview: ready", images.len() as u32);
    PREVIEW_RUNTIME.with(|slot| {
        *slot.borrow_mut() = Some(PreviewRuntime {
            _listeners: listeners,
        });
    });
}

pub fn collect_images(document: &Document) -> Vec<HtmlImageElement> {
    let Ok(nodes) = document.query_selector_all(PREVIEW_IMAGE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlImageElement>().ok())
        .collect()
}

pub fn image_entry(image: &HtmlImageElement) -> ImageEntry {
    ImageEntry::resolve(
        &image.current_src(),
        image.get_attribute("src").as_deref(),
        image.get_attribute("alt").as_deref(),
    )
}

fn prepare_trigger(image: &HtmlImageElement, labels: &PreviewLabels) {
    let alt = image.get_attribute("alt").unwrap_or_default();
    let alt = alt.trim();
    let label = if alt.is_empty() { labels.open.as_str() } else { alt };
    let _ = image.class_list().add_1(PREVIEWABLE_CLASS);
    let _ = image.set_attribute("tabindex", "0");
    let _ = image.set_attribute("role", "button");
    let _ = image.set_attribute("aria-label", label);
    let _ = image.set_attribute("aria-haspopup", "dialog");
    let _ = image.set_attribute("aria-expanded", "false");
}

fn bind_trigger(
    controller: &Rc<DomController>,
    image: &HtmlImageElement,
    index: usize,
) -> [EventListener; 2] {
    let on_click = {
        let controller = Rc::clone(controller);
        EventListener::new(image, "click", move |event| {
            event.prevent_default();
            spawn_open(&controller, index);
        })
    };
    let on_key = {
        let controller = Rc::clone(controller);
        EventListener::new(image, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if !is_trigger_activation_key(&event.key()) {
                return;
            }
            event.prevent_default();
            spawn_open(&controller, index);
        })
    };
    [on_click, on_key]
}

fn bind_modal_clicks(controller: &Rc<DomController>, refs: &ModalRefs) -> EventListener {
    let controller = Rc::clone(controller);
    EventListener::new(&refs.modal, "click", move |event| {
        let Some(target) = click_target(event) else {
            return;
        };
        if let Some(command) = click_command(target) {
            spawn_command(&controller, command);
        }
    })
}

fn bind_document_keys(controller: &Rc<DomController>, document: &Document) -> EventListener {
    let controller = Rc::clone(controller);
    EventListener::new(document, "keydown", move |event| {
        if !controller.accepts_keyboard() {
            return;
        }
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(command) = key_command(&event.key()) else {
            return;
        };
        if command.prevents_default() {
            event.prevent_default();
        }
        spawn_command(&controller, command);
    })
}

fn click_target(event: &Event) -> Option<ClickTarget> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let within = |class: &str| {
        element
            .closest(&format!(".{class}"))
            .ok()
            .flatten()
            .is_some()
    };
    let target = if within(CLOSE_CLASS) {
        ClickTarget::CloseControl
    } else if within(PREV_CLASS) {
        ClickTarget::Previous
    } else if within(NEXT_CLASS) {
        ClickTarget::Next
    } else if within(IMAGE_CLASS) {
        ClickTarget::Image
    } else {
        ClickTarget::Elsewhere
    };
    Some(target)
}

fn spawn_open(controller: &Rc<DomController>, index: usize) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        if let Err(err) = controller.open(index).await {
            console::debug!("image preview: open dropped", err.to_string());
        }
    });
}

fn spawn_command(controller: &Rc<DomController>, command: PreviewCommand) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        if let Err(err) = controller.dispatch(command).await {
            console::debug!("image preview: command dropped", err.to_string());
        }
    });
}
