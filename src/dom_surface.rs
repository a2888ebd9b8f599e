use lightbox_core::geometry::{PREVIEW_RADIUS_FALLBACK, THUMBNAIL_RADIUS_FALLBACK};
use lightbox_core::{ImageEntry, NavState, PreviewSurface, Shape, Viewport};
use web_sys::{HtmlElement, HtmlImageElement};

use crate::ghost;
use crate::modal::ModalRefs;

pub const MODAL_OPEN_CLASS: &str = "is-open";
pub const MODAL_CLOSING_CLASS: &str = "is-closing";
pub const BODY_OPEN_CLASS: &str = "image-preview-open";

/// `PreviewSurface` over the built modal and the page's trigger images.
pub struct DomSurface {
    refs: ModalRefs,
    triggers: Vec<HtmlImageElement>,
    body: HtmlElement,
}

impl DomSurface {
    pub fn new(refs: ModalRefs, triggers: Vec<HtmlImageElement>, body: HtmlElement) -> Self {
        Self {
            refs,
            triggers,
            body,
        }
    }

    pub fn triggers(&self) -> &[HtmlImageElement] {
        &self.triggers
    }

    fn render_caption(&self, caption: Option<&str>) {
        match caption {
            Some(text) => {
                self.refs.caption.set_text_content(Some(text));
                self.refs.caption.set_hidden(false);
            }
            None => {
                self.refs.caption.set_text_content(Some(""));
                self.refs.caption.set_hidden(true);
            }
        }
    }
}

impl PreviewSurface for DomSurface {
    fn show_modal(&self) {
        let modal = &self.refs.modal;
        modal.set_hidden(false);
        let _ = modal.set_attribute("aria-hidden", "false");
        let _ = modal.class_list().add_1(MODAL_OPEN_CLASS);
        let _ = self.body.class_list().add_1(BODY_OPEN_CLASS);
    }

    fn mark_closing(&self) {
        let _ = self.refs.modal.class_list().add_1(MODAL_CLOSING_CLASS);
    }

    fn hide_modal(&self) {
        let modal = &self.refs.modal;
        let _ = modal
            .class_list()
            .remove_2(MODAL_OPEN_CLASS, MODAL_CLOSING_CLASS);
        let _ = modal.set_attribute("aria-hidden", "true");
        modal.set_hidden(true);
        let _ = self.body.class_list().remove_1(BODY_OPEN_CLASS);
    }

    fn display(&self, entry: &ImageEntry) {
        let image = &self.refs.image;
        image.set_src(entry.src().unwrap_or_default());
        image.set_alt(entry.caption().unwrap_or_default());
        self.render_caption(entry.caption());
    }

    fn clear_display(&self) {
        let image = &self.refs.image;
        let _ = image.remove_attribute("src");
        image.set_alt("");
        self.render_caption(None);
    }

    fn displayed_src(&self) -> Option<String> {
        let image = &self.refs.image;
        let current = image.current_src();
        if !current.is_empty() {
            return Some(current);
        }
        image.get_attribute("src").filter(|src| !src.is_empty())
    }

    fn update_nav(&self, nav: NavState) {
        let prev = &self.refs.prev_button;
        let next = &self.refs.next_button;
        prev.set_hidden(nav.hidden);
        next.set_hidden(nav.hidden);
        prev.set_disabled(nav.prev_disabled);
        next.set_disabled(nav.next_disabled);
    }

    fn set_expanded(&self, index: usize, expanded: bool) {
        if let Some(trigger) = self.triggers.get(index) {
            let value = if expanded { "true" } else { "false" };
            let _ = trigger.set_attribute("aria-expanded", value);
        }
    }

    fn focus_close(&self) {
        let _ = self.refs.close_button.focus();
    }

    fn focus_trigger(&self, index: usize) {
        if let Some(trigger) = self.triggers.get(index) {
            let _ = trigger.focus();
        }
    }

    fn prefers_reduced_motion(&self) -> bool {
        ghost::prefers_reduced_motion()
    }

    fn viewport(&self) -> Viewport {
        ghost::viewport()
    }

    fn trigger_shape(&self, index: usize) -> Option<Shape> {
        let trigger = self.triggers.get(index)?;
        if !trigger.is_connected() {
            return None;
        }
        Some(Shape::new(
            ghost::client_rect(trigger),
            ghost::computed_radius(trigger, THUMBNAIL_RADIUS_FALLBACK),
        ))
    }

    async fn preview_shape(&self) -> Option<Shape> {
        let image = &self.refs.image;
        if !ghost::wait_for_image_ready(image, ghost::IMAGE_WAIT_LIMIT_MS).await {
            return None;
        }
        ghost::next_frame().await;
        if !image.is_connected() {
            return None;
        }
        Some(Shape::new(
            ghost::client_rect(image),
            ghost::computed_radius(image, PREVIEW_RADIUS_FALLBACK),
        ))
    }
}
