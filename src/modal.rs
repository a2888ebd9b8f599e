use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlImageElement};

use crate::page_data::PreviewLabels;

pub const MODAL_CLASS: &str = "image-preview-modal";
pub const CLOSE_CLASS: &str = "image-preview-close";
pub const NAV_CLASS: &str = "image-preview-nav";
pub const PREV_CLASS: &str = "image-preview-nav-prev";
pub const NEXT_CLASS: &str = "image-preview-nav-next";
pub const FRAME_CLASS: &str = "image-preview-frame";
pub const IMAGE_CLASS: &str = "image-preview-image";
pub const CAPTION_CLASS: &str = "image-preview-caption";
pub const CAPTION_ID: &str = "image-preview-caption";

/// Handles to the preview dialog. Cheap to clone; all fields are DOM refs.
#[derive(Clone, Debug)]
pub struct ModalRefs {
    pub modal: HtmlElement,
    pub close_button: HtmlButtonElement,
    pub prev_button: HtmlButtonElement,
    pub next_button: HtmlButtonElement,
    pub image: HtmlImageElement,
    pub caption: HtmlElement,
}

/// Builds the dialog skeleton and appends it to `body`. No listeners are
/// attached here.
pub fn build_modal(document: &Document, labels: &PreviewLabels) -> Result<ModalRefs, JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let modal: HtmlElement = create(document, "div")?;
    modal.set_class_name(MODAL_CLASS);
    modal.set_attribute("role", "dialog")?;
    modal.set_attribute("aria-modal", "true")?;
    modal.set_attribute("aria-label", &labels.dialog)?;
    modal.set_attribute("aria-hidden", "true")?;
    modal.set_hidden(true);

    let close_button: HtmlButtonElement = create(document, "button")?;
    close_button.set_type("button");
    close_button.set_class_name(CLOSE_CLASS);
    close_button.set_attribute("aria-label", &labels.close)?;
    close_button.set_text_content(Some("\u{00d7}"));

    let prev_button = nav_button(
        document,
        &format!("{NAV_CLASS} {PREV_CLASS}"),
        &labels.previous,
        "\u{2039}",
    )?;
    let next_button = nav_button(
        document,
        &format!("{NAV_CLASS} {NEXT_CLASS}"),
        &labels.next,
        "\u{203a}",
    )?;

    let frame: HtmlElement = create(document, "div")?;
    frame.set_class_name(FRAME_CLASS);

    let image: HtmlImageElement = create(document, "img")?;
    image.set_class_name(IMAGE_CLASS);
    image.set_alt("");
    image.set_attribute("aria-describedby", CAPTION_ID)?;

    let caption: HtmlElement = create(document, "div")?;
    caption.set_class_name(CAPTION_CLASS);
    caption.set_id(CAPTION_ID);
    caption.set_hidden(true);

    frame.append_child(&image)?;
    frame.append_child(&caption)?;
    modal.append_child(&close_button)?;
    modal.append_child(&prev_button)?;
    modal.append_child(&next_button)?;
    modal.append_child(&frame)?;
    body.append_child(&modal)?;

    Ok(ModalRefs {
        modal,
        close_button,
        prev_button,
        next_button,
        image,
        caption,
    })
}

fn nav_button(
    document: &Document,
    class_name: &str,
    label: &str,
    symbol: &str,
) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_type("button");
    button.set_class_name(class_name);
    button.set_attribute("aria-label", label)?;
    let icon: HtmlElement = create(document, "span")?;
    icon.set_class_name("image-preview-nav-icon");
    icon.set_text_content(Some(symbol));
    button.append_child(&icon)?;
    Ok(button)
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("unexpected element type for <{tag}>")))
}
