use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::page_data::PageData;

pub const ARTICLE_IMAGE_SELECTOR: &str = ".article-body img";
pub const TALL_CLASS: &str = "is-tall";
pub const TALL_RATIO: f64 = 1.35;

/// `None` until the image knows its natural size.
pub fn is_tall(natural_width: u32, natural_height: u32) -> Option<bool> {
    if natural_width == 0 || natural_height == 0 {
        return None;
    }
    Some(f64::from(natural_height) / f64::from(natural_width) >= TALL_RATIO)
}

/// Tags portrait-heavy article images on post pages so the stylesheet can
/// narrow them.
pub fn mark_tall_images(page: &PageData) {
    if !page.is_page_type("post") {
        return;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    for image in article_images(&document) {
        if image.complete() {
            apply(&image);
            continue;
        }
        let target = image.clone();
        EventListener::once(&image, "load", move |_| apply(&target)).forget();
    }
}

fn article_images(document: &Document) -> Vec<HtmlImageElement> {
    let Ok(nodes) = document.query_selector_all(ARTICLE_IMAGE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlImageElement>().ok())
        .collect()
}

fn apply(image: &HtmlImageElement) {
    let Some(tall) = is_tall(image.natural_width(), image.natural_height()) else {
        return;
    };
    let _ = image.class_list().toggle_with_force(TALL_CLASS, tall);
}
