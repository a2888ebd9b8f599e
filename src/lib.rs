//! Browser side of the blog image preview: builds the lightbox over the
//! server-rendered article markup and drives it with `lightbox_core`.

pub mod dom_surface;
pub mod ghost;
pub mod modal;
pub mod page_data;
pub mod preview;
pub mod tall_images;

pub use page_data::{PageData, PreviewLabels};
pub use preview::init_image_preview;

use wasm_bindgen::prelude::wasm_bindgen;

/// Runs after the page's other scripts have wired their enhancements.
#[wasm_bindgen(start)]
pub fn start() {
    let page = PageData::load();
    tall_images::mark_tall_images(&page);
    init_image_preview(&page);
}
