/// A previewable picture collected from the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageEntry {
    src: Option<String>,
    caption: Option<String>,
}

impl ImageEntry {
    /// `current_src` wins over the `src` attribute; blank values count as absent.
    pub fn resolve(current_src: &str, src_attr: Option<&str>, alt: Option<&str>) -> Self {
        let src = non_blank(current_src)
            .or_else(|| src_attr.and_then(non_blank))
            .map(str::to_string);
        let caption = alt.and_then(non_blank).map(str::to_string);
        Self { src, caption }
    }

    pub fn new(src: impl Into<String>, caption: Option<&str>) -> Self {
        Self::resolve(&src.into(), None, caption)
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
