use std::fmt::Debug;

/// How the host should paint a background image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundStyle {
    pub image_url: String,
    pub size: &'static str,
    pub position: &'static str,
}

impl BackgroundStyle {
    /// Cover the whole viewport, centered.
    pub fn cover(image_url: impl Into<String>) -> Self {
        Self { image_url: image_url.into(), size: "cover", position: "center" }
    }
}

/// Whatever surface hosts the widget (terminal, page, ...).
pub trait BackgroundSurface: Send + Debug {
    fn apply(&mut self, style: &BackgroundStyle);
}

/// Surface that ignores backgrounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackground;

impl BackgroundSurface for NoBackground {
    fn apply(&mut self, _style: &BackgroundStyle) {}
}
