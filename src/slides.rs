//! Showing one slide at a time.
//!
//! Slides are matched by position among their siblings (`:nth-child`), so the
//! deck is expected to keep its `.slide` sections as direct siblings.

use tracing::debug;

use crate::error::Result;
use crate::renderer::RenderSurface;

pub const SLIDE_SELECTOR: &str = ".slide";

pub fn hide_all_rule() -> String {
    format!("{} {{ display: none !important; }}", SLIDE_SELECTOR)
}

/// `index` is zero-based; the selector is one-based.
pub fn reveal_rule(index: usize) -> String {
    format!(
        "{}:nth-child({}) {{ display: flex !important; }}",
        SLIDE_SELECTOR,
        index + 1
    )
}

pub fn hide_rule(index: usize) -> String {
    format!(
        "{}:nth-child({}) {{ display: none !important; }}",
        SLIDE_SELECTOR,
        index + 1
    )
}

/// Drives a surface through hide-all, then reveal/capture/hide per slide.
pub struct SlideIsolation<'a, S: RenderSurface> {
    surface: &'a mut S,
    slide_count: usize,
}

impl<'a, S: RenderSurface> SlideIsolation<'a, S> {
    /// Hides every slide on the surface.
    pub async fn begin(surface: &'a mut S, slide_count: usize) -> Result<SlideIsolation<'a, S>> {
        surface.inject_style(&hide_all_rule()).await?;
        Ok(Self {
            surface,
            slide_count,
        })
    }

    pub async fn reveal(&mut self, index: usize) -> Result<()> {
        debug!("Revealing slide {}/{}", index + 1, self.slide_count);
        self.surface.inject_style(&reveal_rule(index)).await
    }

    /// Must follow every `reveal`, or the next capture shows two slides.
    pub async fn hide(&mut self, index: usize) -> Result<()> {
        self.surface.inject_style(&hide_rule(index)).await
    }

    pub fn surface(&mut self) -> &mut S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_and_hide_use_one_based_positions() {
        assert_eq!(
            reveal_rule(0),
            ".slide:nth-child(1) { display: flex !important; }"
        );
        assert_eq!(
            hide_rule(2),
            ".slide:nth-child(3) { display: none !important; }"
        );
    }

    #[test]
    fn hide_all_targets_every_slide() {
        assert_eq!(hide_all_rule(), ".slide { display: none !important; }");
    }
}
