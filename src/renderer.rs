//! The browser seam.
//!
//! A [`RenderBackend`] opens one [`RenderSurface`] per conversion. The surface
//! is stateful: style rules injected through it accumulate for the lifetime of
//! the loaded document.

use async_trait::async_trait;

use crate::error::Result;
use crate::options::PdfOptions;

#[async_trait]
pub trait RenderBackend: Send + Sync {
    type Surface: RenderSurface;

    /// Start a browser session and open a blank page in it.
    async fn open(&self) -> Result<Self::Surface>;
}

#[async_trait]
pub trait RenderSurface: Send {
    async fn set_viewport(&mut self, width: u32, height: u32) -> Result<()>;

    /// Replace the page content and block until no network request has been
    /// in flight for a short quiet window.
    async fn load_content(&mut self, html: &str) -> Result<()>;

    async fn count_elements(&mut self, selector: &str) -> Result<usize>;

    /// Append a `<style>` element with the given rules to the document head.
    async fn inject_style(&mut self, css: &str) -> Result<()>;

    /// PNG of the current viewport.
    async fn capture_png(&mut self) -> Result<Vec<u8>>;

    /// Single-page vector PDF of the current state.
    async fn export_pdf(&mut self, options: &PdfOptions) -> Result<Vec<u8>>;

    /// End the session. Called exactly once, on success and failure alike.
    async fn close(self) -> Result<()>;
}
