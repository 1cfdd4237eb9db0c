//! # slide2pdf
//!
//! Turn an HTML deck of full-screen `.slide` sections into a 16:9 PDF.
//!
//! Each slide is printed on its own through headless Chromium and merged into
//! one document, keeping text selectable. Screenshot mode embeds a PNG per
//! slide instead, for CSS the print path renders poorly.
//!
//! ## Usage
//!
//! ```bash
//! slide2pdf generate deck.html -o deck.pdf
//! slide2pdf g deck.html -o deck.pdf --screenshot
//! ```
//!
//! ```no_run
//! use slide2pdf::{BrowserOptions, ChromiumBackend, ConvertOptions, Converter};
//!
//! # async fn run() -> slide2pdf::Result<()> {
//! let converter = Converter::new(ChromiumBackend::new(BrowserOptions::default()));
//! let report = converter
//!     .convert(&ConvertOptions::new("deck.html", "deck.pdf").scale(0.8))
//!     .await?;
//! assert!(report.page_count >= 1);
//! # Ok(())
//! # }
//! ```

mod assembler;
mod chromium;
mod converter;
mod error;
pub mod fs;
mod options;
pub mod renderer;
pub mod scaffold;
mod screenshot;
mod slides;
mod vector;

pub use assembler::{EmbeddedImage, PdfAssembler};
pub use chromium::{BrowserOptions, ChromiumBackend, ChromiumSurface};
pub use converter::{ConversionReport, Converter};
pub use error::{ConvertError, Result};
pub use fs::{FileSystem, TokioFs};
pub use options::{parse_scale, ConvertOptions, PdfOptions};
pub use renderer::{RenderBackend, RenderSurface};
pub use slides::{hide_all_rule, hide_rule, reveal_rule, SLIDE_SELECTOR};
pub use vector::temp_slide_path;
