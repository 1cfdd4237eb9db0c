use colored::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::assembler::PdfAssembler;
use crate::error::Result;
use crate::fs::{self, FileSystem, TokioFs};
use crate::options::ConvertOptions;
use crate::renderer::{RenderBackend, RenderSurface};
use crate::slides::SLIDE_SELECTOR;
use crate::{screenshot, vector};

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    /// Number of `.slide` elements found in the document.
    pub slide_count: usize,
    /// Pages written, never less than one.
    pub page_count: usize,
    pub screenshot: bool,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PDF generated: {} ({} page(s))",
            self.output_path.display(),
            self.page_count
        )?;
        if self.screenshot {
            write!(f, " [screenshot mode]")?;
        }
        Ok(())
    }
}

/// Turns an HTML slide deck into a PDF using one browser session per call.
pub struct Converter<B, F = TokioFs> {
    backend: B,
    fs: F,
}

impl<B: RenderBackend> Converter<B, TokioFs> {
    pub fn new(backend: B) -> Self {
        Self::with_fs(backend, TokioFs)
    }
}

impl<B: RenderBackend, F: FileSystem> Converter<B, F> {
    pub fn with_fs(backend: B, fs: F) -> Self {
        Self { backend, fs }
    }

    pub async fn convert(&self, options: &ConvertOptions) -> Result<ConversionReport> {
        let input_path = fs::absolute(&options.input_path)?;
        let html = self.fs.read_to_string(&input_path).await?;
        debug!("Read {} bytes from {}", html.len(), input_path.display());

        let mut surface = self.backend.open().await?;
        let result = self.render(&mut surface, &html, options).await;
        if let Err(e) = surface.close().await {
            warn!("Failed to close browser session: {}", e);
        }
        let slide_count = result?;

        let report = ConversionReport {
            output_path: options.output_path.clone(),
            slide_count,
            page_count: slide_count.max(1),
            screenshot: options.screenshot,
        };
        info!("{}", report.to_string().green());
        Ok(report)
    }

    /// Runs the pipeline on an open surface and returns the slide count.
    async fn render(
        &self,
        surface: &mut B::Surface,
        html: &str,
        options: &ConvertOptions,
    ) -> Result<usize> {
        surface.set_viewport(options.width, options.height).await?;
        surface.load_content(html).await?;

        let slide_count = surface.count_elements(SLIDE_SELECTOR).await?;
        debug!("Found {} slide(s)", slide_count);

        let output_path = fs::absolute(&options.output_path)?;
        if options.screenshot {
            screenshot::convert_slides(surface, &self.fs, options, &output_path, slide_count)
                .await?;
        } else if slide_count > 1 {
            vector::convert_slides(surface, &self.fs, options, &output_path, slide_count).await?;
        } else {
            self.convert_single(surface, options, &output_path).await?;
        }

        Ok(slide_count)
    }

    async fn convert_single(
        &self,
        surface: &mut B::Surface,
        options: &ConvertOptions,
        output_path: &Path,
    ) -> Result<()> {
        let printed = surface.export_pdf(&options.pdf_options()).await?;

        let source = PdfAssembler::load(&printed)?;
        let mut pdf = PdfAssembler::new();
        for page_id in pdf.copy_pages(&source, &[0])? {
            pdf.fit_page(page_id, options.width, options.height)?;
            pdf.append_page(page_id);
        }
        let data = pdf.save()?;

        self.fs.write(output_path, &data).await
    }
}
