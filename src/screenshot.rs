//! Raster export: each slide becomes a full-page PNG.

use std::path::Path;
use tracing::debug;

use crate::assembler::PdfAssembler;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::options::ConvertOptions;
use crate::renderer::RenderSurface;
use crate::slides::SlideIsolation;

pub async fn convert_slides<S, F>(
    surface: &mut S,
    fs: &F,
    options: &ConvertOptions,
    output_path: &Path,
    slide_count: usize,
) -> Result<()>
where
    S: RenderSurface,
    F: FileSystem,
{
    let mut pdf = PdfAssembler::new();

    if slide_count > 1 {
        let mut slides = SlideIsolation::begin(surface, slide_count).await?;
        for index in 0..slide_count {
            slides.reveal(index).await?;
            let captured = slides.surface().capture_png().await;
            let hidden = slides.hide(index).await;
            let captured = captured?;
            hidden?;

            add_image_page(&mut pdf, &captured, options)?;
            debug!("Slide {} captured", index + 1);
        }
    } else {
        let captured = surface.capture_png().await?;
        add_image_page(&mut pdf, &captured, options)?;
    }

    let data = pdf.save()?;
    fs.write(output_path, &data).await
}

/// The capture is stretched over the whole page; it is expected to already be
/// viewport-sized.
fn add_image_page(pdf: &mut PdfAssembler, png: &[u8], options: &ConvertOptions) -> Result<()> {
    let image = pdf.embed_png(png)?;
    let page = pdf.add_page(options.width, options.height);
    pdf.draw_image(
        page,
        &image,
        0.0,
        0.0,
        f64::from(options.width),
        f64::from(options.height),
    )
}
