//! Multi-slide vector export: one printed PDF per slide, merged afterwards.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::assembler::PdfAssembler;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::options::ConvertOptions;
use crate::renderer::RenderSurface;
use crate::slides::SlideIsolation;

/// Where slide `index` is printed before the merge.
pub fn temp_slide_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!(".temp-slide-{}.pdf", index))
}

/// Prints every slide to its own temporary PDF next to `output_path`, merges
/// them in order into `output_path` and removes the temporaries.
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
    let output_dir = output_path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_paths: Vec<PathBuf> = Vec::with_capacity(slide_count);

    let result = print_and_merge(
        surface,
        fs,
        options,
        output_path,
        output_dir,
        slide_count,
        &mut temp_paths,
    )
    .await;

    for temp_path in &temp_paths {
        if let Err(e) = fs.remove(temp_path).await {
            warn!("Failed to remove {}: {}", temp_path.display(), e);
        }
    }

    result
}

async fn print_and_merge<S, F>(
    surface: &mut S,
    fs: &F,
    options: &ConvertOptions,
    output_path: &Path,
    output_dir: &Path,
    slide_count: usize,
    temp_paths: &mut Vec<PathBuf>,
) -> Result<()>
where
    S: RenderSurface,
    F: FileSystem,
{
    let pdf_options = options.pdf_options();
    let mut slides = SlideIsolation::begin(surface, slide_count).await?;

    for index in 0..slide_count {
        slides.reveal(index).await?;
        let printed = slides.surface().export_pdf(&pdf_options).await;
        let hidden = slides.hide(index).await;
        let printed = printed?;
        hidden?;

        let temp_path = temp_slide_path(output_dir, index);
        fs.write(&temp_path, &printed).await?;
        debug!("Slide {} printed to {}", index + 1, temp_path.display());
        temp_paths.push(temp_path);
    }

    let mut merged = PdfAssembler::new();
    for temp_path in temp_paths.iter() {
        let bytes = fs.read(temp_path).await?;
        let slide = PdfAssembler::load(&bytes)?;
        for page_id in merged.copy_pages(&slide, &[0])? {
            merged.fit_page(page_id, options.width, options.height)?;
            merged.append_page(page_id);
        }
    }

    let data = merged.save()?;
    fs.write(output_path, &data).await
}
