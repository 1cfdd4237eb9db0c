use std::path::PathBuf;

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
pub const DEFAULT_SCALE: f64 = 1.0;
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 2.0;

/// A fully resolved conversion request.
///
/// The core trusts these values: `scale` is range-checked by the CLI
/// (see [`parse_scale`]) and forwarded verbatim to every vector export.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub screenshot: bool,
    pub scale: f64,
}

impl ConvertOptions {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            screenshot: false,
            scale: DEFAULT_SCALE,
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn screenshot(mut self, screenshot: bool) -> Self {
        self.screenshot = screenshot;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Settings for a full-bleed vector export of the current surface.
    pub fn pdf_options(&self) -> PdfOptions {
        PdfOptions {
            width: self.width,
            height: self.height,
            scale: self.scale,
            ..PdfOptions::default()
        }
    }
}

/// Parameters of a single vector export.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Paper width in CSS pixels.
    pub width: u32,
    /// Paper height in CSS pixels.
    pub height: u32,
    pub scale: f64,
    pub print_background: bool,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            print_background: true,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
        }
    }
}

/// Clap value parser for `--scale`.
pub fn parse_scale(s: &str) -> Result<f64, String> {
    let value = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid scale: {}. Must be a number between 0.1 and 2.", s))?;
    if !(MIN_SCALE..=MAX_SCALE).contains(&value) {
        return Err(format!(
            "Invalid scale: {}. Must be a number between 0.1 and 2.",
            s
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_1080p_deck() {
        let options = ConvertOptions::new("deck.html", "deck.pdf");
        assert_eq!(options.width, 1920);
        assert_eq!(options.height, 1080);
        assert!(!options.screenshot);
        assert_eq!(options.scale, 1.0);
    }

    #[test]
    fn pdf_options_carry_size_and_scale() {
        let pdf = ConvertOptions::new("a.html", "a.pdf")
            .size(1280, 720)
            .scale(0.8)
            .pdf_options();
        assert_eq!(pdf.width, 1280);
        assert_eq!(pdf.height, 720);
        assert_eq!(pdf.scale, 0.8);
        assert!(pdf.print_background);
        assert_eq!(pdf.margin_left, 0.0);
    }

    #[test]
    fn scale_parser_accepts_range_bounds() {
        assert_eq!(parse_scale("0.1"), Ok(0.1));
        assert_eq!(parse_scale("2"), Ok(2.0));
        assert_eq!(parse_scale("0.8"), Ok(0.8));
    }

    #[test]
    fn scale_parser_rejects_out_of_range_and_garbage() {
        assert!(parse_scale("0.05").is_err());
        assert!(parse_scale("2.5").is_err());
        assert!(parse_scale("abc").is_err());
        assert!(parse_scale("NaN").is_err());
    }
}
