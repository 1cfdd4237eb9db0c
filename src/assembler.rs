use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use tracing::debug;

use crate::error::{ConvertError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Handle to an image XObject embedded in an assembler document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub id: ObjectId,
    pub width: u32,
    pub height: u32,
}

impl EmbeddedImage {
    fn resource_name(&self) -> String {
        format!("Im{}", self.id.0)
    }
}

/// Builds one output PDF from blank pages, embedded PNGs and pages copied
/// out of other documents.
pub struct PdfAssembler {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfAssembler {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(Vec::new()));
        pages.set("Count", Object::Integer(0));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Appends an empty `width` x `height` point page.
    pub fn add_page(&mut self, width: u32, height: u32) -> ObjectId {
        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set("MediaBox", media_box(width, height));
        page.set("Resources", Object::Dictionary(Dictionary::new()));
        let page_id = self.doc.add_object(page);
        self.page_ids.push(page_id);
        page_id
    }

    /// Decodes a PNG and stores it as an RGB image XObject, with a soft mask
    /// when the capture carries transparency.
    pub fn embed_png(&mut self, png: &[u8]) -> Result<EmbeddedImage> {
        let decoded = image::load_from_memory_with_format(png, image::ImageFormat::Png)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels = width as usize * height as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        let mut has_alpha = false;
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            has_alpha |= a != 255;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        let mut dict = image_dict(width, height, b"DeviceRGB");
        if has_alpha {
            let mask = Stream::new(
                image_dict(width, height, b"DeviceGray"),
                flate_compress(&alpha)?,
            )
            .with_compression(false);
            let mask_id = self.doc.add_object(mask);
            dict.set("SMask", Object::Reference(mask_id));
        }

        let stream = Stream::new(dict, flate_compress(&rgb)?).with_compression(false);
        let id = self.doc.add_object(stream);
        debug!("Embedded {}x{} PNG as {:?}", width, height, id);

        Ok(EmbeddedImage { id, width, height })
    }

    /// Paints `image` into the rectangle at (`x`, `y`) with the given size,
    /// in page user space.
    pub fn draw_image(
        &mut self,
        page_id: ObjectId,
        image: &EmbeddedImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let name = image.resource_name();
        let ops = format!(
            "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n",
            num(width),
            num(height),
            num(x),
            num(y),
            name
        );
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), ops.into_bytes()));

        let page = self.page_dict_mut(page_id)?;

        let mut resources = match page.get(b"Resources") {
            Ok(Object::Dictionary(resources)) => resources.clone(),
            _ => Dictionary::new(),
        };
        let mut xobjects = match resources.get(b"XObject") {
            Ok(Object::Dictionary(xobjects)) => xobjects.clone(),
            _ => Dictionary::new(),
        };
        xobjects.set(name.as_bytes(), Object::Reference(image.id));
        resources.set("XObject", Object::Dictionary(xobjects));
        page.set("Resources", Object::Dictionary(resources));

        append_contents(page, content_id);
        Ok(())
    }

    /// Parses a PDF byte stream.
    pub fn load(bytes: &[u8]) -> Result<Document> {
        Document::load_mem(bytes)
            .map_err(|e| ConvertError::assembly(format!("Failed to parse PDF: {}", e)))
    }

    /// Copies the pages at the zero-based `indices` of `source` into this
    /// document and returns their new ids in the same order. The copies are
    /// not part of the page tree until passed to [`PdfAssembler::append_page`].
    pub fn copy_pages(&mut self, source: &Document, indices: &[usize]) -> Result<Vec<ObjectId>> {
        let mut source = source.clone();
        source.renumber_objects_with(self.doc.max_id + 1);

        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        let mut flattened = Vec::with_capacity(indices.len());
        for &index in indices {
            let page_id = *source_pages.get(index).ok_or_else(|| {
                ConvertError::assembly(format!(
                    "Page index {} out of range for a {}-page document",
                    index,
                    source_pages.len()
                ))
            })?;
            flattened.push((page_id, inherited_page(&source, page_id)?));
        }

        self.doc.max_id = self.doc.max_id.max(source.max_id);
        for (id, object) in source.objects.into_iter() {
            if is_tree_node(&object) {
                continue;
            }
            self.doc.objects.insert(id, object);
        }

        // A page requested twice becomes two page objects sharing content.
        let mut copied: Vec<ObjectId> = Vec::with_capacity(flattened.len());
        for (page_id, mut page) in flattened {
            page.set("Parent", Object::Reference(self.pages_id));
            if copied.contains(&page_id) {
                copied.push(self.doc.add_object(page));
            } else {
                self.doc.objects.insert(page_id, Object::Dictionary(page));
                copied.push(page_id);
            }
        }

        debug!("Copied {} page(s) from source document", copied.len());
        Ok(copied)
    }

    /// Appends a page obtained from [`PdfAssembler::copy_pages`].
    pub fn append_page(&mut self, page_id: ObjectId) {
        self.page_ids.push(page_id);
    }

    /// Rescales a page so its media box becomes exactly `width` x `height`
    /// points. Content is transformed, not rasterized.
    pub fn fit_page(&mut self, page_id: ObjectId, width: u32, height: u32) -> Result<()> {
        let page = self.page_dict_mut(page_id)?;
        let [x0, y0, x1, y1] = read_box(page.get(b"MediaBox").ok())
            .ok_or_else(|| ConvertError::assembly("Copied page has no usable MediaBox"))?;
        let (src_w, src_h) = (x1 - x0, y1 - y0);
        if src_w <= 0.0 || src_h <= 0.0 {
            return Err(ConvertError::assembly("Copied page has an empty MediaBox"));
        }

        let sx = f64::from(width) / src_w;
        let sy = f64::from(height) / src_h;
        if (sx - 1.0).abs() < 1e-6 && (sy - 1.0).abs() < 1e-6 && x0 == 0.0 && y0 == 0.0 {
            return Ok(());
        }

        let prefix = format!(
            "q\n{} 0 0 {} {} {} cm\n",
            num(sx),
            num(sy),
            num(-x0 * sx),
            num(-y0 * sy)
        );
        let existing = match page.get(b"Contents") {
            Ok(Object::Reference(id)) => vec![Object::Reference(*id)],
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        let prefix_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), prefix.into_bytes()));
        let suffix_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));

        let mut contents = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(prefix_id));
        contents.extend(existing);
        contents.push(Object::Reference(suffix_id));

        let page = self.page_dict_mut(page_id)?;
        page.set("Contents", Object::Array(contents));
        page.set("MediaBox", media_box(width, height));
        page.remove(b"CropBox");
        self.fit_annotations(page_id, |x, y| ((x - x0) * sx, (y - y0) * sy))?;
        debug!("Fitted page {:?} by {:.4}x{:.4}", page_id, sx, sy);
        Ok(())
    }

    /// Moves annotation `Rect` and `QuadPoints` with the page content, so link
    /// areas stay over the text they belong to.
    fn fit_annotations<T>(&mut self, page_id: ObjectId, transform: T) -> Result<()>
    where
        T: Fn(f64, f64) -> (f64, f64),
    {
        let annots = self.page_dict_mut(page_id)?.get(b"Annots").ok().cloned();
        let (annots, holder) = match annots {
            Some(Object::Array(items)) => (items, None),
            Some(Object::Reference(id)) => {
                let items = self
                    .doc
                    .get_object(id)
                    .and_then(Object::as_array)
                    .map(|items| items.clone())
                    .unwrap_or_default();
                (items, Some(id))
            }
            _ => return Ok(()),
        };

        let mut fitted = Vec::with_capacity(annots.len());
        for annot in annots {
            match annot {
                Object::Reference(id) => {
                    if let Ok(Object::Dictionary(dict)) = self.doc.get_object_mut(id) {
                        transform_annotation(dict, &transform);
                    }
                    fitted.push(Object::Reference(id));
                }
                Object::Dictionary(mut dict) => {
                    transform_annotation(&mut dict, &transform);
                    fitted.push(Object::Dictionary(dict));
                }
                other => fitted.push(other),
            }
        }

        match holder {
            Some(id) => {
                self.doc.objects.insert(id, Object::Array(fitted));
            }
            None => {
                self.page_dict_mut(page_id)?
                    .set("Annots", Object::Array(fitted));
            }
        }
        Ok(())
    }

    /// Finalizes the page tree and returns the serialized document.
    pub fn save(mut self) -> Result<Vec<u8>> {
        if self.page_ids.is_empty() {
            return Err(ConvertError::assembly("No pages added to the document"));
        }

        let kids = self
            .page_ids
            .iter()
            .copied()
            .map(Object::Reference)
            .collect::<Vec<_>>();
        let count = kids.len() as i64;
        let pages_id = self.pages_id;
        let pages = self
            .doc
            .get_object_mut(pages_id)
            .and_then(Object::as_dict_mut)?;
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", Object::Integer(count));

        self.doc.prune_objects();
        self.doc.compress();

        let mut data = Vec::new();
        self.doc
            .save_to(&mut data)
            .map_err(|e| ConvertError::assembly(format!("Failed to serialize PDF: {}", e)))?;

        debug!("Serialized PDF with {} page(s), {} bytes", count, data.len());
        Ok(data)
    }

    fn page_dict_mut(&mut self, page_id: ObjectId) -> Result<&mut Dictionary> {
        self.doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| ConvertError::assembly(format!("Page {:?} not found: {}", page_id, e)))
    }
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn media_box(width: u32, height: u32) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(i64::from(width)),
        Object::Integer(i64::from(height)),
    ])
}

fn image_dict(width: u32, height: u32, color_space: &[u8]) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(color_space.to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    dict
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| ConvertError::assembly(format!("Failed to compress image data: {}", e)))
}

/// Content streams want plain decimals, never exponents.
fn num(value: f64) -> String {
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn as_number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn read_box(object: Option<&Object>) -> Option<[f64; 4]> {
    let items = object?.as_array().ok()?;
    if items.len() != 4 {
        return None;
    }
    let mut out = [0.0; 4];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = as_number(item)?;
    }
    Some(out)
}

fn transform_annotation<T>(annot: &mut Dictionary, transform: &T)
where
    T: Fn(f64, f64) -> (f64, f64),
{
    for key in [b"Rect".as_slice(), b"QuadPoints".as_slice()] {
        let Ok(Object::Array(items)) = annot.get(key) else {
            continue;
        };
        let Some(values) = items.iter().map(as_number).collect::<Option<Vec<f64>>>() else {
            continue;
        };
        if values.len() % 2 != 0 {
            continue;
        }
        let mapped = values
            .chunks(2)
            .flat_map(|point| {
                let (x, y) = transform(point[0], point[1]);
                [Object::Real(x as _), Object::Real(y as _)]
            })
            .collect();
        annot.set(key, Object::Array(mapped));
    }
}

fn is_tree_node(object: &Object) -> bool {
    let Object::Dictionary(dict) = object else {
        return false;
    };
    matches!(
        dict.get(b"Type"),
        Ok(Object::Name(name)) if name == b"Catalog" || name == b"Pages"
    )
}

/// The page dictionary with attributes inherited from its ancestors made
/// explicit, so it survives being re-parented.
fn inherited_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(parent_id) = parent {
        depth += 1;
        if depth > 64 {
            return Err(ConvertError::assembly("Page tree is too deep or cyclic"));
        }
        let node = doc.get_dictionary(parent_id)?;
        for key in INHERITABLE {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key, value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    Ok(page)
}

fn append_contents(page: &mut Dictionary, content_id: ObjectId) {
    let contents = match page.get(b"Contents") {
        Ok(Object::Reference(id)) => vec![Object::Reference(*id), Object::Reference(content_id)],
        Ok(Object::Array(items)) => {
            let mut items = items.clone();
            items.push(Object::Reference(content_id));
            items
        }
        _ => {
            page.set("Contents", Object::Reference(content_id));
            return;
        }
    };
    page.set("Contents", Object::Array(contents));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, alpha]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn blank_pdf(pages: usize, width: u32, height: u32) -> Vec<u8> {
        let mut assembler = PdfAssembler::new();
        for _ in 0..pages {
            assembler.add_page(width, height);
        }
        assembler.save().unwrap()
    }

    fn media_boxes(bytes: &[u8]) -> Vec<[f64; 4]> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| read_box(doc.get_dictionary(*id).unwrap().get(b"MediaBox").ok()).unwrap())
            .collect()
    }

    #[test]
    fn blank_pages_have_requested_media_box() {
        let bytes = blank_pdf(2, 1920, 1080);
        assert_eq!(media_boxes(&bytes), vec![[0.0, 0.0, 1920.0, 1080.0]; 2]);
    }

    #[test]
    fn saving_an_empty_document_fails() {
        let err = PdfAssembler::new().save().unwrap_err();
        assert!(matches!(err, ConvertError::Assembly(_)));
    }

    #[test]
    fn embedded_png_is_drawn_full_bleed() {
        let mut assembler = PdfAssembler::new();
        let image = assembler.embed_png(&png(8, 4, 255)).unwrap();
        assert_eq!((image.width, image.height), (8, 4));

        let page = assembler.add_page(8, 4);
        assembler.draw_image(page, &image, 0.0, 0.0, 8.0, 4.0).unwrap();
        let bytes = assembler.save().unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.contains("8 0 0 4 0 0 cm"));
        assert!(content.contains(&format!("/Im{} Do", image.id.0)));
    }

    #[test]
    fn transparent_png_gets_a_soft_mask() {
        let mut assembler = PdfAssembler::new();
        let image = assembler.embed_png(&png(2, 2, 128)).unwrap();
        let dict = assembler.doc.get_object(image.id).unwrap().as_stream().unwrap().dict.clone();
        assert!(dict.has(b"SMask"));

        let opaque = assembler.embed_png(&png(2, 2, 255)).unwrap();
        let dict = assembler.doc.get_object(opaque.id).unwrap().as_stream().unwrap().dict.clone();
        assert!(!dict.has(b"SMask"));
    }

    #[test]
    fn garbage_png_is_an_assembly_error() {
        let err = PdfAssembler::new().embed_png(b"not a png").unwrap_err();
        assert!(matches!(err, ConvertError::Assembly(_)));
    }

    #[test]
    fn copied_pages_keep_requested_order() {
        let mut source = PdfAssembler::new();
        source.add_page(100, 100);
        source.add_page(200, 200);
        source.add_page(300, 300);
        let source = PdfAssembler::load(&source.save().unwrap()).unwrap();

        let mut target = PdfAssembler::new();
        let ids = target.copy_pages(&source, &[2, 0, 2]).unwrap();
        assert_eq!(ids.len(), 3);
        for id in ids {
            target.append_page(id);
        }
        let bytes = target.save().unwrap();

        let widths: Vec<f64> = media_boxes(&bytes).iter().map(|b| b[2]).collect();
        assert_eq!(widths, vec![300.0, 100.0, 300.0]);
    }

    #[test]
    fn copying_an_out_of_range_page_fails() {
        let source = PdfAssembler::load(&blank_pdf(1, 10, 10)).unwrap();
        let err = PdfAssembler::new().copy_pages(&source, &[1]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn merging_single_page_documents() {
        let mut target = PdfAssembler::new();
        for _ in 0..3 {
            let source = PdfAssembler::load(&blank_pdf(1, 1440, 810)).unwrap();
            let ids = target.copy_pages(&source, &[0]).unwrap();
            assert_eq!(ids.len(), 1);
            target.append_page(ids[0]);
        }
        assert_eq!(target.page_count(), 3);

        let doc = Document::load_mem(&target.save().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn fit_page_scales_media_box_and_wraps_content() {
        let source = PdfAssembler::load(&blank_pdf(1, 1440, 810)).unwrap();
        let mut target = PdfAssembler::new();
        let page = target.copy_pages(&source, &[0]).unwrap()[0];
        target.append_page(page);
        target.fit_page(page, 1920, 1080).unwrap();
        let bytes = target.save().unwrap();

        assert_eq!(media_boxes(&bytes), vec![[0.0, 0.0, 1920.0, 1080.0]]);
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned();
        assert!(content.contains("1.333333 0 0 1.333333 0 0 cm"));
    }

    #[test]
    fn fit_page_moves_link_areas_with_the_content() {
        let mut source = PdfAssembler::new();
        let page = source.add_page(1440, 810);
        let mut link = Dictionary::new();
        link.set("Type", Object::Name(b"Annot".to_vec()));
        link.set("Subtype", Object::Name(b"Link".to_vec()));
        link.set(
            "Rect",
            Object::Array(vec![
                Object::Integer(100),
                Object::Integer(100),
                Object::Integer(200),
                Object::Integer(200),
            ]),
        );
        let link_id = source.doc.add_object(link);
        source
            .page_dict_mut(page)
            .unwrap()
            .set("Annots", Object::Array(vec![Object::Reference(link_id)]));
        let source = PdfAssembler::load(&source.save().unwrap()).unwrap();

        let mut target = PdfAssembler::new();
        let page = target.copy_pages(&source, &[0]).unwrap()[0];
        target.append_page(page);
        target.fit_page(page, 1920, 1080).unwrap();
        let doc = Document::load_mem(&target.save().unwrap()).unwrap();

        let page_id = *doc.get_pages().values().next().unwrap();
        let annots = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Annots")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        let link_id = annots[0].as_reference().unwrap();
        let rect = read_box(doc.get_dictionary(link_id).unwrap().get(b"Rect").ok()).unwrap();
        let expected = [133.333, 133.333, 266.667, 266.667];
        for (actual, expected) in rect.iter().zip(expected) {
            assert!((actual - expected).abs() < 0.01, "{:?}", rect);
        }
    }

    #[test]
    fn quad_points_follow_the_fit_transform() {
        let mut annot = Dictionary::new();
        annot.set(
            "QuadPoints",
            Object::Array((1..=8).map(|v| Object::Integer(v * 10)).collect()),
        );
        transform_annotation(&mut annot, &|x, y| (x * 2.0, y + 1.0));
        let points: Vec<f64> = annot
            .get(b"QuadPoints")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| as_number(o).unwrap())
            .collect();
        assert_eq!(points, vec![20.0, 21.0, 60.0, 41.0, 100.0, 61.0, 140.0, 81.0]);
    }

    #[test]
    fn inherited_media_box_survives_copy() {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        let page_id = doc.add_object(page);
        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages.set("Count", Object::Integer(1));
        pages.set("MediaBox", media_box(640, 360));
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut target = PdfAssembler::new();
        let copied = target.copy_pages(&doc, &[0]).unwrap();
        target.append_page(copied[0]);
        assert_eq!(media_boxes(&target.save().unwrap()), vec![[0.0, 0.0, 640.0, 360.0]]);
    }

    #[test]
    fn numbers_are_written_without_exponents() {
        assert_eq!(num(1920.0), "1920");
        assert_eq!(num(4.0 / 3.0), "1.333333");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(0.0000001), "0");
    }
}
