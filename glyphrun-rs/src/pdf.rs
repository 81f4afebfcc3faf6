//! Single-page PDF drawing.
//!
//! [`PdfCanvas`] exposes a small top-left-origin drawing surface: stroked
//! line segments and positioned glyph runs. The y-axis flip into PDF's
//! bottom-left-origin page space happens here and nowhere else.
//!
//! Fonts are embedded as Type0/CIDFontType2 with Identity-H encoding, so
//! glyph runs address the face by glyph identifier directly; each glyph is
//! shown as a two-byte code that doubles as its glyph id.

use std::sync::Arc;

use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Content, Finish, Name, PdfWriter, Rect, Ref, Str};

use crate::error::{GlyphrunError, GlyphrunResult};
use crate::fonts::LoadedFont;
use crate::shaping::PositionedGlyph;

/// Glyph metrics in a font descriptor are expressed per 1000 design units.
const DESCRIPTOR_UNITS: f64 = 1000.0;

/// A font that will be embedded when the document is finished.
struct EmbeddedFont {
    resource_name: Vec<u8>,
    base_font: String,
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: u16,
    ascent: f32,
    descent: f32,
    cap_height: f32,
    bbox: Rect,
    /// Advance widths for every glyph id, already scaled to 1000/em.
    widths: Vec<f32>,
}

/// A single-page PDF document under construction.
pub struct PdfCanvas {
    width: f64,
    height: f64,
    content: Content,
    fonts: Vec<EmbeddedFont>,
}

impl PdfCanvas {
    /// Start a document with one page of the given size in points.
    pub fn new(width: f64, height: f64) -> PdfCanvas {
        PdfCanvas {
            width,
            height,
            content: Content::new(),
            fonts: Vec::new(),
        }
    }

    /// Page width in points.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Page height in points.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Stroke a line segment between two points, top-left-origin.
    pub fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        line_width: f64,
        rgb: (f32, f32, f32),
    ) {
        let height = self.height as f32;
        self.content
            .save_state()
            .set_line_width(line_width as f32)
            .set_stroke_rgb(rgb.0, rgb.1, rgb.2)
            .move_to(from.0 as f32, height - from.1 as f32)
            .line_to(to.0 as f32, height - to.1 as f32)
            .stroke()
            .restore_state();
    }

    /// Draw a run of absolutely positioned glyphs in the given font.
    ///
    /// The font is registered and embedded on first use; later runs with
    /// the same face reuse the embedded copy.
    pub fn draw_glyphs(
        &mut self,
        font: &LoadedFont,
        font_size: f64,
        glyphs: &[PositionedGlyph],
    ) -> GlyphrunResult<()> {
        if glyphs.is_empty() {
            return Ok(());
        }

        let font_index = self.register_font(font)?;
        let resource_name = self.fonts[font_index].resource_name.clone();
        let height = self.height as f32;

        self.content
            .begin_text()
            .set_font(Name(resource_name.as_slice()), font_size as f32)
            .set_fill_rgb(0.0, 0.0, 0.0);

        for glyph in glyphs {
            let id = u16::try_from(glyph.glyph_id).map_err(|_| {
                GlyphrunError::Draw(format!("glyph id {} exceeds 16 bits", glyph.glyph_id))
            })?;
            // Each glyph gets its own text matrix: the positions already
            // include the shaping advances, so the writer's own advance
            // bookkeeping must not be allowed to compound on top of them.
            self.content
                .set_text_matrix([1.0, 0.0, 0.0, 1.0, glyph.x as f32, height - glyph.y as f32])
                .show(Str(&id.to_be_bytes()));
        }

        self.content.end_text();
        Ok(())
    }

    /// Produce the final PDF file contents.
    pub fn finish(self) -> Vec<u8> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);

        // Four indirect objects per embedded font follow the fixed ones.
        let font_refs: Vec<FontRefs> = (0..self.fonts.len())
            .map(|i| FontRefs::starting_at(5 + 4 * i as i32))
            .collect();

        let mut writer = PdfWriter::new();
        writer.catalog(catalog_id).pages(page_tree_id);
        writer.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = writer.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, self.width as f32, self.height as f32));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut resource_fonts = resources.fonts();
            for (font, refs) in self.fonts.iter().zip(&font_refs) {
                resource_fonts.pair(Name(font.resource_name.as_slice()), refs.type0);
            }
            resource_fonts.finish();
            resources.finish();
        }
        page.finish();

        writer.stream(content_id, &self.content.finish());

        for (font, refs) in self.fonts.iter().zip(&font_refs) {
            write_font(&mut writer, font, refs);
        }

        writer.finish()
    }

    /// Register a face for embedding, deduplicating by source data.
    fn register_font(&mut self, font: &LoadedFont) -> GlyphrunResult<usize> {
        if let Some(existing) = self
            .fonts
            .iter()
            .position(|f| Arc::ptr_eq(&f.data, &font.data) && f.index == font.index)
        {
            return Ok(existing);
        }

        let face = font.face()?;
        let units_per_em = face.units_per_em();
        let to_descriptor = |v: f64| (v * DESCRIPTOR_UNITS / f64::from(units_per_em)) as f32;

        let glyph_count = face.number_of_glyphs();
        let widths = (0..glyph_count)
            .map(|gid| {
                let advance = face
                    .glyph_hor_advance(ttf_parser::GlyphId(gid))
                    .unwrap_or(0);
                to_descriptor(f64::from(advance))
            })
            .collect();

        let global_bbox = face.global_bounding_box();
        let bbox = Rect::new(
            to_descriptor(f64::from(global_bbox.x_min)),
            to_descriptor(f64::from(global_bbox.y_min)),
            to_descriptor(f64::from(global_bbox.x_max)),
            to_descriptor(f64::from(global_bbox.y_max)),
        );
        let ascent = to_descriptor(f64::from(face.ascender()));
        let descent = to_descriptor(f64::from(face.descender()));
        let cap_height = to_descriptor(f64::from(
            face.capital_height().unwrap_or_else(|| face.ascender()),
        ));

        let resource_name = format!("F{}", self.fonts.len()).into_bytes();
        let base_font = font.family.replace(' ', "");
        log::debug!(
            "embedding `{}` as /{} ({} glyphs)",
            font.family,
            String::from_utf8_lossy(&resource_name),
            glyph_count
        );

        self.fonts.push(EmbeddedFont {
            resource_name,
            base_font,
            data: Arc::clone(&font.data),
            index: font.index,
            units_per_em,
            ascent,
            descent,
            cap_height,
            bbox,
            widths,
        });
        Ok(self.fonts.len() - 1)
    }
}

/// Indirect object references for one embedded font.
struct FontRefs {
    type0: Ref,
    cid: Ref,
    descriptor: Ref,
    data: Ref,
}

impl FontRefs {
    fn starting_at(first: i32) -> FontRefs {
        FontRefs {
            type0: Ref::new(first),
            cid: Ref::new(first + 1),
            descriptor: Ref::new(first + 2),
            data: Ref::new(first + 3),
        }
    }
}

fn write_font(writer: &mut PdfWriter, font: &EmbeddedFont, refs: &FontRefs) {
    let base_font = Name(font.base_font.as_bytes());

    writer
        .type0_font(refs.type0)
        .base_font(base_font)
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(refs.cid);

    let mut cid = writer.cid_font(refs.cid);
    cid.subtype(CidFontType::Type2);
    cid.base_font(base_font);
    cid.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid.font_descriptor(refs.descriptor);
    cid.default_width(0.0);
    cid.cid_to_gid_map_predefined(Name(b"Identity"));
    cid.widths().consecutive(0, font.widths.iter().copied());
    cid.finish();

    let mut descriptor = writer.font_descriptor(refs.descriptor);
    descriptor.name(base_font);
    descriptor.flags(FontFlags::SYMBOLIC);
    descriptor.bbox(font.bbox);
    descriptor.italic_angle(0.0);
    descriptor.ascent(font.ascent);
    descriptor.descent(font.descent);
    descriptor.cap_height(font.cap_height);
    descriptor.stem_v(90.0);
    descriptor.font_file2(refs.data);
    descriptor.finish();

    writer
        .stream(refs.data, font.data.as_slice())
        .pair(Name(b"Length1"), font.data.len() as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn empty_canvas_is_a_single_page_pdf() {
        let canvas = PdfCanvas::new(1920.0, 1080.0);
        let bytes = canvas.finish();

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"MediaBox"));
        assert!(contains(&bytes, b"1920"));
        assert!(contains(&bytes, b"1080"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn stroked_line_lands_in_the_content_stream() {
        let mut canvas = PdfCanvas::new(1920.0, 1080.0);
        canvas.stroke_line((32.0, 32.0), (960.0, 520.0), 6.0, (0.0, 0.0, 0.0));
        let bytes = canvas.finish();

        // The content stream is uncompressed, so the path operators and the
        // y-flipped endpoints are visible in the file.
        assert!(contains(&bytes, b"6 w"));
        assert!(contains(&bytes, b"32 1048 m"));
        assert!(contains(&bytes, b"960 560 l"));
    }

    #[test]
    fn empty_glyph_run_embeds_no_font() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        let font = LoadedFont {
            family: "Nowhere Sans".to_string(),
            path: None,
            index: 0,
            data: Arc::new(Vec::new()),
        };
        canvas.draw_glyphs(&font, 12.0, &[]).unwrap();
        let bytes = canvas.finish();
        assert!(!contains(&bytes, b"Identity-H"));
    }
}
