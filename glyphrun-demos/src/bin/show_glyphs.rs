//! Draws a line and two hand-placed glyphs into a single-page PDF.
//!
//! The font comes from the host system: the "Cantarell" family is matched
//! with fallback, the face is loaded, and the glyph identifiers for 'h'
//! and 'i' are read from its character map. Positions and point size are
//! fixed.

use anyhow::{Context, Error};
use glyphrun_rs::shaping::PositionedGlyph;
use glyphrun_rs::{FontLibrary, FontQuery, PdfCanvas};

const OUTPUT: &str = "glyphs.pdf";
const PAGE_WIDTH: f64 = 1920.0;
const PAGE_HEIGHT: f64 = 1080.0;
const FONT_QUERY: &str = "Cantarell";
const FONT_SIZE: f64 = 64.0;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut canvas = PdfCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
    canvas.stroke_line((32.0, 32.0), (960.0, 520.0), 6.0, (0.0, 0.0, 0.0));

    let library = FontLibrary::from_system();
    let font = library.lookup(&FontQuery::parse(FONT_QUERY)?)?;
    match &font.path {
        Some(path) => println!("Font: {}", path.display()),
        None => println!("Font: {}", font.family),
    }

    let face = font.face()?;
    let glyphs = [('h', 128.0), ('i', 192.0)]
        .into_iter()
        .map(|(ch, x)| {
            let id = face
                .glyph_index(ch)
                .with_context(|| format!("font `{}` has no glyph for {ch:?}", font.family))?;
            Ok(PositionedGlyph {
                glyph_id: u32::from(id.0),
                x,
                y: 256.0,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    canvas.draw_glyphs(&font, FONT_SIZE, &glyphs)?;
    std::fs::write(OUTPUT, canvas.finish())?;

    log::info!("wrote {OUTPUT}");
    Ok(())
}
