//! Draws a line and a shaped text run into a single-page PDF.
//!
//! Unlike `show_glyphs`, the glyph identifiers and positions come from the
//! shaping engine: the fixed string is shaped into glyphs with relative
//! offsets and advances, which are accumulated into absolute pen positions
//! before drawing. A fixed glyph capacity bounds the run.

use anyhow::{bail, Error};
use glyphrun_rs::{layout_run, shape, Direction, FontLibrary, FontQuery, PdfCanvas};

const OUTPUT: &str = "shaped.pdf";
const PAGE_WIDTH: f64 = 1920.0;
const PAGE_HEIGHT: f64 = 1080.0;
const FONT_QUERY: &str = "Cantarell";
const FONT_SIZE: f64 = 64.0;
const TEXT: &str = "Difficult waffles";
const MAX_GLYPHS: usize = 32;

fn ensure_capacity(glyph_count: usize) -> Result<(), Error> {
    if glyph_count > MAX_GLYPHS {
        bail!("shaping produced {glyph_count} glyphs, but only {MAX_GLYPHS} slots are available");
    }
    Ok(())
}

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

    let run = shape(&font, TEXT, Direction::LeftToRight)?;
    ensure_capacity(run.glyphs.len())?;

    let glyphs = layout_run((128.0, 256.0), FONT_SIZE, &run);
    canvas.draw_glyphs(&font, FONT_SIZE, &glyphs)?;
    std::fs::write(OUTPUT, canvas.finish())?;

    log::info!("wrote {OUTPUT}");
    Ok(())
}
