//! Draws one diagonal line into a single-page PDF.

use anyhow::Error;
use glyphrun_rs::PdfCanvas;

const OUTPUT: &str = "line.pdf";
const PAGE_WIDTH: f64 = 1920.0;
const PAGE_HEIGHT: f64 = 1080.0;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut canvas = PdfCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
    canvas.stroke_line((32.0, 32.0), (960.0, 520.0), 6.0, (0.0, 0.0, 0.0));
    std::fs::write(OUTPUT, canvas.finish())?;

    log::info!("wrote {OUTPUT}");
    Ok(())
}
