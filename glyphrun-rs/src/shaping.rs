//! Text shaping and glyph positioning.
//!
//! Shaping converts a string into glyph identifiers with relative offsets
//! and advances, in font design units. [`layout_run`] then accumulates
//! those into absolute canvas positions: an offset displaces a single
//! glyph without moving the pen, while an advance moves the pen for every
//! glyph that follows.

use rustybuzz::{GlyphBuffer, UnicodeBuffer};

use crate::error::{GlyphrunError, GlyphrunResult};
use crate::fonts::LoadedFont;

/// Text direction for shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl From<Direction> for rustybuzz::Direction {
    fn from(direction: Direction) -> rustybuzz::Direction {
        match direction {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
            Direction::TopToBottom => rustybuzz::Direction::TopToBottom,
            Direction::BottomToTop => rustybuzz::Direction::BottomToTop,
        }
    }
}

/// One glyph produced by shaping, in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph identifier in the face, not a character code point.
    pub glyph_id: u32,
    /// Byte index of the start of the source cluster in the shaped string.
    pub cluster: u32,
    /// How much the pen advances horizontally after this glyph.
    pub x_advance: i32,
    /// How much the pen advances vertically after this glyph.
    pub y_advance: i32,
    /// Horizontal displacement of this glyph only; does not move the pen.
    pub x_offset: i32,
    /// Vertical displacement of this glyph only; does not move the pen.
    pub y_offset: i32,
}

/// The result of shaping one string with one face.
#[derive(Debug, Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
    /// Design units per em of the face that shaped the run. Needed to
    /// scale advances and offsets to a point size.
    pub units_per_em: u16,
}

/// A glyph at an absolute canvas position, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub glyph_id: u32,
    /// Horizontal position in points, from the left edge of the page.
    pub x: f64,
    /// Baseline position in points, from the top edge of the page.
    pub y: f64,
}

/// Shape `text` with the given face and direction.
pub fn shape(font: &LoadedFont, text: &str, direction: Direction) -> GlyphrunResult<ShapedRun> {
    let face = rustybuzz::Face::from_slice(&font.data, font.index).ok_or_else(|| {
        GlyphrunError::Shaping(format!("face `{}` is not shapeable", font.family))
    })?;

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.set_direction(direction.into());

    let glyphs = rustybuzz::shape(&face, &[], buffer);
    log::debug!("shaped {:?} into {} glyphs", text, glyphs.len());

    let units_per_em = font.face()?.units_per_em();
    Ok(ShapedRun {
        glyphs: collect_glyphs(&glyphs),
        units_per_em,
    })
}

fn collect_glyphs(buffer: &GlyphBuffer) -> Vec<ShapedGlyph> {
    buffer
        .glyph_infos()
        .iter()
        .zip(buffer.glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id,
            cluster: info.cluster,
            x_advance: pos.x_advance,
            y_advance: pos.y_advance,
            x_offset: pos.x_offset,
            y_offset: pos.y_offset,
        })
        .collect()
}

/// Accumulate a shaped run into absolute glyph positions.
///
/// `origin` is the pen start (baseline, top-left-origin canvas space) and
/// `font_size` the point size. Shaping output has y growing up, the canvas
/// has y growing down, so vertical offsets and advances are negated here.
pub fn layout_run(origin: (f64, f64), font_size: f64, run: &ShapedRun) -> Vec<PositionedGlyph> {
    let scale = font_size / f64::from(run.units_per_em);
    let (mut pen_x, mut pen_y) = origin;
    let mut positioned = Vec::with_capacity(run.glyphs.len());

    for glyph in &run.glyphs {
        positioned.push(PositionedGlyph {
            glyph_id: glyph.glyph_id,
            x: pen_x + f64::from(glyph.x_offset) * scale,
            y: pen_y - f64::from(glyph.y_offset) * scale,
        });
        pen_x += f64::from(glyph.x_advance) * scale;
        pen_y -= f64::from(glyph.y_advance) * scale;
    }

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(glyphs: Vec<ShapedGlyph>) -> ShapedRun {
        ShapedRun {
            glyphs,
            units_per_em: 1000,
        }
    }

    fn glyph(glyph_id: u32, x_advance: i32) -> ShapedGlyph {
        ShapedGlyph {
            glyph_id,
            cluster: 0,
            x_advance,
            y_advance: 0,
            x_offset: 0,
            y_offset: 0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn advances_accumulate_into_pen_position() {
        let run = run(vec![glyph(1, 500), glyph(2, 250), glyph(3, 250)]);
        let positioned = layout_run((100.0, 200.0), 10.0, &run);

        // units_per_em is 1000, so at 10pt one design unit is 0.01pt.
        assert_close(positioned[0].x, 100.0);
        assert_close(positioned[1].x, 105.0);
        assert_close(positioned[2].x, 107.5);
        for g in &positioned {
            assert_close(g.y, 200.0);
        }
    }

    #[test]
    fn offsets_displace_without_moving_the_pen() {
        let mut displaced = glyph(2, 500);
        displaced.x_offset = 30;
        displaced.y_offset = 40;
        let run = run(vec![glyph(1, 500), displaced, glyph(3, 500)]);
        let positioned = layout_run((0.0, 0.0), 10.0, &run);

        assert_close(positioned[1].x, 5.3);
        assert_close(positioned[1].y, -0.4);
        // The third glyph only sees the accumulated advances.
        assert_close(positioned[2].x, 10.0);
        assert_close(positioned[2].y, 0.0);
    }

    #[test]
    fn vertical_advances_move_the_pen_up_the_canvas() {
        let mut vertical = glyph(1, 0);
        vertical.y_advance = 1000;
        let run = run(vec![vertical, glyph(2, 0)]);
        let positioned = layout_run((0.0, 100.0), 20.0, &run);

        assert_close(positioned[0].y, 100.0);
        // Positive shaping y moves up, which is down in page coordinates.
        assert_close(positioned[1].y, 80.0);
    }

    #[test]
    fn empty_run_positions_nothing() {
        let run = run(Vec::new());
        assert!(layout_run((0.0, 0.0), 12.0, &run).is_empty());
    }
}
