//! Font lookup, text shaping, and PDF page drawing.
//!
//! This crate backs the `glyphrun-demos` binaries. It resolves font family
//! queries against the host's installed fonts (`fontdb`), shapes text into
//! positioned glyphs (`rustybuzz`), and draws stroked lines and glyph runs
//! into a single-page PDF document (`pdf-writer`).
//!
//! The `ast` module is unrelated to drawing: it holds the node shapes of a
//! sketched expression language that has no parser or evaluator yet.

pub mod ast;
pub mod error;
pub mod fonts;
pub mod pdf;
pub mod shaping;

pub use error::{GlyphrunError, GlyphrunResult};
pub use fonts::{FontLibrary, FontQuery, LoadedFont};
pub use pdf::PdfCanvas;
pub use shaping::{layout_run, shape, Direction, PositionedGlyph, ShapedGlyph, ShapedRun};
