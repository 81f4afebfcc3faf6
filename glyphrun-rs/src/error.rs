//! Error types for glyphrun-rs.

use thiserror::Error;

/// Result type alias using GlyphrunError.
pub type GlyphrunResult<T> = Result<T, GlyphrunError>;

/// Errors that can occur while matching fonts, shaping text, or drawing.
#[derive(Debug, Error)]
pub enum GlyphrunError {
    /// No installed face satisfies the font query.
    #[error("No font found for query: {0}")]
    FontMatch(String),

    /// A matched face could not be read or parsed.
    #[error("Failed to load font `{family}`: {reason}")]
    FontLoad { family: String, reason: String },

    /// Failed to parse a Fontconfig-style query string.
    #[error("Failed to parse font query: {0}")]
    QueryParse(String),

    /// The shaping engine rejected the face.
    #[error("Shaping error: {0}")]
    Shaping(String),

    /// A drawing operation could not be encoded into the page.
    #[error("Draw error: {0}")]
    Draw(String),
}
