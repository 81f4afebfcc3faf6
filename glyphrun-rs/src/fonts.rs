//! Font lookup against the host's installed fonts.
//!
//! Queries use the Fontconfig-style string form the original tooling used
//! ("Cantarell", "Cantarell:bold", "Cantarell:bold:italic"). Matching
//! mirrors Fontconfig's default substitution: if the requested family is
//! not installed, the database's sans-serif family is tried, and failing
//! that any installed face is returned. Only an empty database is a hard
//! error.

use std::path::PathBuf;
use std::sync::Arc;

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use ttf_parser::Face;

use crate::error::{GlyphrunError, GlyphrunResult};

/// A parsed font query: family name plus optional style modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct FontQuery {
    /// Requested font family, e.g. "Cantarell".
    pub family: String,
    /// Font weight (normal unless the query says "bold").
    pub weight: Weight,
    /// Font style (normal unless the query says "italic" or "oblique").
    pub style: Style,
}

impl FontQuery {
    /// Parse a query of the form `family[:modifier]*`.
    ///
    /// Recognized modifiers are `bold`, `regular`, `italic`, and `oblique`.
    /// Anything else is rejected rather than silently ignored.
    pub fn parse(query: &str) -> GlyphrunResult<FontQuery> {
        let mut parts = query.split(':');
        let family = parts.next().unwrap_or_default().trim();
        if family.is_empty() {
            return Err(GlyphrunError::QueryParse(format!(
                "missing family name in `{query}`"
            )));
        }

        let mut weight = Weight::NORMAL;
        let mut style = Style::Normal;
        for part in parts {
            match part.trim().to_ascii_lowercase().as_str() {
                "bold" => weight = Weight::BOLD,
                "regular" | "normal" => weight = Weight::NORMAL,
                "italic" => style = Style::Italic,
                "oblique" => style = Style::Oblique,
                other => {
                    return Err(GlyphrunError::QueryParse(format!(
                        "unknown modifier `{other}` in `{query}`"
                    )))
                }
            }
        }

        Ok(FontQuery {
            family: family.to_string(),
            weight,
            style,
        })
    }
}

/// A face matched by [`FontLibrary::lookup`], with its raw file data loaded.
///
/// The data is Arc-shared so the shaping and PDF layers can both hold on to
/// it without copying the font file again.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Family name reported by the matched face.
    pub family: String,
    /// Path of the font file the face came from, if it came from a file.
    pub path: Option<PathBuf>,
    /// Index of the face within the file (for font collections).
    pub index: u32,
    /// Raw font file bytes.
    pub data: Arc<Vec<u8>>,
}

impl LoadedFont {
    /// Parse the face for metrics and character-map lookups.
    pub fn face(&self) -> GlyphrunResult<Face<'_>> {
        Face::parse(&self.data, self.index).map_err(|err| GlyphrunError::FontLoad {
            family: self.family.clone(),
            reason: err.to_string(),
        })
    }
}

/// A database of installed fonts that can resolve [`FontQuery`] values.
pub struct FontLibrary {
    db: Database,
}

impl FontLibrary {
    /// Build a library from the operating system's installed fonts.
    pub fn from_system() -> FontLibrary {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} font faces from the system", db.len());
        FontLibrary { db }
    }

    /// An empty library. Useful for tests and for registering fonts by hand.
    pub fn empty() -> FontLibrary {
        FontLibrary {
            db: Database::new(),
        }
    }

    /// Register a single font file.
    pub fn load_font_file(&mut self, path: impl Into<PathBuf>) -> GlyphrunResult<()> {
        let path = path.into();
        self.db
            .load_font_file(&path)
            .map_err(|err| GlyphrunError::FontLoad {
                family: path.display().to_string(),
                reason: err.to_string(),
            })
    }

    /// Register raw font data (TTF/OTF bytes).
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Whether no faces are registered.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Resolve a query to a concrete face and load its file data.
    ///
    /// Falls back from the requested family to the sans-serif generic
    /// family, then to any installed face, so a resolvable answer comes
    /// back whenever the database is non-empty.
    pub fn lookup(&self, query: &FontQuery) -> GlyphrunResult<LoadedFont> {
        if self.db.is_empty() {
            return Err(GlyphrunError::FontMatch(format!(
                "{}: no fonts are installed",
                query.family
            )));
        }

        let id = self
            .db
            .query(&Query {
                families: &[Family::Name(&query.family)],
                weight: query.weight,
                stretch: Stretch::Normal,
                style: query.style,
            })
            .or_else(|| {
                self.db.query(&Query {
                    families: &[Family::SansSerif],
                    weight: query.weight,
                    stretch: Stretch::Normal,
                    style: query.style,
                })
            })
            .or_else(|| self.db.faces().next().map(|info| info.id));

        let Some(id) = id else {
            return Err(GlyphrunError::FontMatch(query.family.clone()));
        };

        let info = self
            .db
            .face(id)
            .ok_or_else(|| GlyphrunError::FontMatch(query.family.clone()))?;

        let family = info
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| query.family.clone());
        let path = match &info.source {
            Source::File(path) | Source::SharedFile(path, _) => Some(path.clone()),
            _ => None,
        };
        let index = info.index;

        let data = self
            .db
            .with_face_data(id, |data, _| Arc::new(data.to_vec()))
            .ok_or_else(|| GlyphrunError::FontLoad {
                family: family.clone(),
                reason: "face data is unavailable".to_string(),
            })?;

        match &path {
            Some(path) => log::debug!("matched `{}` to {}", query.family, path.display()),
            None => log::debug!("matched `{}` to in-memory face `{}`", query.family, family),
        }

        Ok(LoadedFont {
            family,
            path,
            index,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_family() {
        let query = FontQuery::parse("Cantarell").unwrap();
        assert_eq!(query.family, "Cantarell");
        assert_eq!(query.weight, Weight::NORMAL);
        assert_eq!(query.style, Style::Normal);
    }

    #[test]
    fn parse_bold_italic_modifiers() {
        let query = FontQuery::parse("Cantarell:bold:italic").unwrap();
        assert_eq!(query.family, "Cantarell");
        assert_eq!(query.weight, Weight::BOLD);
        assert_eq!(query.style, Style::Italic);
    }

    #[test]
    fn parse_rejects_unknown_modifier() {
        let err = FontQuery::parse("Cantarell:wavy").unwrap_err();
        assert!(matches!(err, GlyphrunError::QueryParse(_)));
    }

    #[test]
    fn parse_rejects_empty_family() {
        assert!(FontQuery::parse("").is_err());
        assert!(FontQuery::parse(":bold").is_err());
    }

    #[test]
    fn lookup_on_empty_library_is_an_error() {
        let library = FontLibrary::empty();
        let query = FontQuery::parse("Cantarell").unwrap();
        let err = library.lookup(&query).unwrap_err();
        assert!(matches!(err, GlyphrunError::FontMatch(_)));
    }

    #[test]
    fn lookup_falls_back_to_any_face() {
        // Whatever fonts the host has (if any), an unknown family must
        // still resolve to something rather than fail.
        let library = FontLibrary::from_system();
        if library.is_empty() {
            return;
        }
        let query = FontQuery::parse("No Such Family 123").unwrap();
        let font = library.lookup(&query).unwrap();
        assert!(!font.data.is_empty());
        assert!(font.face().is_ok());
    }
}
