//! Named bitmap fonts the engine can switch between
//!
//! The registry is immutable while an engine borrows it; fonts are added up
//! front and selected by name or [`FontId`] afterwards.

use pixfont_render::BitmapFont;

use crate::glcd::GLCD;

/// Handle to a registered font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(usize);

impl FontId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    font: BitmapFont,
}

/// Your font shelf: built-in and application bitmap fonts by name
#[derive(Debug, Clone)]
pub struct FontRegistry {
    entries: Vec<Entry>,
    default: FontId,
}

impl FontRegistry {
    /// A registry holding one font, which becomes the default
    pub fn new(name: impl Into<String>, default: BitmapFont) -> Self {
        Self {
            entries: vec![Entry {
                name: name.into(),
                font: default,
            }],
            default: FontId(0),
        }
    }

    /// The built-in fixed-cell font registered as `"glcd"`
    pub fn with_builtins() -> Self {
        Self::new("glcd", GLCD)
    }

    /// Add a font, replacing any font already registered under `name`
    pub fn register(&mut self, name: impl Into<String>, font: BitmapFont) -> FontId {
        let name = name.into();
        if let Some(id) = self.id(&name) {
            log::debug!("Replacing registered font {name:?}");
            self.entries[id.0].font = font;
            return id;
        }
        log::debug!("Registered font {name:?} ({})", pixfont_core::FontFace::kind(&font).name());
        self.entries.push(Entry { name, font });
        FontId(self.entries.len() - 1)
    }

    pub fn id(&self, name: &str) -> Option<FontId> {
        self.entries.iter().position(|e| e.name == name).map(FontId)
    }

    pub fn get(&self, name: &str) -> Option<&BitmapFont> {
        self.id(name).and_then(|id| self.by_id(id))
    }

    pub fn by_id(&self, id: FontId) -> Option<&BitmapFont> {
        self.entries.get(id.0).map(|e| &e.font)
    }

    pub fn name(&self, id: FontId) -> Option<&str> {
        self.entries.get(id.0).map(|e| e.name.as_str())
    }

    /// The font engines fall back to
    pub fn default_font(&self) -> &BitmapFont {
        &self.entries[self.default.0].font
    }

    pub fn default_id(&self) -> FontId {
        self.default
    }

    /// Make another registered font the fallback; false for unknown ids
    pub fn set_default(&mut self, id: FontId) -> bool {
        if id.0 < self.entries.len() {
            self.default = id;
            true
        } else {
            false
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a registry always holds its default font
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
