//! Glyph catalog

use serde::{Deserialize, Serialize};

/// Glyph a sprite is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpriteIcon {
    /// Scales of justice
    Scale,
    /// Judge's gavel
    Gavel,
    /// Bound statute book
    LawBook,
    /// Rolled legal document
    Scroll,
    /// Columned court building
    Courthouse,
}

impl SpriteIcon {
    /// Every glyph, in catalog order
    pub const ALL: [Self; 5] = [
        Self::Scale,
        Self::Gavel,
        Self::LawBook,
        Self::Scroll,
        Self::Courthouse,
    ];

    /// Stable name, usable as an icon-set key
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Gavel => "gavel",
            Self::LawBook => "book-open",
            Self::Scroll => "scroll-text",
            Self::Courthouse => "landmark",
        }
    }

    /// Single character for text-only hosts
    pub const fn fallback_char(self) -> char {
        match self {
            Self::Scale => '⚖',
            Self::Gavel => '⚒',
            Self::LawBook => '§',
            Self::Scroll => '¶',
            Self::Courthouse => '⌂',
        }
    }
}

impl std::fmt::Display for SpriteIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_entries_are_distinct() {
        let names: HashSet<_> = SpriteIcon::ALL.iter().map(|icon| icon.name()).collect();
        let chars: HashSet<_> = SpriteIcon::ALL.iter().map(|icon| icon.fallback_char()).collect();
        assert_eq!(names.len(), SpriteIcon::ALL.len());
        assert_eq!(chars.len(), SpriteIcon::ALL.len());
    }
}
