//! Emoji preselection for products.
//!
//! The picker table maps product names to emoji. Lookups try an exact name
//! first and then the singular/plural counterpart.

use serde::Deserialize;

use crate::error::CatalogError;
use crate::matching::is_plural_pair;

/// Name fragments that force an emoji regardless of category or table lookups.
const EMOJI_OVERRIDES: &[(&str, &str)] = &[("kaas", "🧀")];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmojiEntry {
    pub name: String,
    pub emoji: String,
}

impl EmojiEntry {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
        }
    }
}

/// The raw JSON structure for the emoji picker data file.
#[derive(Deserialize)]
struct EmojiPickerData {
    entries: Vec<EmojiEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct EmojiPicker {
    entries: Vec<EmojiEntry>,
}

impl EmojiPicker {
    /// Build a picker. Entries with a blank name or emoji are dropped.
    pub fn new(entries: Vec<EmojiEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| EmojiEntry {
                name: entry.name.trim().to_lowercase(),
                emoji: entry.emoji.trim().to_string(),
            })
            .filter(|entry| !entry.name.is_empty() && !entry.emoji.is_empty())
            .collect();
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: EmojiPickerData = serde_json::from_str(json)?;
        Ok(Self::new(data.entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an emoji by product name, case-insensitively.
    /// An exact hit anywhere in the table beats a singular/plural hit.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| is_plural_pair(&entry.name, &name))
            })
            .map(|entry| entry.emoji.as_str())
    }
}

/// Emoji forced by a fragment of the (lowercased) product name.
pub(crate) fn override_emoji(name: &str) -> Option<&'static str> {
    EMOJI_OVERRIDES
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, emoji)| *emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> EmojiPicker {
        EmojiPicker::new(vec![
            EmojiEntry::new("Appel", "🍎"),
            EmojiEntry::new("appels", "🍏"),
            EmojiEntry::new("kers", "🍒"),
        ])
    }

    #[test]
    fn test_exact_lookup_is_case_insensitive() {
        assert_eq!(picker().lookup("APPEL"), Some("🍎"));
    }

    #[test]
    fn test_exact_beats_plural() {
        assert_eq!(picker().lookup("appels"), Some("🍏"));
    }

    #[test]
    fn test_plural_lookup() {
        assert_eq!(picker().lookup("kersen"), Some("🍒"));
    }

    #[test]
    fn test_missing() {
        assert_eq!(picker().lookup("banaan"), None);
        assert_eq!(picker().lookup(""), None);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let picker = EmojiPicker::new(vec![
            EmojiEntry::new("cola", ""),
            EmojiEntry::new("   ", "🍎"),
            EmojiEntry::new("melk", " 🥛 "),
        ]);
        assert_eq!(picker.len(), 1);
        assert_eq!(picker.lookup("cola"), None);
        assert_eq!(picker.lookup("melk"), Some("🥛"));
    }

    #[test]
    fn test_override() {
        assert_eq!(override_emoji("geitenkaas"), Some("🧀"));
        assert_eq!(override_emoji("melk"), None);
    }
}
