//! Category and emoji prediction for free-text product names.
//!
//! Concepts are tried in declaration order and the first concept with a
//! matching term wins, so the order of `data/category_concepts.json` is the
//! tie-break between categories that share vocabulary. The default tables are
//! embedded at compile time.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::emoji_picker::{override_emoji, EmojiPicker};
use crate::error::CatalogError;
use crate::matching::is_plural_pair;

/// Category returned when no concept matches.
pub const FALLBACK_CATEGORY: &str = "Overig";

/// Emoji returned when nothing more specific is known.
pub const FALLBACK_EMOJI: &str = "📦";

/// A category together with the ordered terms that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryConcept {
    pub category: String,
    /// Default emoji for products in this category.
    #[serde(default)]
    pub emoji: String,
    pub terms: Vec<String>,
}

impl CategoryConcept {
    pub fn new(category: impl Into<String>, emoji: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            category: category.into(),
            emoji: emoji.into(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// First term (in declaration order) that matches an already-normalized
    /// name. `words` holds the compiled whole-word pattern of each term.
    fn matching_term<'a>(&'a self, words: &[Regex], name: &str) -> Option<&'a str> {
        self.terms
            .iter()
            .zip(words)
            .find(|(term, word)| term_matches(name, term, word))
            .map(|(term, _)| term.as_str())
    }
}

fn term_matches(name: &str, term: &str, word: &Regex) -> bool {
    name == term || word.is_match(name) || is_plural_pair(name, term)
}

fn whole_word_pattern(term: &str) -> Result<Regex, CatalogError> {
    Regex::new(&format!(r"\b{}\b", regex::escape(term))).map_err(|source| {
        CatalogError::InvalidTerm {
            term: term.to_string(),
            source,
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub category_name: String,
    pub emoji: String,
}

impl Prediction {
    fn new(category_name: &str, emoji: &str) -> Self {
        Self {
            category_name: category_name.to_string(),
            emoji: emoji.to_string(),
        }
    }
}

/// The raw JSON structure for the concepts data file.
#[derive(Deserialize)]
struct ConceptsData {
    concepts: Vec<CategoryConcept>,
}

/// Immutable prediction tables. Cheap to share between threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    concepts: Vec<CategoryConcept>,
    /// Per concept, one `\b`-delimited pattern per term, in term order.
    word_patterns: Vec<Vec<Regex>>,
    emoji_picker: EmojiPicker,
}

impl Classifier {
    pub fn new(
        concepts: Vec<CategoryConcept>,
        emoji_picker: EmojiPicker,
    ) -> Result<Self, CatalogError> {
        let concepts = concepts
            .into_iter()
            .map(|concept| {
                let terms: Vec<String> = concept
                    .terms
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
                if terms.is_empty() {
                    return Err(CatalogError::EmptyConcept(concept.category));
                }
                Ok(CategoryConcept { terms, ..concept })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let word_patterns = concepts
            .iter()
            .map(|concept| {
                concept
                    .terms
                    .iter()
                    .map(|term| whole_word_pattern(term))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            concepts,
            word_patterns,
            emoji_picker,
        })
    }

    pub fn from_json(concepts_json: &str, emoji_json: &str) -> Result<Self, CatalogError> {
        let data: ConceptsData = serde_json::from_str(concepts_json)?;
        Self::new(data.concepts, EmojiPicker::from_json(emoji_json)?)
    }

    pub fn concepts(&self) -> &[CategoryConcept] {
        &self.concepts
    }

    pub fn emoji_picker(&self) -> &EmojiPicker {
        &self.emoji_picker
    }

    /// First concept with a matching term, along with the term that matched.
    pub fn find_concept(&self, product_name: &str) -> Option<(&CategoryConcept, &str)> {
        let name = product_name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }

        self.concepts
            .iter()
            .zip(&self.word_patterns)
            .find_map(|(concept, words)| {
                concept
                    .matching_term(words, &name)
                    .map(|term| (concept, term))
            })
    }

    /// Predict a category name and emoji. Always returns a result.
    pub fn predict(&self, product_name: &str) -> Prediction {
        let name = product_name.trim().to_lowercase();

        let Some((concept, term)) = self.find_concept(&name) else {
            let emoji = override_emoji(&name)
                .or_else(|| self.emoji_picker.lookup(&name))
                .unwrap_or(FALLBACK_EMOJI);
            tracing::debug!(product = %name, "no category concept matched");
            return Prediction::new(FALLBACK_CATEGORY, emoji);
        };

        let emoji = override_emoji(&name)
            .or_else(|| self.emoji_picker.lookup(&name))
            .or_else(|| self.emoji_picker.lookup(term))
            .or_else(|| Some(concept.emoji.as_str()).filter(|e| !e.is_empty()))
            .unwrap_or(FALLBACK_EMOJI);

        tracing::debug!(
            product = %name,
            category = %concept.category,
            term,
            emoji,
            "predicted category"
        );
        Prediction::new(&concept.category, emoji)
    }
}

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(|| {
    Classifier::from_json(
        include_str!("../../data/category_concepts.json"),
        include_str!("../../data/emoji_picker.json"),
    )
    .expect("Failed to parse embedded classifier tables")
});

/// Classifier built from the embedded tables.
pub fn default_classifier() -> &'static Classifier {
    &DEFAULT_CLASSIFIER
}

/// Predict category and emoji using the embedded tables.
pub fn predict_category_emoji(product_name: &str) -> Prediction {
    DEFAULT_CLASSIFIER.predict(product_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji_picker::EmojiEntry;

    fn classifier(concepts: Vec<CategoryConcept>) -> Classifier {
        Classifier::new(concepts, EmojiPicker::default()).unwrap()
    }

    #[test]
    fn test_earlier_concept_wins() {
        let c = classifier(vec![
            CategoryConcept::new("Eerste", "1️⃣", &["appel"]),
            CategoryConcept::new("Tweede", "2️⃣", &["appel", "peer"]),
        ]);
        assert_eq!(c.predict("appel").category_name, "Eerste");
        assert_eq!(c.predict("peer").category_name, "Tweede");
    }

    #[test]
    fn test_terms_are_lowercased() {
        let c = classifier(vec![CategoryConcept::new("Dranken", "🥤", &[" Cola "])]);
        assert_eq!(c.predict("COLA").category_name, "Dranken");
    }

    #[test]
    fn test_empty_concept_rejected() {
        let err = Classifier::new(
            vec![CategoryConcept::new("Leeg", "", &["  "])],
            EmojiPicker::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyConcept(name) if name == "Leeg"));
    }

    #[test]
    fn test_concept_emoji_then_fallback() {
        let c = classifier(vec![
            CategoryConcept::new("Met", "🥦", &["andijvie"]),
            CategoryConcept::new("Zonder", "", &["prei"]),
        ]);
        assert_eq!(c.predict("andijvie").emoji, "🥦");
        assert_eq!(c.predict("prei").emoji, FALLBACK_EMOJI);
    }

    #[test]
    fn test_whole_word_terms() {
        let c = classifier(vec![
            CategoryConcept::new("Groente", "🥦", &["ui"]),
            CategoryConcept::new("Dranken", "🥤", &["sap", "cola"]),
            CategoryConcept::new("Snacks", "🥜", &["pinda"]),
        ]);
        assert_eq!(c.predict("rode ui").category_name, "Groente");
        assert_eq!(c.predict("vers sap").category_name, "Dranken");
        assert_eq!(c.predict("sapje sap").category_name, "Dranken");
        assert_eq!(c.predict("pinda's").category_name, "Snacks");
        assert_eq!(c.predict("uitjes").category_name, FALLBACK_CATEGORY);
        assert_eq!(c.predict("sinaasappel").category_name, FALLBACK_CATEGORY);
        assert_eq!(c.predict("colablikjes").category_name, FALLBACK_CATEGORY);
        assert_eq!(c.predict("ésap").category_name, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_word_boundary_follows_unicode_word_chars() {
        let c = classifier(vec![
            CategoryConcept::new("Koffie", "☕", &["cafe"]),
            CategoryConcept::new("Thee", "🍵", &["thee"]),
        ]);
        // combining accent and zero-width joiner are word characters
        assert_eq!(c.predict("cafe\u{301} noir").category_name, FALLBACK_CATEGORY);
        assert_eq!(c.predict("thee\u{200d}x").category_name, FALLBACK_CATEGORY);
        assert_eq!(c.predict("cafe noir").category_name, "Koffie");
    }

    #[test]
    fn test_terms_with_regex_metacharacters() {
        let c = classifier(vec![CategoryConcept::new("Snoep", "🍬", &["m&m's", "(mini)"])]);
        assert_eq!(c.predict("zak m&m's").category_name, "Snoep");
        assert_eq!(c.predict("minis").category_name, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_blank_picker_emoji_falls_through() {
        let c = Classifier::new(
            vec![CategoryConcept::new("Dranken", "🥤", &["cola"])],
            EmojiPicker::new(vec![EmojiEntry::new("cola", "")]),
        )
        .unwrap();
        assert_eq!(c.predict("cola").emoji, "🥤");
    }

    #[test]
    fn test_default_tables_load() {
        let c = default_classifier();
        assert!(!c.concepts().is_empty());
        assert!(!c.emoji_picker().is_empty());
    }

    #[test]
    fn test_blank_input() {
        let p = predict_category_emoji("   ");
        assert_eq!(p.category_name, FALLBACK_CATEGORY);
        assert_eq!(p.emoji, FALLBACK_EMOJI);
    }
}
