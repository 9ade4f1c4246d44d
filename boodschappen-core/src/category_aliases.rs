//! Resolve a predicted category name to one of a household's stored categories.
//!
//! Households name their categories freely ("Groente & Fruit", "AGF", ...), so
//! a predicted canonical name is matched in three tiers: exact name, known
//! aliases of the canonical name, then a normalized comparison.

use regex::Regex;
use std::sync::LazyLock;

use crate::category_predictor::FALLBACK_CATEGORY;

/// Canonical category name -> textual variants seen in household tables.
const CATEGORY_ALIASES: &[(&str, &[&str])] = &[
    (
        "Fruit & Groente",
        &[
            "Groente & Fruit",
            "Fruit en Groente",
            "Groente en Fruit",
            "Groenten & Fruit",
            "Fruit & Groenten",
            "AGF",
            "Groente",
            "Fruit",
        ],
    ),
    (
        "Vlees & Vis",
        &[
            "Vis & Vlees",
            "Vlees en Vis",
            "Vlees, Vis & Vega",
            "Vlees, Vis en Vegetarisch",
            "Vlees",
            "Vis",
        ],
    ),
    (
        "Zuivel & Eieren",
        &[
            "Zuivel",
            "Eieren & Zuivel",
            "Zuivel en Eieren",
            "Zuivel, Boter & Eieren",
            "Kaas & Zuivel",
            "Zuivel & Kaas",
        ],
    ),
    (
        "Brood & Bakkerij",
        &[
            "Bakkerij & Brood",
            "Brood",
            "Bakkerij",
            "Brood & Gebak",
            "Brood en Banket",
        ],
    ),
    (
        "Ontbijt & Beleg",
        &[
            "Beleg & Ontbijt",
            "Broodbeleg",
            "Beleg",
            "Ontbijt",
            "Ontbijtgranen & Beleg",
        ],
    ),
    (
        "Pasta, Rijst & Wereldkeuken",
        &[
            "Pasta & Rijst",
            "Pasta, Rijst en Wereldkeuken",
            "Wereldkeuken",
            "Pasta",
            "Rijst & Pasta",
        ],
    ),
    (
        "Conserven & Soepen",
        &["Soepen & Conserven", "Conserven", "Soep", "Blik & Pot"],
    ),
    (
        "Sauzen & Kruiden",
        &[
            "Kruiden & Sauzen",
            "Sauzen, Kruiden & Olie",
            "Kruiden & Specerijen",
            "Sauzen",
            "Kruiden",
        ],
    ),
    ("Bakproducten", &["Bakken", "Bakartikelen", "Bakken & Koken"]),
    (
        "Snoep & Snacks",
        &[
            "Snacks & Snoep",
            "Chips, Noten & Zoutjes",
            "Koek & Snoep",
            "Snoep",
            "Snacks",
        ],
    ),
    (
        "Dranken",
        &["Drinken", "Frisdrank & Sappen", "Koffie & Thee", "Bier & Wijn"],
    ),
    ("Diepvries", &["Vriezer", "Bevroren", "Diepvriesproducten"]),
    (
        "Huishouden",
        &["Huishoudelijk", "Schoonmaak", "Schoonmaakmiddelen", "Was & Schoonmaak"],
    ),
    (
        "Verzorging",
        &["Drogisterij", "Persoonlijke Verzorging", "Verzorging & Hygiëne"],
    ),
    ("Baby", &["Baby & Kind", "Babyproducten"]),
    ("Huisdieren", &["Dieren", "Dierenvoeding", "Huisdier"]),
    ("Overig", &["Overige", "Overig & Diversen", "Diversen", "Overigen"]),
];

static COMMA_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("Invalid comma regex"));

static AMPERSAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*&\s*").expect("Invalid ampersand regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Known aliases for a canonical category name. Empty for unknown names.
pub fn aliases_for(canonical: &str) -> &'static [&'static str] {
    CATEGORY_ALIASES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Canonical names that have an alias entry.
pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    CATEGORY_ALIASES.iter().map(|(name, _)| *name)
}

/// Normalize a category name for loose comparison: lowercase, commas become
/// spaces, "&" becomes "en", whitespace collapsed. Idempotent.
pub fn normalize_category_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let without_commas = COMMA_SEPARATOR.replace_all(lower.trim(), " ");
    let with_en = AMPERSAND.replace_all(&without_commas, " en ");
    WHITESPACE_RUN
        .replace_all(&with_en, " ")
        .trim()
        .to_string()
}

/// Find the id of the stored category matching `predicted`.
///
/// Tiers, first hit wins: exact name, alias of the canonical name, normalized
/// name. `None` when nothing matches.
pub fn resolve_category_id<'a, Id, S>(predicted: &str, categories: &'a [(Id, S)]) -> Option<&'a Id>
where
    S: AsRef<str>,
{
    if let Some((id, _)) = categories
        .iter()
        .find(|(_, name)| name.as_ref() == predicted)
    {
        return Some(id);
    }

    for alias in aliases_for(predicted) {
        if let Some((id, _)) = categories.iter().find(|(_, name)| name.as_ref() == *alias) {
            tracing::debug!(predicted, alias, "category resolved via alias");
            return Some(id);
        }
    }

    let wanted = normalize_category_name(predicted);
    let found = categories
        .iter()
        .find(|(_, name)| normalize_category_name(name.as_ref()) == wanted)
        .map(|(id, _)| id);
    if found.is_none() {
        tracing::debug!(predicted, "no stored category matches prediction");
    }
    found
}

/// Resolve `predicted`, falling back to the household's catch-all category.
pub fn resolve_category_with_fallback<'a, Id, S>(
    predicted: &str,
    categories: &'a [(Id, S)],
) -> Option<&'a Id>
where
    S: AsRef<str>,
{
    resolve_category_id(predicted, categories)
        .or_else(|| resolve_category_id(FALLBACK_CATEGORY, categories))
}
