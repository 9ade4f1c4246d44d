//! Fruit/vegetable split inside "Fruit & Groente".
//!
//! List rendering sorts fruit before vegetables. A token counts as fruit when
//! it equals or starts with a known fruit term, which also catches compounds
//! such as "appeltjes" at the cost of the odd false positive.

const FRUIT_TERMS: &[&str] = &[
    "appel",
    "peer",
    "peren",
    "banaan",
    "bananen",
    "sinaasappel",
    "mandarijn",
    "clementine",
    "citroen",
    "limoen",
    "grapefruit",
    "druif",
    "druiven",
    "aardbei",
    "framboos",
    "frambozen",
    "braam",
    "bramen",
    "bes",
    "bessen",
    "kiwi",
    "mango",
    "ananas",
    "meloen",
    "watermeloen",
    "perzik",
    "nectarine",
    "abrikoos",
    "abrikozen",
    "pruim",
    "kers",
    "kersen",
    "vijg",
    "dadel",
    "granaatappel",
    "passievrucht",
    "lychee",
    "papaja",
    "kokosnoot",
    "fruit",
];

/// True if any whitespace-separated token of the name is a fruit term or
/// starts with one.
pub fn is_fruit(product_name: &str) -> bool {
    let name = product_name.trim().to_lowercase();
    name.split_whitespace().any(|token| {
        FRUIT_TERMS
            .iter()
            .any(|fruit| token == *fruit || token.starts_with(fruit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fruit() {
        assert!(is_fruit("Bananen"));
        assert!(is_fruit("appel"));
        assert!(is_fruit("Elstar appels"));
        assert!(is_fruit("  KIWI  "));
    }

    #[test]
    fn test_vegetables() {
        assert!(!is_fruit("Wortel"));
        assert!(!is_fruit("broccoli"));
        assert!(!is_fruit("rode ui"));
    }

    #[test]
    fn test_empty() {
        assert!(!is_fruit(""));
        assert!(!is_fruit("   "));
    }

    #[test]
    fn test_prefix_heuristic_is_loose() {
        assert!(is_fruit("appeltjes"));
        // known approximation: shares a prefix with "bes"
        assert!(is_fruit("bestek"));
    }
}
