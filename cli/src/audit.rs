//! Classify a list of product names and write the result as CSV.

use anyhow::{Context, Result};
use boodschappen_core::{is_fruit, Classifier};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// One classified product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    pub name: String,
    pub category: String,
    pub emoji: String,
    pub fruit: bool,
}

/// Classify every distinct non-empty line of `input`, sorted by name.
pub fn classify_lines(classifier: &Classifier, input: &str) -> Vec<AuditRow> {
    let names: BTreeMap<String, ()> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| (line.to_string(), ()))
        .collect();

    names
        .into_keys()
        .map(|name| {
            let prediction = classifier.predict(&name);
            AuditRow {
                fruit: is_fruit(&name),
                category: prediction.category_name,
                emoji: prediction.emoji,
                name,
            }
        })
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_csv(rows: &[AuditRow], out: &mut impl Write) -> Result<()> {
    writeln!(out, "product,category,emoji,fruit")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&row.name),
            csv_field(&row.category),
            row.emoji,
            row.fruit
        )?;
    }
    Ok(())
}

/// Product count per category, alphabetically.
pub fn summarize(rows: &[AuditRow]) -> BTreeMap<&str, usize> {
    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *by_category.entry(row.category.as_str()).or_default() += 1;
    }
    by_category
}

pub fn run(classifier: &Classifier, input: &Path, output: &Path) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let rows = classify_lines(classifier, &content);

    let mut output_file = fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_csv(&rows, &mut output_file)?;

    println!("Classified {} products to {}", rows.len(), output.display());
    println!("\nCategories:");
    for (category, count) in summarize(&rows) {
        println!("  {}: {}", category, count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boodschappen_core::default_classifier;

    #[test]
    fn test_classify_lines_dedups_and_skips_comments() {
        let rows = classify_lines(
            default_classifier(),
            "# weekly list\nappels\n\n  appels  \ngeitenkaas\n",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "appels");
        assert_eq!(rows[0].category, "Fruit & Groente");
        assert!(rows[0].fruit);
        assert_eq!(rows[1].category, "Overig");
        assert_eq!(rows[1].emoji, "🧀");
    }

    #[test]
    fn test_csv_escaping() {
        let rows = vec![AuditRow {
            name: "pasta, volkoren".to_string(),
            category: "Pasta, Rijst & Wereldkeuken".to_string(),
            emoji: "🍝".to_string(),
            fruit: false,
        }];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert_eq!(
            csv,
            "product,category,emoji,fruit\n\"pasta, volkoren\",\"Pasta, Rijst & Wereldkeuken\",🍝,false\n"
        );
    }

    #[test]
    fn test_summary_counts() {
        let rows = classify_lines(default_classifier(), "melk\nkaas\ncola\n");
        let summary = summarize(&rows);
        assert_eq!(summary.get("Zuivel & Eieren"), Some(&2));
        assert_eq!(summary.get("Dranken"), Some(&1));
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.txt");
        let output = dir.path().join("audit.csv");
        fs::write(&input, "bananen\nwortel\n").unwrap();

        run(default_classifier(), &input, &output).unwrap();

        let csv = fs::read_to_string(&output).unwrap();
        assert!(csv.contains("bananen,Fruit & Groente,🍌,true"));
        assert!(csv.contains("wortel,Fruit & Groente,🥕,false"));
    }
}
