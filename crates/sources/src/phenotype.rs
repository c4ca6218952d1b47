//! JSON-dump-backed phenotype/inheritance catalog.

use crate::error::Result;
use crate::PhenotypeCatalog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One phenotype listed under a gene entry
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Phenotype {
    /// Catalog number of the phenotype entry, when assigned
    #[serde(default)]
    pub phenotype_mim_number: Option<String>,
    /// Free-text phenotype description
    #[serde(default, rename = "phenotype")]
    pub description: String,
    /// Semicolon-delimited inheritance text, verbatim from the catalog
    #[serde(default)]
    pub inheritance: Option<String>,
}

/// One gene entry in the phenotype catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneEntry {
    #[serde(default)]
    pub mim_number: Option<String>,
    /// Comma-separated symbols this entry covers
    #[serde(default)]
    pub gene_symbols: String,
    /// Computed cytogenetic location, e.g. `2q24.3`
    #[serde(default)]
    pub gene_location: Option<String>,
    #[serde(default)]
    pub phenotypes: Vec<Phenotype>,
}

impl GeneEntry {
    fn covers_symbol(&self, symbol: &str) -> bool {
        self.gene_symbols
            .split(',')
            .any(|s| s.trim().eq_ignore_ascii_case(symbol))
    }
}

/// Phenotype catalog backed by a JSON dump: an array of [`GeneEntry`]
/// objects. When several entries match, the first one carrying phenotypes
/// wins; an entry without phenotypes is only returned when no better one
/// exists.
#[derive(Debug, Default)]
pub struct PhenotypeDump {
    entries: Vec<GeneEntry>,
}

impl PhenotypeDump {
    #[must_use]
    pub fn from_entries(entries: Vec<GeneEntry>) -> Self {
        Self { entries }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let entries: Vec<GeneEntry> = serde_json::from_str(&fs::read_to_string(path)?)?;
        log::debug!("Loaded {} phenotype entries", entries.len());
        Ok(Self { entries })
    }

    fn pick<'a>(matches: impl Iterator<Item = &'a GeneEntry>) -> Option<GeneEntry> {
        let matches: Vec<&GeneEntry> = matches.collect();
        matches
            .iter()
            .find(|entry| !entry.phenotypes.is_empty())
            .or_else(|| matches.first())
            .map(|entry| (*entry).clone())
    }
}

impl PhenotypeCatalog for PhenotypeDump {
    fn gene_by_mim(&mut self, mim: &str) -> Result<Option<GeneEntry>> {
        Ok(Self::pick(self.entries.iter().filter(|entry| {
            entry.mim_number.as_deref() == Some(mim)
        })))
    }

    fn gene_by_symbol(&mut self, symbol: &str) -> Result<Option<GeneEntry>> {
        Ok(Self::pick(
            self.entries
                .iter()
                .filter(|entry| entry.covers_symbol(symbol)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneEntry, Phenotype, PhenotypeDump};
    use crate::PhenotypeCatalog;
    use pretty_assertions::assert_eq;

    fn entry(mim: &str, symbols: &str, phenotypes: Vec<Phenotype>) -> GeneEntry {
        GeneEntry {
            mim_number: Some(mim.to_string()),
            gene_symbols: symbols.to_string(),
            gene_location: Some("2q24.3".to_string()),
            phenotypes,
        }
    }

    fn phenotype(mim: &str, inheritance: &str) -> Phenotype {
        Phenotype {
            phenotype_mim_number: Some(mim.to_string()),
            description: "Epileptic encephalopathy".to_string(),
            inheritance: Some(inheritance.to_string()),
        }
    }

    #[test]
    fn entries_with_phenotypes_win() {
        let mut dump = PhenotypeDump::from_entries(vec![
            entry("182389", "SCN1A, SCN1", vec![]),
            entry(
                "182389",
                "SCN1A",
                vec![phenotype("604403", "Autosomal dominant")],
            ),
        ]);

        let hit = dump.gene_by_mim("182389").unwrap().unwrap();
        assert_eq!(hit.phenotypes.len(), 1);
    }

    #[test]
    fn symbol_match_is_case_insensitive_and_list_aware() {
        let mut dump = PhenotypeDump::from_entries(vec![entry("182389", "SCN1A, SCN1", vec![])]);
        assert!(dump.gene_by_symbol("scn1").unwrap().is_some());
        assert!(dump.gene_by_symbol("SCN9A").unwrap().is_none());
    }

    #[test]
    fn decodes_dump_json() {
        let json = r#"[{
            "mim_number": "182389",
            "gene_symbols": "SCN1A",
            "gene_location": "2q24.3",
            "phenotypes": [{
                "phenotype_mim_number": "604403",
                "phenotype": "Epileptic encephalopathy",
                "inheritance": "Autosomal dominant"
            }]
        }]"#;
        let entries: Vec<GeneEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(
            entries[0].phenotypes[0].inheritance.as_deref(),
            Some("Autosomal dominant")
        );
    }
}
