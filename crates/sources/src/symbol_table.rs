//! The static symbol cross-reference table.

use crate::error::{Result, SourceError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One cross-reference row: phenotype id, entry type, gene id, symbol and
/// database (Ensembl) gene id.
#[derive(Debug, Clone, Default)]
pub struct SymbolEntry {
    pub mim_number: String,
    /// Entry type, e.g. `gene`, `gene/phenotype`, `phenotype`, `predominantly phenotypes`
    pub kind: String,
    pub gene_id: String,
    pub symbol: String,
    pub ensembl_gene_id: String,
}

impl SymbolEntry {
    /// Types that denote an actual gene
    #[must_use]
    pub fn is_gene(&self) -> bool {
        matches!(self.kind.as_str(), "gene" | "gene/phenotype")
    }
}

/// The symbol cross-reference file: five tab-separated columns
/// (`mim⇥type⇥gene_id⇥symbol⇥ensembl`), `#` comments skipped. The Ensembl
/// column may carry a comma-separated list; only the first entry is kept,
/// and `-` means none.
#[derive(Debug, Default)]
pub struct SymbolTable {
    by_mim: HashMap<String, SymbolEntry>,
    by_symbol: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_str_content(&fs::read_to_string(path)?)
    }

    pub fn from_str_content(content: &str) -> Result<Self> {
        let mut table = Self::default();
        for (idx, line) in content.lines().enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').collect();
            if cells.len() != 5 {
                return Err(SourceError::MalformedRow {
                    line: idx + 1,
                    reason: format!("expected 5 columns, got {}", cells.len()),
                });
            }
            let ensembl = cells[4].split(',').next().unwrap_or_default();
            let entry = SymbolEntry {
                mim_number: cells[0].to_string(),
                kind: cells[1].to_string(),
                gene_id: cells[2].to_string(),
                symbol: cells[3].to_string(),
                ensembl_gene_id: if ensembl == "-" {
                    String::new()
                } else {
                    ensembl.to_string()
                },
            };
            if !entry.symbol.is_empty() {
                table.by_symbol.insert(entry.symbol.clone(), entry.clone());
            }
            table.by_mim.insert(entry.mim_number.clone(), entry);
        }
        log::debug!("Loaded {} symbol cross-references", table.by_mim.len());
        Ok(table)
    }

    /// The full entry for a phenotype id
    #[must_use]
    pub fn lookup(&self, mim: &str) -> Option<&SymbolEntry> {
        self.by_mim.get(mim)
    }

    /// The official symbol for a phenotype id, gene-type entries only
    #[must_use]
    pub fn symbol_for_mim(&self, mim: &str) -> Option<&str> {
        self.by_mim
            .get(mim)
            .filter(|entry| entry.is_gene() && !entry.symbol.is_empty())
            .map(|entry| entry.symbol.as_str())
    }

    /// The database gene id for a phenotype id
    #[must_use]
    pub fn ensembl_for_mim(&self, mim: &str) -> Option<&str> {
        self.by_mim
            .get(mim)
            .filter(|entry| !entry.ensembl_gene_id.is_empty())
            .map(|entry| entry.ensembl_gene_id.as_str())
    }

    /// The phenotype id for a symbol
    #[must_use]
    pub fn mim_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(|entry| entry.mim_number.as_str())
    }

    /// The database gene id for a symbol
    #[must_use]
    pub fn ensembl_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.by_symbol
            .get(symbol)
            .filter(|entry| !entry.ensembl_gene_id.is_empty())
            .map(|entry| entry.ensembl_gene_id.as_str())
    }

    /// Whether a symbol denotes an actual gene
    #[must_use]
    pub fn is_gene(&self, symbol: &str) -> bool {
        self.by_symbol
            .get(symbol)
            .is_some_and(SymbolEntry::is_gene)
    }
}
