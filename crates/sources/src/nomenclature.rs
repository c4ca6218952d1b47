//! JSON-dump-backed gene-nomenclature source.

use crate::error::Result;
use crate::Nomenclature;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One nomenclature document: an approved symbol and its cross-references
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NomenclatureDoc {
    pub symbol: String,
    #[serde(default)]
    pub prev_symbols: Vec<String>,
    /// Associated phenotype identifiers; the first one identifies the doc
    #[serde(default)]
    pub omim_ids: Vec<String>,
    #[serde(default)]
    pub uniprot_ids: Vec<String>,
    #[serde(default)]
    pub refseq_accessions: Vec<String>,
}

/// Nomenclature source backed by a JSON dump: an array of
/// [`NomenclatureDoc`] objects. Lookups search the approved symbol first
/// and fall back to previous symbols, the way the live service is queried
/// twice (`fetch/symbol`, then `fetch/prev_symbol`).
#[derive(Debug, Default)]
pub struct NomenclatureDump {
    docs: Vec<NomenclatureDoc>,
}

impl NomenclatureDump {
    #[must_use]
    pub fn from_docs(docs: Vec<NomenclatureDoc>) -> Self {
        Self { docs }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let docs: Vec<NomenclatureDoc> = serde_json::from_str(&fs::read_to_string(path)?)?;
        log::debug!("Loaded {} nomenclature documents", docs.len());
        Ok(Self { docs })
    }

    fn by_symbol(&self, symbol: &str) -> Vec<&NomenclatureDoc> {
        self.docs.iter().filter(|doc| doc.symbol == symbol).collect()
    }

    fn by_prev_symbol(&self, symbol: &str) -> Vec<&NomenclatureDoc> {
        self.docs
            .iter()
            .filter(|doc| doc.prev_symbols.iter().any(|prev| prev == symbol))
            .collect()
    }

    /// Pick the official symbol out of a doc set. Without a phenotype id
    /// the first doc wins; with one, only the doc it identifies.
    fn pick_official(docs: &[&NomenclatureDoc], mim: Option<&str>) -> Option<String> {
        match mim {
            None => docs.first().map(|doc| doc.symbol.clone()),
            Some(mim) => docs
                .iter()
                .find(|doc| doc.omim_ids.first().map(String::as_str) == Some(mim))
                .map(|doc| doc.symbol.clone()),
        }
    }
}

impl Nomenclature for NomenclatureDump {
    fn official(&mut self, symbol: &str, mim: Option<&str>) -> Result<Option<String>> {
        let direct = Self::pick_official(&self.by_symbol(symbol), mim);
        if direct.is_some() {
            return Ok(direct);
        }
        // no results, maybe it is a previous symbol
        Ok(Self::pick_official(&self.by_prev_symbol(symbol), mim))
    }

    fn uniprot_ids(&mut self, symbol: &str) -> Result<Vec<String>> {
        Ok(self
            .by_symbol(symbol)
            .first()
            .map(|doc| doc.uniprot_ids.clone())
            .unwrap_or_default())
    }

    fn refseq_accessions(&mut self, symbol: &str) -> Result<Vec<String>> {
        Ok(self
            .by_symbol(symbol)
            .first()
            .map(|doc| doc.refseq_accessions.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::{NomenclatureDoc, NomenclatureDump};
    use crate::Nomenclature;
    use pretty_assertions::assert_eq;

    fn doc(symbol: &str, prev: &[&str], omim: &[&str]) -> NomenclatureDoc {
        NomenclatureDoc {
            symbol: symbol.to_string(),
            prev_symbols: prev.iter().map(|s| s.to_string()).collect(),
            omim_ids: omim.iter().map(|s| s.to_string()).collect(),
            uniprot_ids: vec!["P35498".to_string()],
            refseq_accessions: vec!["NM_001165963".to_string()],
        }
    }

    #[test]
    fn previous_symbols_are_a_fallback() {
        let mut dump = NomenclatureDump::from_docs(vec![doc("SCN1A", &["SCN1"], &["182389"])]);
        assert_eq!(
            dump.official("SCN1", None).unwrap().as_deref(),
            Some("SCN1A")
        );
        assert_eq!(dump.official("NOPE", None).unwrap(), None);
    }

    #[test]
    fn phenotype_id_disambiguates() {
        let mut dump = NomenclatureDump::from_docs(vec![
            doc("GENE1", &[], &["100100"]),
            doc("GENE2", &["GENE1"], &["100200"]),
        ]);
        // mim picks through the prev-symbol fallback as well
        assert_eq!(
            dump.official("GENE1", Some("100200")).unwrap().as_deref(),
            Some("GENE2")
        );
        assert_eq!(dump.official("GENE1", Some("999999")).unwrap(), None);
    }

    #[test]
    fn cross_references_come_from_the_approved_doc() {
        let mut dump = NomenclatureDump::from_docs(vec![doc("SCN1A", &[], &[])]);
        assert_eq!(dump.uniprot_ids("SCN1A").unwrap(), vec!["P35498"]);
        assert_eq!(
            dump.refseq_accessions("SCN1A").unwrap(),
            vec!["NM_001165963"]
        );
        assert!(dump.uniprot_ids("SCN9A").unwrap().is_empty());
    }
}
