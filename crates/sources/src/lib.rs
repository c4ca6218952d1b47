//! # Genelist Sources
//!
//! The narrow query contracts the reconciliation pipeline consumes, one
//! trait per authority, plus implementations backed by locally dumped
//! copies of each source so a run is offline and deterministic:
//!
//! - [`CoordinateSource`]: gene coordinates and transcript/RefSeq
//!   aggregation (TSV dumps)
//! - [`PhenotypeCatalog`]: phenotype and inheritance entries (JSON dump)
//! - [`Nomenclature`]: official symbols and cross-references (JSON dump)
//! - [`ProteinAnnotations`]: protein names (JSON dump)
//! - [`SymbolTable`]: the static symbol cross-reference file
//!
//! The traits are the seam: the pipeline never sees dump files, only
//! structured fragments or empty results.

pub mod coordinate;
pub mod error;
pub mod inheritance;
pub mod nomenclature;
pub mod phenotype;
pub mod protein;
pub mod symbol_table;

pub use coordinate::{CoordQuery, CoordinateTable};
pub use error::{Result, SourceError};
pub use inheritance::{parse_inheritance_models, InheritanceModels, ModelAnnotation};
pub use nomenclature::NomenclatureDump;
pub use phenotype::{GeneEntry, Phenotype, PhenotypeDump};
pub use protein::ProteinDump;
pub use symbol_table::SymbolTable;

use genelist_record::Fragment;
use once_cell::sync::Lazy;
use regex::Regex;

/// The gene-coordinate authority.
pub trait CoordinateSource {
    /// Look up genes matching every provided criterion. Zero, one or
    /// many fragments may come back; disambiguation is the caller's
    /// problem.
    fn query(&mut self, query: &CoordQuery) -> Result<Vec<Fragment>>;

    /// Transcript/RefSeq aggregation for one gene, as a single fragment
    fn transcripts(&mut self, gene_id: &str) -> Result<Option<Fragment>>;
}

/// The phenotype/inheritance catalog.
pub trait PhenotypeCatalog {
    fn gene_by_mim(&mut self, mim: &str) -> Result<Option<GeneEntry>>;
    fn gene_by_symbol(&mut self, symbol: &str) -> Result<Option<GeneEntry>>;
}

/// The gene-nomenclature authority.
pub trait Nomenclature {
    /// The official symbol for a (possibly outdated) symbol. Passing the
    /// phenotype identifier disambiguates multi-document matches.
    fn official(&mut self, symbol: &str, mim: Option<&str>) -> Result<Option<String>>;

    fn uniprot_ids(&mut self, symbol: &str) -> Result<Vec<String>>;

    fn refseq_accessions(&mut self, symbol: &str) -> Result<Vec<String>>;
}

/// The protein-annotation authority.
pub trait ProteinAnnotations {
    fn description(&mut self, uniprot_id: &str) -> Result<Option<String>>;
}

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*\]").unwrap());
static INVALID_DESC_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,:;>| ]").unwrap());

/// Clean a free-text description for use as a field value: drop bracketed
/// comments, map characters that collide with field delimiters to `_`.
#[must_use]
pub fn cleanup_description(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let cleaned = BRACKETED.replace_all(trimmed, "");
    let mut cleaned = INVALID_DESC_CHARS.replace_all(&cleaned, "_").into_owned();
    if cleaned.ends_with('_') {
        cleaned.pop();
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::cleanup_description;
    use pretty_assertions::assert_eq;

    #[test]
    fn descriptions_lose_brackets_and_delimiters() {
        assert_eq!(
            cleanup_description("Sodium channel protein type 1 [Source:HGNC]"),
            "Sodium_channel_protein_type_1"
        );
        assert_eq!(cleanup_description("a,b;c>d|e:f"), "a_b_c_d_e_f");
        assert_eq!(cleanup_description("  "), "");
    }
}
