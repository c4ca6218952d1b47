//! The enrichment stages: each one wraps a source behind its narrow query
//! contract and folds the results in through the merge engine.

use crate::error::Result;
use crate::merge::merge;
use crate::run::PipelineRun;
use crate::stage::Stage;
use genelist_record::{Field, Fragment, Record};
use genelist_sources::{
    parse_inheritance_models, CoordQuery, CoordinateSource, Nomenclature, PhenotypeCatalog,
    ProteinAnnotations, SymbolTable,
};

/// Joins the elements of a multi-valued field
const FIELD_DELIMITER: &str = "|";

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Fill symbol, phenotype id and database id from the static symbol
/// cross-reference table. The phenotype id takes precedence as the lookup
/// key; the symbol is the fallback.
pub struct SymbolTableFill<'a> {
    pub table: &'a SymbolTable,
}

impl Stage for SymbolTableFill<'_> {
    fn apply(&mut self, run: &mut PipelineRun, record: Record) -> Result<Vec<Record>> {
        let mut fragment = Fragment::new();

        if let Some(mim) = non_empty(record.get(Field::OmimMorbid)) {
            if let Some(symbol) = self.table.symbol_for_mim(mim) {
                fragment.set(Field::HgncSymbol, symbol);
            }
            if let Some(gene_id) = self.table.ensembl_for_mim(mim) {
                fragment.set(Field::EnsemblGeneId, gene_id);
            }
        } else if let Some(symbol) = non_empty(record.symbol()) {
            if let Some(mim) = self.table.mim_for_symbol(symbol) {
                fragment.set(Field::OmimMorbid, mim);
            }
            if let Some(gene_id) = self.table.ensembl_for_symbol(symbol) {
                fragment.set(Field::EnsemblGeneId, gene_id);
            }
        }

        if fragment.is_empty() {
            return Ok(vec![record]);
        }
        Ok(vec![merge(run, &fragment, &record)])
    }
}

/// Resolve the official symbol for every candidate symbol via the
/// nomenclature service. Newly learned official symbols are prepended to
/// the candidate list; the most frequent one becomes the record's
/// official annotation.
pub struct OfficialSymbol<'a> {
    pub source: &'a mut dyn Nomenclature,
}

impl Stage for OfficialSymbol<'_> {
    fn apply(&mut self, run: &mut PipelineRun, mut record: Record) -> Result<Vec<Record>> {
        let candidates = record.candidate_symbols();
        if candidates.is_empty() {
            return Ok(vec![record]);
        }
        let mim = non_empty(record.get(Field::OmimMorbid)).map(str::to_string);

        let mut official_symbols = Vec::with_capacity(candidates.len());
        for symbol in &candidates {
            match self.source.official(symbol, mim.as_deref())? {
                Some(official) => {
                    if !record.candidate_symbols().contains(&official) {
                        run.info(format!("Add official HGNC symbol {official}"));
                        let prepended = format!("{official},{}", record.symbol());
                        record.set(Field::HgncSymbol, prepended);
                    }
                    official_symbols.push(official);
                }
                None => official_symbols.push(symbol.clone()),
            }
        }

        // several candidates may disagree; the most frequent one wins,
        // later candidates winning ties
        let mut counts: Vec<(&String, usize)> = Vec::new();
        for symbol in &official_symbols {
            if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == symbol) {
                entry.1 += 1;
            } else {
                counts.push((symbol, 1));
            }
        }
        if let Some((winner, _)) = counts.into_iter().max_by_key(|(_, count)| *count) {
            run.info(format!("Took {winner} as official symbol"));
            record.set_official_symbol(winner.clone());
        }

        Ok(vec![record])
    }
}

/// Add UniProt ids and protein names based on the official symbol
pub struct AddUniprot<'a> {
    pub nomenclature: &'a mut dyn Nomenclature,
    pub proteins: &'a mut dyn ProteinAnnotations,
}

impl Stage for AddUniprot<'_> {
    fn apply(&mut self, run: &mut PipelineRun, mut record: Record) -> Result<Vec<Record>> {
        let symbol = non_empty(record.official_symbol())
            .unwrap_or(record.symbol())
            .to_string();
        let ids = self.nomenclature.uniprot_ids(&symbol)?;
        let joined = ids.join(FIELD_DELIMITER);

        if ids.len() > 1 {
            run.warn(format!("Multiple UniProt IDs: {joined}"));
        }
        if record.has(Field::UniprotId) && record.get(Field::UniprotId) != joined {
            run.warn(format!(
                "Replaced UniProt id {} with {joined}",
                record.get(Field::UniprotId)
            ));
        }

        let mut description = None;
        for id in &ids {
            let fetched = self.proteins.description(id)?.unwrap_or_default();
            if record.has(Field::UniprotProteinName)
                && record.get(Field::UniprotProteinName) != fetched
            {
                run.warn(format!(
                    "Replaced protein name {} with {fetched}",
                    record.get(Field::UniprotProteinName)
                ));
            }
            description = Some(fetched);
        }
        if let Some(description) = description {
            record.set(Field::UniprotProteinName, description);
        }
        record.set(Field::UniprotId, joined);

        Ok(vec![record])
    }
}

/// Add RefSeq accessions based on the official symbol
pub struct AddRefseq<'a> {
    pub source: &'a mut dyn Nomenclature,
}

impl Stage for AddRefseq<'_> {
    fn apply(&mut self, run: &mut PipelineRun, mut record: Record) -> Result<Vec<Record>> {
        let symbol = non_empty(record.official_symbol())
            .unwrap_or(record.symbol())
            .to_string();
        let joined = self
            .source
            .refseq_accessions(&symbol)?
            .join(FIELD_DELIMITER);
        if record.has(Field::HgncRefseqNm) && record.get(Field::HgncRefseqNm) != joined {
            run.warn(format!(
                "Replaced RefSeq accession {} with {joined}",
                record.get(Field::HgncRefseqNm)
            ));
        }
        record.set(Field::HgncRefseqNm, joined);
        Ok(vec![record])
    }
}

/// The cascading coordinate resolver.
///
/// Candidate symbols are tried in caller priority order; for each one a
/// fixed-priority cascade picks the most constrained query the record's
/// identifiers allow. Ambiguity is surfaced, not swallowed: a query with
/// several matches fans the record out into one output per match.
pub struct ResolveCoordinates<'a> {
    pub source: &'a mut dyn CoordinateSource,
    /// Abort candidate iteration on the first empty result instead of
    /// moving on to the next candidate symbol.
    pub stop_on_first_empty: bool,
}

impl ResolveCoordinates<'_> {
    /// One cascade pass for one candidate symbol. Phases, most
    /// constrained first; a phase that cannot narrow to a single match
    /// hands over to the next more permissive one.
    fn cascade(
        &mut self,
        record: &Record,
        symbol: Option<&str>,
    ) -> Result<Vec<Fragment>> {
        let gene_id = non_empty(record.get(Field::EnsemblGeneId));
        let phenotype_id = non_empty(record.get(Field::OmimMorbid));
        let chromosome = non_empty(record.get(Field::Chromosome));

        if gene_id.is_some() && phenotype_id.is_some() {
            let matches = self.source.query(&CoordQuery {
                gene_id,
                phenotype_id,
                chromosome,
                symbol: None,
            })?;
            if matches.len() == 1 {
                return Ok(matches);
            }
            if symbol.is_none() {
                // nothing left to refine with
                return Ok(matches);
            }
        }

        if gene_id.is_some() && symbol.is_some() {
            return Ok(self.source.query(&CoordQuery {
                gene_id,
                symbol,
                chromosome,
                phenotype_id: None,
            })?);
        }

        if gene_id.is_none() && phenotype_id.is_some() {
            let matches = self.source.query(&CoordQuery {
                phenotype_id,
                chromosome,
                gene_id: None,
                symbol: None,
            })?;
            if matches.len() > 1 && symbol.is_some() {
                // the phenotype alone was ambiguous; retry with the
                // candidate symbol as an extra filter
                return Ok(self.source.query(&CoordQuery {
                    phenotype_id,
                    symbol,
                    chromosome,
                    gene_id: None,
                })?);
            }
            return Ok(matches);
        }

        // the last resort still honors a gene id when the record has one
        Ok(self.source.query(&CoordQuery {
            gene_id,
            symbol,
            chromosome,
            phenotype_id: None,
        })?)
    }
}

impl Stage for ResolveCoordinates<'_> {
    fn apply(&mut self, run: &mut PipelineRun, record: Record) -> Result<Vec<Record>> {
        let candidates = record.candidate_symbols();
        let symbols: Vec<Option<String>> = if candidates.is_empty() {
            vec![None]
        } else {
            candidates.iter().cloned().map(Some).collect()
        };

        for (idx, symbol) in symbols.iter().enumerate() {
            let is_last = idx + 1 == symbols.len();
            let matches = self.cascade(&record, symbol.as_deref())?;

            // the adopted candidate replaces the whole candidate list
            let mut base = record.clone();
            if let Some(symbol) = symbol {
                base.set(Field::HgncSymbol, symbol.clone());
            }

            match matches.len() {
                0 => {
                    if is_last || self.stop_on_first_empty {
                        run.error(format!(
                            "Not found: {} (gene id '{}', phenotype '{}', chromosome '{}')",
                            symbol.as_deref().unwrap_or("-"),
                            record.get(Field::EnsemblGeneId),
                            record.get(Field::OmimMorbid),
                            record.get(Field::Chromosome),
                        ));
                        // pass the record through unchanged; downstream
                        // tells enriched from unresolved via the log only
                        return Ok(vec![record]);
                    }
                }
                1 => {
                    if idx > 0 {
                        run.warn(format!(
                            "Took {}/{}",
                            symbol.as_deref().unwrap_or("-"),
                            candidates.join(",")
                        ));
                    }
                    return Ok(vec![merge(run, &matches[0], &base)]);
                }
                _ => {
                    run.warn(format!(
                        "Multiple entries: {}, chromosome: {} =>",
                        symbol.as_deref().unwrap_or("-"),
                        record.get(Field::Chromosome),
                    ));
                    let gene_ids: Vec<&str> = matches
                        .iter()
                        .filter_map(|fragment| fragment.get(Field::EnsemblGeneId))
                        .collect();
                    run.warn(format!("Adding: {}", gene_ids.join(", ")));
                    return Ok(matches
                        .iter()
                        .map(|fragment| merge(run, fragment, &base))
                        .collect());
                }
            }
        }

        Ok(vec![record])
    }
}

/// Aggregate transcripts and RefSeq ids for records with a resolved gene id
pub struct AddTranscripts<'a> {
    pub source: &'a mut dyn CoordinateSource,
}

impl Stage for AddTranscripts<'_> {
    fn apply(&mut self, run: &mut PipelineRun, record: Record) -> Result<Vec<Record>> {
        let Some(gene_id) = non_empty(record.get(Field::EnsemblGeneId)) else {
            return Ok(vec![record]);
        };
        match self.source.transcripts(gene_id)? {
            Some(fragment) => Ok(vec![merge(run, &fragment, &record)]),
            None => Ok(vec![record]),
        }
    }
}

/// Fill in the phenotypic disease models, phenotype id and gene locus
/// from the phenotype catalog
pub struct AddPhenotypes<'a> {
    pub catalog: &'a mut dyn PhenotypeCatalog,
}

impl Stage for AddPhenotypes<'_> {
    fn apply(&mut self, run: &mut PipelineRun, mut record: Record) -> Result<Vec<Record>> {
        if !record.has(Field::Chromosome) {
            return Ok(vec![record]);
        }
        let entry = if let Some(mim) = non_empty(record.get(Field::OmimMorbid)) {
            self.catalog.gene_by_mim(mim)?
        } else if let Some(symbol) =
            non_empty(record.official_symbol()).or_else(|| non_empty(record.symbol()))
        {
            self.catalog.gene_by_symbol(symbol)?
        } else {
            return Ok(vec![record]);
        };
        // a miss still rewrites the model field: the catalog is
        // authoritative for it
        let entry = entry.unwrap_or_default();

        let chromosome = record.get(Field::Chromosome).to_string();
        let grouped = parse_inheritance_models(&entry.phenotypes, &chromosome, None);
        let mut parts = Vec::new();
        for (phenotype_id, annotations) in &grouped {
            let Some(phenotype_id) = phenotype_id else {
                continue;
            };
            let mut models: Vec<&str> = annotations
                .iter()
                .flat_map(|annotation| annotation.models.iter().map(String::as_str))
                .collect();
            models.sort_unstable();
            models.dedup();
            if models.is_empty() {
                parts.push(phenotype_id.clone());
            } else {
                parts.push(format!("{phenotype_id}>{}", models.join("/")));
            }
        }
        record.set(Field::PhenotypicDiseaseModel, parts.join(FIELD_DELIMITER));

        if let Some(mim_number) = &entry.mim_number {
            if record.has(Field::OmimMorbid) && record.get(Field::OmimMorbid) != mim_number.as_str()
            {
                run.warn(format!(
                    "{} {} > {mim_number} client OMIM number differs from catalog",
                    record.symbol(),
                    record.get(Field::OmimMorbid),
                ));
            }
            record.set(Field::OmimMorbid, mim_number.clone());
        }
        if let Some(location) = &entry.gene_location {
            if record.has(Field::GeneLocus) && record.get(Field::GeneLocus) != location.as_str() {
                run.warn(format!(
                    "{} > {location} client gene locus differs from catalog",
                    record.get(Field::GeneLocus),
                ));
            }
            record.set(Field::GeneLocus, location.clone());
        }

        Ok(vec![record])
    }
}

/// Replace an affirmative reduced-penetrance flag with the record's symbol
pub fn redpen_to_symbol(record: &mut Record) {
    if record
        .get(Field::ReducedPenetrance)
        .eq_ignore_ascii_case("yes")
    {
        record.set(Field::ReducedPenetrance, record.symbol().to_string());
    }
}

/// Swap the coordinate pair when start ended up beyond stop
pub fn munge_coordinates(record: &mut Record) {
    let start = record.get(Field::GeneStart).parse::<u64>();
    let stop = record.get(Field::GeneStop).parse::<u64>();
    if let (Ok(start), Ok(stop)) = (start, stop) {
        if start > stop {
            record.set(Field::GeneStart, stop.to_string());
            record.set(Field::GeneStop, start.to_string());
        }
    }
}
