//! TSV-dump-backed gene-coordinate source.

use crate::error::{Result, SourceError};
use crate::{cleanup_description, CoordinateSource};
use genelist_record::{Field, Fragment};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Query criteria for the coordinate source. Only the provided criteria
/// constrain the lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordQuery<'a> {
    /// Stable database identifier (Ensembl gene id)
    pub gene_id: Option<&'a str>,
    /// Phenotype identifier (OMIM morbid number)
    pub phenotype_id: Option<&'a str>,
    /// HGNC symbol
    pub symbol: Option<&'a str>,
    /// Chromosome name
    pub chromosome: Option<&'a str>,
}

/// One gene in the coordinate dump
#[derive(Debug, Clone)]
pub struct GeneRow {
    pub chromosome: String,
    pub start: String,
    pub stop: String,
    pub symbol: String,
    pub gene_id: String,
    pub phenotype_id: String,
    pub description: String,
}

/// One transcript/RefSeq pairing in the transcript dump
#[derive(Debug, Clone)]
pub struct TranscriptRow {
    pub gene_id: String,
    pub transcript_id: String,
    pub refseq_id: String,
}

/// Coordinate source backed by local dumps of the gene database: a gene
/// table (`Chromosome⇥Gene_start⇥Gene_stop⇥HGNC_symbol⇥Ensembl_gene_id`
/// plus optional phenotype id and description columns) and an optional
/// transcript table (`Ensembl_gene_id⇥Transcript_ID⇥RefSeq_ID`).
#[derive(Debug, Default)]
pub struct CoordinateTable {
    genes: Vec<GeneRow>,
    transcripts: Vec<TranscriptRow>,
}

impl CoordinateTable {
    #[must_use]
    pub fn from_rows(genes: Vec<GeneRow>, transcripts: Vec<TranscriptRow>) -> Self {
        Self { genes, transcripts }
    }

    pub fn from_files(genes: &Path, transcripts: Option<&Path>) -> Result<Self> {
        let mut table = Self::default();

        for (line_nr, cells) in read_tsv(genes)? {
            if cells.len() < 5 {
                return Err(SourceError::MalformedRow {
                    line: line_nr,
                    reason: format!("expected at least 5 columns, got {}", cells.len()),
                });
            }
            table.genes.push(GeneRow {
                chromosome: cells[0].clone(),
                start: cells[1].clone(),
                stop: cells[2].clone(),
                symbol: cells[3].clone(),
                gene_id: cells[4].clone(),
                phenotype_id: cells.get(5).cloned().unwrap_or_default(),
                description: cells.get(6).cloned().unwrap_or_default(),
            });
        }

        if let Some(path) = transcripts {
            for (line_nr, cells) in read_tsv(path)? {
                if cells.len() < 2 {
                    return Err(SourceError::MalformedRow {
                        line: line_nr,
                        reason: format!("expected at least 2 columns, got {}", cells.len()),
                    });
                }
                table.transcripts.push(TranscriptRow {
                    gene_id: cells[0].clone(),
                    transcript_id: cells[1].clone(),
                    refseq_id: cells.get(2).cloned().unwrap_or_default(),
                });
            }
        }

        log::debug!(
            "Loaded {} genes, {} transcript rows",
            table.genes.len(),
            table.transcripts.len()
        );
        Ok(table)
    }

    fn coordinate_fragment(row: &GeneRow) -> Fragment {
        Fragment::new()
            .with(Field::Chromosome, row.chromosome.clone())
            .with(Field::GeneStart, row.start.clone())
            .with(Field::GeneStop, row.stop.clone())
            .with(Field::HgncSymbol, row.symbol.clone())
            .with(Field::EnsemblGeneId, row.gene_id.clone())
    }

    /// Join transcripts to `transcript>refseq/refseq|transcript…`,
    /// transcripts sorted, RefSeq accessions sorted within a transcript.
    fn join_refseqs(transcripts: &BTreeMap<String, BTreeSet<String>>) -> String {
        let mut joined = Vec::with_capacity(transcripts.len());
        for (transcript, refseqs) in transcripts {
            let refseqs: Vec<&str> = refseqs.iter().map(String::as_str).collect();
            if refseqs.is_empty() {
                joined.push(transcript.clone());
            } else {
                joined.push(format!("{transcript}>{}", refseqs.join("/")));
            }
        }
        joined.join("|")
    }
}

impl CoordinateSource for CoordinateTable {
    fn query(&mut self, query: &CoordQuery) -> Result<Vec<Fragment>> {
        let matches = self
            .genes
            .iter()
            // region names of 3+ characters are scaffolds and patches
            .filter(|row| row.chromosome.len() < 3)
            .filter(|row| query.gene_id.is_none_or(|id| row.gene_id == id))
            .filter(|row| query.phenotype_id.is_none_or(|mim| row.phenotype_id == mim))
            .filter(|row| query.symbol.is_none_or(|symbol| row.symbol == symbol))
            .filter(|row| query.chromosome.is_none_or(|chrom| row.chromosome == chrom))
            .map(Self::coordinate_fragment)
            .collect();
        Ok(matches)
    }

    fn transcripts(&mut self, gene_id: &str) -> Result<Option<Fragment>> {
        let Some(gene) = self.genes.iter().find(|row| row.gene_id == gene_id) else {
            return Ok(None);
        };

        let mut by_transcript: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for row in self.transcripts.iter().filter(|row| row.gene_id == gene_id) {
            let refseqs = by_transcript.entry(row.transcript_id.clone()).or_default();
            if !row.refseq_id.is_empty() && row.refseq_id != "-" {
                refseqs.insert(row.refseq_id.clone());
            }
        }

        let fragment = Self::coordinate_fragment(gene)
            .with(Field::GeneDescription, cleanup_description(&gene.description))
            .with(
                Field::EnsemblTranscriptToRefseqTranscript,
                Self::join_refseqs(&by_transcript),
            );
        Ok(Some(fragment))
    }
}

/// Read a tab-delimited dump, skipping `#` comments and blank lines.
/// Yields (1-based line number, cells).
fn read_tsv(path: &Path) -> Result<Vec<(usize, Vec<String>)>> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        rows.push((idx + 1, line.split('\t').map(str::to_string).collect()));
    }
    Ok(rows)
}
