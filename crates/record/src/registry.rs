//! The canonical, ordered column schema shared by every gene list.

/// A canonical gene-list column.
///
/// The discriminant doubles as the index into [`crate::Record`]'s value
/// storage, so `ALL` must list every variant exactly once, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Field {
    Chromosome,
    GeneStart,
    GeneStop,
    HgncSymbol,
    ProteinName,
    Symptoms,
    Biochemistry,
    Imaging,
    DiseaseTrivialName,
    TrivialNameShort,
    PhenotypicDiseaseModel,
    OmimMorbid,
    GeneLocus,
    UniprotId,
    EnsemblGeneId,
    EnsemblTranscriptId,
    ReducedPenetrance,
    ClinicalDbGeneAnnotation,
    DiseaseAssociatedTranscript,
    EnsemblTranscriptToRefseqTranscript,
    GeneDescription,
    GeneticDiseaseModel,
    HgncRefseqNm,
    UniprotProteinName,
    DatabaseEntryVersion,
    Curator,
    Alias,
    GroupOrPathway,
    Mosaicism,
    Comments,
}

impl Field {
    /// Number of canonical columns
    pub const COUNT: usize = 30;

    /// Every column, in the order data lines are emitted
    pub const ALL: [Field; Field::COUNT] = [
        Field::Chromosome,
        Field::GeneStart,
        Field::GeneStop,
        Field::HgncSymbol,
        Field::ProteinName,
        Field::Symptoms,
        Field::Biochemistry,
        Field::Imaging,
        Field::DiseaseTrivialName,
        Field::TrivialNameShort,
        Field::PhenotypicDiseaseModel,
        Field::OmimMorbid,
        Field::GeneLocus,
        Field::UniprotId,
        Field::EnsemblGeneId,
        Field::EnsemblTranscriptId,
        Field::ReducedPenetrance,
        Field::ClinicalDbGeneAnnotation,
        Field::DiseaseAssociatedTranscript,
        Field::EnsemblTranscriptToRefseqTranscript,
        Field::GeneDescription,
        Field::GeneticDiseaseModel,
        Field::HgncRefseqNm,
        Field::UniprotProteinName,
        Field::DatabaseEntryVersion,
        Field::Curator,
        Field::Alias,
        Field::GroupOrPathway,
        Field::Mosaicism,
        Field::Comments,
    ];

    /// Columns whose value is rewritten as `symbol:value` once a confirmed
    /// HGNC symbol is known. Prefix add and prefix remove operate on
    /// exactly this set.
    pub const PREFIXED: [Field; 9] = [
        Field::PhenotypicDiseaseModel,
        Field::OmimMorbid,
        Field::UniprotId,
        Field::EnsemblTranscriptId,
        Field::DiseaseAssociatedTranscript,
        Field::EnsemblTranscriptToRefseqTranscript,
        Field::GeneDescription,
        Field::HgncRefseqNm,
        Field::UniprotProteinName,
    ];

    /// The column name as it appears in the header line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Chromosome => "Chromosome",
            Field::GeneStart => "Gene_start",
            Field::GeneStop => "Gene_stop",
            Field::HgncSymbol => "HGNC_symbol",
            Field::ProteinName => "Protein_name",
            Field::Symptoms => "Symptoms",
            Field::Biochemistry => "Biochemistry",
            Field::Imaging => "Imaging",
            Field::DiseaseTrivialName => "Disease_trivial_name",
            Field::TrivialNameShort => "Trivial_name_short",
            Field::PhenotypicDiseaseModel => "Phenotypic_disease_model",
            Field::OmimMorbid => "OMIM_morbid",
            Field::GeneLocus => "Gene_locus",
            Field::UniprotId => "UniProt_id",
            Field::EnsemblGeneId => "Ensembl_gene_id",
            Field::EnsemblTranscriptId => "Ensemble_transcript_ID",
            Field::ReducedPenetrance => "Reduced_penetrance",
            Field::ClinicalDbGeneAnnotation => "Clinical_db_gene_annotation",
            Field::DiseaseAssociatedTranscript => "Disease_associated_transcript",
            Field::EnsemblTranscriptToRefseqTranscript => {
                "Ensembl_transcript_to_refseq_transcript"
            }
            Field::GeneDescription => "Gene_description",
            Field::GeneticDiseaseModel => "Genetic_disease_model",
            Field::HgncRefseqNm => "HGNC_RefSeq_NM",
            Field::UniprotProteinName => "Uniprot_protein_name",
            Field::DatabaseEntryVersion => "Database_entry_version",
            Field::Curator => "Curator",
            Field::Alias => "Alias",
            Field::GroupOrPathway => "Group_or_Pathway",
            Field::Mosaicism => "Mosaicism",
            Field::Comments => "Comments",
        }
    }

    /// Look up a column by its header name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// The coordinate pair is exempt from merge conflict reporting
    #[must_use]
    pub const fn is_coordinate(self) -> bool {
        matches!(self, Field::GeneStart | Field::GeneStop)
    }

    /// Index into a record's value storage
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
