//! Extraction and normalization of phenotype inheritance annotations.

use crate::phenotype::Phenotype;
use std::collections::BTreeSet;

/// Long-form inheritance terms and their short codes
const TERM_CODES: [(&str, &str); 4] = [
    ("Autosomal recessive", "AR"),
    ("Autosomal dominant", "AD"),
    ("X-linked dominant", "XD"),
    ("X-linked recessive", "XR"),
];

const TERMS_X: [&str; 2] = ["X-linked dominant", "X-linked recessive"];
const TERMS_AUTOSOMAL: [&str; 2] = ["Autosomal recessive", "Autosomal dominant"];

/// Annotations that are not inheritance models and never survive parsing
const TERMS_BLACKLIST: [&str; 2] = ["Isolated cases", "Mitochondrial"];

/// The normalized inheritance models of one phenotype listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAnnotation {
    /// Short codes (AR, AD, XR, XD), sorted
    pub models: Vec<String>,
    /// The phenotype's free-text description
    pub description: String,
}

/// Inheritance models grouped by phenotype id, in first-seen order. A
/// phenotype id collects one [`ModelAnnotation`] per time the catalog
/// listed it; repeats are kept, not deduplicated.
pub type InheritanceModels = Vec<(Option<String>, Vec<ModelAnnotation>)>;

/// Parse the inheritance annotations of a gene's phenotype list.
///
/// Splits the inheritance text on `;`, drops blacklisted annotations,
/// drops X-linked terms unless the gene is on chromosome X (and autosomal
/// terms when it is), and rewrites long-form terms to short codes. When
/// `phenotype_number` is given, only that phenotype entry is parsed.
#[must_use]
pub fn parse_inheritance_models(
    phenotypes: &[Phenotype],
    chromosome: &str,
    phenotype_number: Option<&str>,
) -> InheritanceModels {
    let on_x = chromosome.eq_ignore_ascii_case("X");
    let mut grouped: InheritanceModels = Vec::new();

    for phenotype in phenotypes {
        if let Some(wanted) = phenotype_number {
            if phenotype.phenotype_mim_number.as_deref() != Some(wanted) {
                continue;
            }
        }

        let mut models: BTreeSet<&str> = BTreeSet::new();
        if let Some(inheritance) = &phenotype.inheritance {
            for model in inheritance.split(';') {
                models.insert(model.trim());
            }
            for term in TERMS_BLACKLIST {
                models.remove(term);
            }
            let off_chromosome = if on_x { TERMS_AUTOSOMAL } else { TERMS_X };
            for term in off_chromosome {
                models.remove(term);
            }
        }

        let codes: BTreeSet<&str> = models
            .into_iter()
            .map(|model| {
                TERM_CODES
                    .iter()
                    .find(|(long, _)| *long == model)
                    .map_or(model, |(_, code)| *code)
            })
            .collect();
        let annotation = ModelAnnotation {
            models: codes.into_iter().map(str::to_string).collect(),
            description: phenotype.description.clone(),
        };

        let id = phenotype.phenotype_mim_number.clone();
        if let Some((_, annotations)) = grouped.iter_mut().find(|(group, _)| *group == id) {
            annotations.push(annotation);
        } else {
            grouped.push((id, vec![annotation]));
        }
    }

    grouped
}
