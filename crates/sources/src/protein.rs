//! JSON-dump-backed protein-annotation source.

use crate::error::Result;
use crate::{cleanup_description, ProteinAnnotations};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Protein annotations backed by a JSON dump: an object mapping UniProt
/// id to the recommended protein name.
#[derive(Debug, Default)]
pub struct ProteinDump {
    descriptions: HashMap<String, String>,
}

impl ProteinDump {
    #[must_use]
    pub fn from_map(descriptions: HashMap<String, String>) -> Self {
        Self { descriptions }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let descriptions: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(path)?)?;
        log::debug!("Loaded {} protein descriptions", descriptions.len());
        Ok(Self { descriptions })
    }
}

impl ProteinAnnotations for ProteinDump {
    fn description(&mut self, uniprot_id: &str) -> Result<Option<String>> {
        Ok(self
            .descriptions
            .get(uniprot_id)
            .map(|text| cleanup_description(text)))
    }
}
