//! TOML configuration naming the local source dumps.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths to the dumped source data a fetch run resolves against.
///
/// ```toml
/// genes = "dumps/genes.tsv"
/// transcripts = "dumps/transcripts.tsv"
/// phenotypes = "dumps/phenotypes.json"
/// nomenclature = "dumps/nomenclature.json"
/// proteins = "dumps/proteins.json"
/// symbol_table = "dumps/mim2gene.txt"
/// ```
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub genes: PathBuf,
    pub transcripts: Option<PathBuf>,
    pub phenotypes: PathBuf,
    pub nomenclature: PathBuf,
    pub proteins: PathBuf,
    pub symbol_table: PathBuf,
}

impl SourceConfig {
    /// Load a config file. Relative dump paths are resolved against the
    /// config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let mut config: SourceConfig = toml::from_str(&content)
            .with_context(|| format!("cannot parse config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.genes = resolve(base, &config.genes);
            config.transcripts = config.transcripts.map(|p| resolve(base, &p));
            config.phenotypes = resolve(base, &config.phenotypes);
            config.nomenclature = resolve(base, &config.nomenclature);
            config.proteins = resolve(base, &config.proteins);
            config.symbol_table = resolve(base, &config.symbol_table);
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::SourceConfig;
    use std::io::Write;

    #[test]
    fn relative_paths_resolve_against_the_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sources.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            "genes = \"dumps/genes.tsv\"\n\
             phenotypes = \"dumps/phenotypes.json\"\n\
             nomenclature = \"dumps/nomenclature.json\"\n\
             proteins = \"/abs/proteins.json\"\n\
             symbol_table = \"dumps/mim2gene.txt\""
        )
        .unwrap();

        let config = SourceConfig::load(&config_path).unwrap();
        assert_eq!(config.genes, dir.path().join("dumps/genes.tsv"));
        assert_eq!(config.proteins.to_str(), Some("/abs/proteins.json"));
        assert!(config.transcripts.is_none());
    }
}
