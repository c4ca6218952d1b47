use crate::registry::Field;

/// One row of a gene list.
///
/// Every canonical column is always present; a missing value is the empty
/// string, never an absent key. The record additionally carries the
/// resolved official symbol as a scratch annotation for later enrichment
/// stages; it is not part of the registry and never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: [String; Field::COUNT],
    official_symbol: String,
}

impl Record {
    /// Create a record with every column empty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a column value
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Set a column value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Whether a column holds a non-empty value
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        !self.values[field.index()].is_empty()
    }

    /// The record's diagnostic identity: its current HGNC symbol
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.get(Field::HgncSymbol)
    }

    /// The comma-separated candidate symbols, in caller priority order
    #[must_use]
    pub fn candidate_symbols(&self) -> Vec<String> {
        self.symbol()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The resolved official symbol, if an enrichment stage set one
    #[must_use]
    pub fn official_symbol(&self) -> &str {
        &self.official_symbol
    }

    pub fn set_official_symbol(&mut self, symbol: impl Into<String>) {
        self.official_symbol = symbol.into();
    }
}

/// A partial record returned by an external source, to be merged into an
/// existing record with source precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    entries: Vec<(Field, String)>,
}

impl Fragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value for the same field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
    }

    /// Builder-style [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// The fields this fragment defines, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Fragment, Record};
    use crate::registry::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_values_are_empty_strings() {
        let record = Record::new();
        for field in Field::ALL {
            assert_eq!(record.get(field), "");
            assert!(!record.has(field));
        }
    }

    #[test]
    fn candidate_symbols_skip_empty_entries() {
        let mut record = Record::new();
        record.set(Field::HgncSymbol, "SCN1A,,SCN2A");
        assert_eq!(record.candidate_symbols(), vec!["SCN1A", "SCN2A"]);
    }

    #[test]
    fn fragment_set_replaces() {
        let mut fragment = Fragment::new();
        fragment.set(Field::Chromosome, "1");
        fragment.set(Field::Chromosome, "X");
        assert_eq!(fragment.get(Field::Chromosome), Some("X"));
        assert_eq!(fragment.iter().count(), 1);
    }
}
