//! Static table of well-known landmarks, the geocoder's last resort.

use crate::model::Coordinate;

/// Ordered mapping from lowercase substring to coordinate.
///
/// Lookup returns the first entry whose key occurs in the normalized query,
/// so more specific keys must precede shorter ones they contain.
#[derive(Debug, Clone, Default)]
pub struct KnownLocationTable {
    entries: Vec<(String, Coordinate)>,
}

impl KnownLocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Landmarks around central Helsinki.
    pub fn helsinki() -> Self {
        Self::new()
            .with("kamppi center", Coordinate::new(60.1694, 24.9327))
            .with("kamppi", Coordinate::new(60.1694, 24.9327))
            .with("olympic stadium", Coordinate::new(60.1841, 24.9256))
            .with("university of helsinki", Coordinate::new(60.1699, 24.95))
            .with("helsinki central station", Coordinate::new(60.1718, 24.9414))
            .with("helsinki airport", Coordinate::new(60.3172, 24.9633))
            .with("suomenlinna", Coordinate::new(60.1454, 24.9881))
    }

    pub fn with(mut self, key: impl AsRef<str>, coordinate: Coordinate) -> Self {
        self.entries
            .push((key.as_ref().trim().to_lowercase(), coordinate));
        self
    }

    pub fn lookup(&self, query: &str) -> Option<Coordinate> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(key, _)| normalized.contains(key.as_str()))
            .map(|(_, coordinate)| *coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let table = KnownLocationTable::helsinki();
        assert_eq!(
            table.lookup("  Suomenlinna Fortress "),
            Some(Coordinate::new(60.1454, 24.9881))
        );
    }

    #[test]
    fn test_lookup_matches_substring() {
        let table = KnownLocationTable::helsinki();
        assert_eq!(
            table.lookup("Meet at Helsinki Airport terminal 2"),
            Some(Coordinate::new(60.3172, 24.9633))
        );
    }

    #[test]
    fn test_lookup_first_entry_wins() {
        let table = KnownLocationTable::new()
            .with("kamppi center", Coordinate::new(1.0, 1.0))
            .with("kamppi", Coordinate::new(2.0, 2.0));
        assert_eq!(table.lookup("Kamppi Center"), Some(Coordinate::new(1.0, 1.0)));
        assert_eq!(table.lookup("Kamppi metro"), Some(Coordinate::new(2.0, 2.0)));
    }

    #[test]
    fn test_lookup_miss() {
        let table = KnownLocationTable::helsinki();
        assert_eq!(table.lookup("Tampere"), None);
        assert_eq!(table.lookup("   "), None);
    }
}
