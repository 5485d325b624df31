//! Catalog of isotope cards, loaded from two flat tables.
//!
//! The element table maps atomic numbers to symbols (`1,H`); the nuclide
//! table lists one card per line
//! (`atomic,isotope,stability_flag,beta_minus,beta_plus,alpha`). Lines whose
//! first non-blank character is `#` are comments. Both tables are read once
//! at startup; the catalog is read-only afterwards.
//!
//! Cards are keyed by their `(atomic, isotope)` coordinate in a map, so
//! uniqueness is structural and lookup is O(1). Absence of a card is not an
//! error — it means "off the playable board".

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use nuclidio_logic::{DecayChannels, IsotopeCard, Nuclide};

/// Immutable set of isotope cards keyed by chart coordinate.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: HashMap<Nuclide, IsotopeCard>,
    max_atomic_num: i32,
    max_isotope_num: i32,
}

impl Catalog {
    /// Read the two table files and build the catalog.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        elements_path: P,
        nuclides_path: Q,
    ) -> Result<Catalog, CatalogError> {
        let elements = std::fs::read_to_string(elements_path)?;
        let nuclides = std::fs::read_to_string(nuclides_path)?;
        Self::from_tables(&elements, &nuclides)
    }

    /// Parse the two tables from memory.
    pub fn from_tables(elements: &str, nuclides: &str) -> Result<Catalog, CatalogError> {
        let labels = parse_element_table(elements)?;

        let mut cards = HashMap::new();
        let mut max_atomic_num = 0;
        let mut max_isotope_num = 0;

        for (line, row) in table_rows(nuclides) {
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() != 6 {
                return Err(CatalogError::Malformed {
                    table: NUCLIDE_TABLE,
                    line,
                    reason: format!("expected 6 fields, found {}", fields.len()),
                });
            }

            let atomic_num: i32 = parse_field(fields[0], NUCLIDE_TABLE, line, "atomic number")?;
            let isotope_num: i32 = parse_field(fields[1], NUCLIDE_TABLE, line, "isotope number")?;
            if atomic_num < 1 || isotope_num < 1 {
                return Err(CatalogError::Malformed {
                    table: NUCLIDE_TABLE,
                    line,
                    reason: "atomic and isotope numbers must be positive".to_string(),
                });
            }

            let stable = match fields[2] {
                "1" => true,
                "0" => false,
                other => {
                    return Err(CatalogError::Malformed {
                        table: NUCLIDE_TABLE,
                        line,
                        reason: format!("stability flag must be 0 or 1, found {:?}", other),
                    })
                }
            };

            let channels = DecayChannels::new(
                parse_field(fields[3], NUCLIDE_TABLE, line, "beta-minus probability")?,
                parse_field(fields[4], NUCLIDE_TABLE, line, "beta-plus probability")?,
                parse_field(fields[5], NUCLIDE_TABLE, line, "alpha probability")?,
            );

            let label = labels
                .get(&atomic_num)
                .ok_or(CatalogError::UnknownElement { atomic_num, line })?;

            let nuclide = Nuclide::new(atomic_num, isotope_num);
            let card = IsotopeCard::new(nuclide, label.clone(), stable, channels);
            card.validate().map_err(|reason| CatalogError::Malformed {
                table: NUCLIDE_TABLE,
                line,
                reason,
            })?;

            match cards.entry(nuclide) {
                Entry::Vacant(slot) => {
                    slot.insert(card);
                }
                Entry::Occupied(_) => {
                    return Err(CatalogError::Duplicate {
                        atomic_num,
                        isotope_num,
                        line,
                    })
                }
            }

            max_atomic_num = max_atomic_num.max(atomic_num);
            max_isotope_num = max_isotope_num.max(isotope_num);
        }

        Ok(Catalog {
            cards,
            max_atomic_num,
            max_isotope_num,
        })
    }

    /// Look up the card at a coordinate. `None` means off the board.
    pub fn find(&self, nuclide: Nuclide) -> Option<&IsotopeCard> {
        self.cards.get(&nuclide)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &IsotopeCard> {
        self.cards.values()
    }

    /// Highest atomic number on the board (0 for an empty catalog).
    pub fn max_atomic_num(&self) -> i32 {
        self.max_atomic_num
    }

    /// Highest isotope number on the board (0 for an empty catalog).
    pub fn max_isotope_num(&self) -> i32 {
        self.max_isotope_num
    }
}

const ELEMENT_TABLE: &str = "elements";
const NUCLIDE_TABLE: &str = "nuclides";

/// Data rows of a table with 1-based line numbers; comments and blank
/// lines are skipped but still counted.
fn table_rows(table: &str) -> impl Iterator<Item = (usize, &str)> {
    table
        .lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.trim()))
        .filter(|(_, row)| !row.is_empty() && !row.starts_with('#'))
}

fn parse_element_table(elements: &str) -> Result<HashMap<i32, String>, CatalogError> {
    let mut labels = HashMap::new();
    for (line, row) in table_rows(elements) {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() != 2 || fields[1].is_empty() {
            return Err(CatalogError::Malformed {
                table: ELEMENT_TABLE,
                line,
                reason: "expected `atomic_number,label`".to_string(),
            });
        }
        let atomic_num: i32 = parse_field(fields[0], ELEMENT_TABLE, line, "atomic number")?;
        if atomic_num < 1 {
            return Err(CatalogError::Malformed {
                table: ELEMENT_TABLE,
                line,
                reason: "atomic number must be positive".to_string(),
            });
        }
        if labels.insert(atomic_num, fields[1].to_string()).is_some() {
            return Err(CatalogError::Malformed {
                table: ELEMENT_TABLE,
                line,
                reason: format!("duplicate label for atomic number {}", atomic_num),
            });
        }
    }
    Ok(labels)
}

fn parse_field<T: FromStr>(
    field: &str,
    table: &'static str,
    line: usize,
    what: &str,
) -> Result<T, CatalogError> {
    field.parse().map_err(|_| CatalogError::Malformed {
        table,
        line,
        reason: format!("bad {}: {:?}", what, field),
    })
}

/// Errors that can occur while loading the card tables. All are fatal at
/// startup.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Malformed {
        table: &'static str,
        line: usize,
        reason: String,
    },
    UnknownElement {
        atomic_num: i32,
        line: usize,
    },
    Duplicate {
        atomic_num: i32,
        isotope_num: i32,
        line: usize,
    },
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "IO error: {}", e),
            CatalogError::Malformed {
                table,
                line,
                reason,
            } => {
                write!(f, "{} table, line {}: {}", table, line, reason)
            }
            CatalogError::UnknownElement { atomic_num, line } => {
                write!(
                    f,
                    "nuclides table, line {}: atomic number {} has no entry in the element table",
                    line, atomic_num
                )
            }
            CatalogError::Duplicate {
                atomic_num,
                isotope_num,
                line,
            } => {
                write!(
                    f,
                    "nuclides table, line {}: duplicate card for (Z={}, I={})",
                    line, atomic_num, isotope_num
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ELEMENTS: &str = "1,H\n2,He\n";

    #[test]
    fn test_parses_cards_and_skips_comments() {
        let nuclides = "\
# atomic,isotope,stable,bm,bp,a
1,1,1,0,0,0

1,3,0,0.8,0,0
2,4,1,0,0,0
";
        let catalog = Catalog::from_tables(ELEMENTS, nuclides).unwrap();
        assert_eq!(catalog.len(), 3);

        let tritium = catalog.find(Nuclide::new(1, 3)).unwrap();
        assert_eq!(tritium.label, "H");
        assert!(!tritium.stable);
        assert_eq!(tritium.channels.beta_minus, 0.8);

        assert!(catalog.find(Nuclide::new(1, 2)).is_none());
        assert_eq!(catalog.max_atomic_num(), 2);
        assert_eq!(catalog.max_isotope_num(), 4);
    }

    #[test]
    fn test_find_is_repeatable() {
        let catalog = Catalog::from_tables(ELEMENTS, "1,1,1,0,0,0\n").unwrap();
        let a = catalog.find(Nuclide::new(1, 1)).cloned();
        let b = catalog.find(Nuclide::new(1, 1)).cloned();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_element_is_fatal() {
        let err = Catalog::from_tables(ELEMENTS, "3,6,1,0,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownElement {
                atomic_num: 3,
                line: 1
            }
        ));
    }

    #[test]
    fn test_duplicate_coordinate_is_fatal() {
        let nuclides = "1,1,1,0,0,0\n1,1,0,0.5,0,0\n";
        let err = Catalog::from_tables(ELEMENTS, nuclides).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { line: 2, .. }));
    }

    #[test]
    fn test_malformed_rows() {
        // Wrong field count.
        assert!(Catalog::from_tables(ELEMENTS, "1,1,1,0,0\n").is_err());
        // Unparseable probability.
        assert!(Catalog::from_tables(ELEMENTS, "1,1,0,high,0,0\n").is_err());
        // Stability flag outside {0,1}.
        assert!(Catalog::from_tables(ELEMENTS, "1,1,yes,0,0,0\n").is_err());
        // Nonpositive coordinate.
        assert!(Catalog::from_tables(ELEMENTS, "0,1,1,0,0,0\n").is_err());
    }

    #[test]
    fn test_card_invariants_checked_at_load() {
        // Stable card with an open channel.
        let err = Catalog::from_tables(ELEMENTS, "1,1,1,0.5,0,0\n").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 1, .. }));
        // Unstable card with every channel closed.
        assert!(Catalog::from_tables(ELEMENTS, "1,1,0,0,0,0\n").is_err());
    }

    #[test]
    fn test_malformed_element_table() {
        assert!(Catalog::from_tables("1\n", "1,1,1,0,0,0\n").is_err());
        assert!(Catalog::from_tables("x,H\n", "1,1,1,0,0,0\n").is_err());
        // Nonpositive atomic number.
        assert!(Catalog::from_tables("0,H\n", "1,1,1,0,0,0\n").is_err());
    }

    #[test]
    fn test_duplicate_element_label_is_fatal() {
        let err = Catalog::from_tables("1,H\n1,D\n", "1,1,1,0,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Malformed {
                table: "elements",
                line: 2,
                ..
            }
        ));
    }
}
