//! The (complexity, screen type) -> hours lookup table.
//!
//! The calculator only ever sees the [`HourMappingProvider`] trait. The API
//! layer loads every mapping row once per request into an [`HourMatrix`] and
//! passes that in, so calculation itself never touches the database.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::Hours;

/// Source of mapped hours for a (complexity, screen type) pair.
pub trait HourMappingProvider {
    /// Hours for the pair, or `None` when no mapping row exists.
    fn lookup_hours(&self, complexity: &str, screen_type: &str) -> Option<Hours>;
}

impl<T: HourMappingProvider + ?Sized> HourMappingProvider for &T {
    fn lookup_hours(&self, complexity: &str, screen_type: &str) -> Option<Hours> {
        (**self).lookup_hours(complexity, screen_type)
    }
}

/// In-memory hour matrix keyed by complexity name, then screen type name.
#[derive(Debug, Clone, Default)]
pub struct HourMatrix {
    cells: HashMap<String, HashMap<String, Hours>>,
}

impl HourMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hours for a pair, returning the previous value if any.
    pub fn insert(
        &mut self,
        complexity: impl Into<String>,
        screen_type: impl Into<String>,
        hours: Hours,
    ) -> Option<Hours> {
        self.cells
            .entry(complexity.into())
            .or_default()
            .insert(screen_type.into(), hours)
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C, S> FromIterator<(C, S, Hours)> for HourMatrix
where
    C: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, S, Hours)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for (complexity, screen_type, hours) in iter {
            matrix.insert(complexity, screen_type, hours);
        }
        matrix
    }
}

impl HourMappingProvider for HourMatrix {
    fn lookup_hours(&self, complexity: &str, screen_type: &str) -> Option<Hours> {
        self.cells
            .get(complexity)
            .and_then(|row| row.get(screen_type))
            .copied()
    }
}

// ---------------------------------------------------------------------------
// Grid view
// ---------------------------------------------------------------------------

/// One cell of the admin matrix view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub screen_type: String,
    /// `None` when the pair has no mapping row.
    pub hours: Option<Hours>,
}

/// One complexity row of the admin matrix view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub complexity: String,
    pub cells: Vec<MatrixCell>,
}

/// Lay out every complexity against every screen type, in the given order.
pub fn build_grid<P: HourMappingProvider>(
    provider: &P,
    complexities: &[&str],
    screen_types: &[&str],
) -> Vec<MatrixRow> {
    complexities
        .iter()
        .map(|&complexity| MatrixRow {
            complexity: complexity.to_string(),
            cells: screen_types
                .iter()
                .map(|&screen_type| MatrixCell {
                    screen_type: screen_type.to_string(),
                    hours: provider.lookup_hours(complexity, screen_type),
                })
                .collect(),
        })
        .collect()
}
