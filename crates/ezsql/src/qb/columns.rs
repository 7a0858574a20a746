//! Ordered column → literal assignments for INSERT and UPDATE.

use crate::error::SqlResult;
use crate::ident::{Identifier, IntoIdentifier};
use crate::qb::literal::Literal;

/// Column assignments in insertion order.
///
/// Setting a column that is already present replaces its value and keeps its
/// original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnMap {
    columns: Vec<Identifier>,
    values: Vec<Literal>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `column`.
    pub fn insert(&mut self, column: Identifier, value: impl Into<Literal>) -> &mut Self {
        let value = value.into();
        match self.columns.iter().position(|c| *c == column) {
            Some(idx) => self.values[idx] = value,
            None => {
                self.columns.push(column);
                self.values.push(value);
            }
        }
        self
    }

    /// Assign by name, validating the column identifier.
    pub fn set(
        &mut self,
        column: impl IntoIdentifier,
        value: impl Into<Literal>,
    ) -> SqlResult<&mut Self> {
        let column = column.into_identifier()?;
        Ok(self.insert(column, value))
    }

    /// Consuming variant of [`ColumnMap::set`].
    pub fn with(
        mut self,
        column: impl IntoIdentifier,
        value: impl Into<Literal>,
    ) -> SqlResult<Self> {
        self.set(column, value)?;
        Ok(self)
    }

    pub fn get(&self, column: &str) -> Option<&Literal> {
        self.columns
            .iter()
            .position(|c| c.name() == column)
            .map(|idx| &self.values[idx])
    }

    /// Remove a column, returning its value.
    pub fn remove(&mut self, column: &str) -> Option<Literal> {
        let idx = self.columns.iter().position(|c| c.name() == column)?;
        self.columns.remove(idx);
        Some(self.values.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.values.clear();
    }

    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    pub fn values(&self) -> &[Literal] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Literal)> {
        self.columns.iter().zip(self.values.iter())
    }
}

impl FromIterator<(Identifier, Literal)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (Identifier, Literal)>>(iter: I) -> Self {
        let mut map = ColumnMap::new();
        for (column, value) in iter {
            map.insert(column, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ColumnMap {
    type Item = (&'a Identifier, &'a Literal);
    type IntoIter = std::iter::Zip<std::slice::Iter<'a, Identifier>, std::slice::Iter<'a, Literal>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter().zip(self.values.iter())
    }
}
