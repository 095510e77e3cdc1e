use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// FactTable

/// The ordered, append-only record sequence for one (owner type, category)
/// pair.
///
/// Records are 1-indexed: index 0 is reserved as the "empty / not found"
/// sentinel and never addresses a record. Iteration order is exactly
/// declaration order, which consumers such as serializers rely on.
///
/// A table holds at most [`MAX_RECORDS`](Self::MAX_RECORDS) records; the
/// ceiling is fixed and exceeding it is a declaration-time error, surfaced
/// by the registry as
/// [`DeclareError::CapacityOverflow`](crate::DeclareError::CapacityOverflow).
#[derive(Debug)]
pub struct FactTable<R> {
    records: Vec<R>,
}

/// Marker for a push onto a full table.
pub(crate) struct FactTableFull;

impl<R> FactTable<R> {
    /// The fixed capacity ceiling per table.
    pub const MAX_RECORDS: usize = 255;

    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends one record, returning its 1-based index.
    pub(crate) fn push(&mut self, record: R) -> Result<usize, FactTableFull> {
        if self.records.len() >= Self::MAX_RECORDS {
            return Err(FactTableFull);
        }
        self.records.push(record);
        Ok(self.records.len())
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records have been declared.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at the given 1-based index.
    ///
    /// Index 0 (the sentinel) and out-of-range indices return `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index.checked_sub(1)?)
    }

    /// Returns an iterator over the records in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Visits the records in declaration order.
    ///
    /// Stops early and returns `false` the first time `f` returns `false`;
    /// otherwise returns `true` after visiting all records. An empty table is
    /// a vacuous success with no callback invocations.
    pub fn for_each<F: FnMut(&R) -> bool>(&self, mut f: F) -> bool {
        for record in &self.records {
            if !f(record) {
                return false;
            }
        }
        true
    }
}

impl<'a, R> IntoIterator for &'a FactTable<R> {
    type Item = &'a R;
    type IntoIter = core::slice::Iter<'a, R>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
