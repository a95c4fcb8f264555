use std::collections::HashMap;
use std::hash::Hash;

use itertools::Itertools;


// Occurrence count for each non-empty string. Empty strings are unfilled inputs and never
// count as duplicates of each other.
pub fn non_empty_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    values.into_iter().filter(|v| !v.is_empty()).counts()
}

pub fn count_distinct<T: Eq + Hash + Clone>(values: impl IntoIterator<Item = T>) -> usize {
    values.into_iter().unique().count()
}
