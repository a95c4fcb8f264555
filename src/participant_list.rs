use itertools::Itertools;

use crate::error::ListEditError;
use crate::list_editor::{ListRow, RowAction, RowActionOutcome, RowDeletion, RowList};
use crate::util::{count_distinct, non_empty_counts};
use crate::validity::ValidityError;


// A gift exchange with fewer people is either trivial or impossible.
pub const MIN_PARTICIPANTS: usize = 3;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ParticipantRow {
    pub name: String,
    pub validity: Option<ValidityError>,
}

impl ParticipantRow {
    pub fn new(name: impl Into<String>) -> Self { ParticipantRow { name: name.into(), validity: None } }

    pub fn is_empty(&self) -> bool { self.name.is_empty() }
}

impl ListRow for ParticipantRow {
    fn clear_for_new(&mut self) {
        self.name.clear();
        self.validity = None;
    }
    fn clear_for_reset(&mut self) {
        self.name.clear();
        self.validity = None;
    }
}

#[derive(Clone, Debug)]
pub struct ParticipantList {
    rows: RowList<ParticipantRow>,
}

impl ParticipantList {
    pub fn new() -> Self { ParticipantList { rows: RowList::new(ParticipantRow::default()) } }

    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        ParticipantList {
            rows: RowList::from_rows(
                names.into_iter().map(ParticipantRow::new),
                ParticipantRow::default(),
            ),
        }
    }

    pub fn rows(&self) -> &[ParticipantRow] { self.rows.rows() }
    pub fn len(&self) -> usize { self.rows.len() }

    pub fn add_participant(&mut self) -> usize { self.rows.add_row() }

    pub fn delete_participant(&mut self, index: usize) -> Result<RowDeletion, ListEditError> {
        self.rows.delete_row(index)
    }

    pub fn apply(&mut self, action: RowAction) -> Result<RowActionOutcome, ListEditError> {
        self.rows.apply(action)
    }

    // Enter inside a name input must never submit the form: it adds another participant instead.
    // The row the key was pressed in doesn't matter, the new row always goes to the end.
    pub fn handle_enter_key(&mut self) -> usize { self.add_participant() }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), ListEditError> {
        let row = self.rows.row_mut(index)?;
        row.name = name.into();
        if !row.is_empty() && row.validity == Some(ValidityError::NotEnoughParticipants) {
            row.validity = None;
        }
        Ok(())
    }

    // Non-empty names in row order, duplicates included.
    pub fn names(&self) -> Vec<String> {
        self.rows().iter().filter(|row| !row.is_empty()).map(|row| row.name.clone()).collect()
    }

    pub fn distinct_names(&self) -> Vec<String> { self.names().into_iter().unique().collect() }

    pub fn num_distinct_names(&self) -> usize {
        count_distinct(self.rows().iter().filter(|row| !row.is_empty()).map(|row| &row.name))
    }

    // Flags every row whose name occurs more than once. Returns true if all names are unique.
    pub fn validate_names(&mut self) -> bool {
        let duplicates = non_empty_counts(self.rows().iter().map(|row| row.name.as_str()))
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name.to_owned())
            .collect::<Vec<_>>();
        for row in self.rows.rows_mut() {
            if duplicates.contains(&row.name) {
                row.validity = Some(ValidityError::DuplicateName);
            } else if row.validity == Some(ValidityError::DuplicateName) {
                row.validity = None;
            }
        }
        if !duplicates.is_empty() {
            log::debug!("Duplicate participant names: {}", duplicates.iter().join(", "));
        }
        duplicates.is_empty()
    }

    // Makes sure there is room for at least `MIN_PARTICIPANTS` people. If there are too few
    // names, appends empty rows and marks all empty rows invalid, so that native form validation
    // points the user to them. Returns true if the minimum is met.
    pub fn ensure_min_participants(&mut self) -> bool {
        let num_distinct = self.num_distinct_names();
        if num_distinct >= MIN_PARTICIPANTS {
            for row in self.rows.rows_mut() {
                if row.validity == Some(ValidityError::NotEnoughParticipants) {
                    row.validity = None;
                }
            }
            return true;
        }
        let missing = MIN_PARTICIPANTS - num_distinct;
        while self.len() < MIN_PARTICIPANTS || self.num_empty_rows() < missing {
            self.rows.add_row();
        }
        for row in self.rows.rows_mut() {
            if row.is_empty() {
                row.validity = Some(ValidityError::NotEnoughParticipants);
            }
        }
        log::debug!("Only {num_distinct} distinct participants, need {MIN_PARTICIPANTS}");
        false
    }

    pub fn is_valid(&self) -> bool { self.rows().iter().all(|row| row.validity.is_none()) }

    pub fn first_invalid_row(&self) -> Option<usize> {
        self.rows().iter().position(|row| row.validity.is_some())
    }

    fn num_empty_rows(&self) -> usize { self.rows().iter().filter(|row| row.is_empty()).count() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_key_appends_row() {
        let mut list = ParticipantList::from_names(["A", "B"]);
        assert_eq!(list.handle_enter_key(), 2);
        assert_eq!(list.names(), vec!["A", "B"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn filling_row_clears_missing_participant_error() {
        let mut list = ParticipantList::from_names(["A"]);
        assert!(!list.ensure_min_participants());
        list.set_name(1, "B").unwrap();
        assert_eq!(list.rows()[1].validity, None);
        assert_eq!(list.rows()[2].validity, Some(ValidityError::NotEnoughParticipants));
    }
}
