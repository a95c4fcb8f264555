// Editable list of form rows, used for both participants and constraints.
//
// Invariants:
//   - the list is never empty;
//   - a new row is always derived from the last row, which acts as a template.

use crate::error::ListEditError;


pub trait ListRow: Clone {
    // Turns a copy of the last row into a fresh row to be appended.
    fn clear_for_new(&mut self);

    // Resets the only remaining row when the user asks to delete it.
    fn clear_for_reset(&mut self);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RowActionKind {
    Add,
    Delete,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RowAction {
    Add,
    Delete(usize),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RowDeletion {
    Removed,
    Cleared,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RowActionOutcome {
    // Index of the new row. This is the row that should receive focus.
    Added(usize),
    Deleted(RowDeletion),
}

// Markup control class to action. Clicks inside a list are delegated to the list container,
// so the class of the clicked control is the only thing that tells us what to do.
const CONTROL_CLASSES: &[(&str, RowActionKind)] = &[
    ("add-participant", RowActionKind::Add),
    ("delete-participant", RowActionKind::Delete),
    ("add-constraint", RowActionKind::Add),
    ("delete-constraint", RowActionKind::Delete),
];

impl RowActionKind {
    pub fn from_control_class(class: &str) -> Option<Self> {
        CONTROL_CLASSES
            .iter()
            .find(|(control_class, _)| *control_class == class)
            .map(|(_, kind)| *kind)
    }

    // Returns the first class in `classes` that denotes an action.
    pub fn from_control_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        classes.into_iter().find_map(Self::from_control_class)
    }

    pub fn with_row(self, row_index: usize) -> RowAction {
        match self {
            RowActionKind::Add => RowAction::Add,
            RowActionKind::Delete => RowAction::Delete(row_index),
        }
    }
}

impl RowAction {
    pub fn kind(self) -> RowActionKind {
        match self {
            RowAction::Add => RowActionKind::Add,
            RowAction::Delete(_) => RowActionKind::Delete,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RowList<R> {
    rows: Vec<R>,
}

impl<R: ListRow> RowList<R> {
    pub fn new(initial: R) -> Self { RowList { rows: vec![initial] } }

    pub fn from_rows(rows: impl IntoIterator<Item = R>, template: R) -> Self {
        let mut rows = rows.into_iter().collect::<Vec<_>>();
        if rows.is_empty() {
            rows.push(template);
        }
        RowList { rows }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_sole_row(&self) -> bool { self.rows.len() == 1 }

    pub fn rows(&self) -> &[R] { &self.rows }
    pub fn rows_mut(&mut self) -> &mut [R] { &mut self.rows }

    pub fn row(&self, index: usize) -> Result<&R, ListEditError> {
        let len = self.rows.len();
        self.rows.get(index).ok_or(ListEditError::NoSuchRow { index, len })
    }
    pub fn row_mut(&mut self, index: usize) -> Result<&mut R, ListEditError> {
        let len = self.rows.len();
        self.rows.get_mut(index).ok_or(ListEditError::NoSuchRow { index, len })
    }

    pub fn add_row(&mut self) -> usize {
        let mut row = self.rows[self.rows.len() - 1].clone();
        row.clear_for_new();
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn delete_row(&mut self, index: usize) -> Result<RowDeletion, ListEditError> {
        self.row(index)?;
        if self.is_sole_row() {
            self.rows[index].clear_for_reset();
            Ok(RowDeletion::Cleared)
        } else {
            self.rows.remove(index);
            Ok(RowDeletion::Removed)
        }
    }

    pub fn apply(&mut self, action: RowAction) -> Result<RowActionOutcome, ListEditError> {
        match action {
            RowAction::Add => Ok(RowActionOutcome::Added(self.add_row())),
            RowAction::Delete(index) => self.delete_row(index).map(RowActionOutcome::Deleted),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Debug)]
    struct TestRow(String);

    impl ListRow for TestRow {
        fn clear_for_new(&mut self) { self.0.clear(); }
        fn clear_for_reset(&mut self) { self.0 = "reset".to_owned(); }
    }

    fn row(s: &str) -> TestRow { TestRow(s.to_owned()) }

    #[test]
    fn add_clones_last_row() {
        let mut list = RowList::from_rows([row("a"), row("b")], row(""));
        assert_eq!(list.add_row(), 2);
        assert_eq!(list.rows(), &[row("a"), row("b"), row("")]);
    }

    #[test]
    fn sole_row_is_reset_instead_of_removed() {
        let mut list = RowList::new(row("a"));
        assert_eq!(list.delete_row(0), Ok(RowDeletion::Cleared));
        assert_eq!(list.rows(), &[row("reset")]);
    }

    #[test]
    fn delete_out_of_range() {
        let mut list = RowList::new(row("a"));
        assert_eq!(list.delete_row(3), Err(ListEditError::NoSuchRow { index: 3, len: 1 }));
    }

    #[test]
    fn dispatch_by_control_class() {
        let mut list = RowList::from_rows([row("a"), row("b")], row(""));
        let kind = RowActionKind::from_control_classes(["button", "delete-participant"]).unwrap();
        assert_eq!(
            list.apply(kind.with_row(0)),
            Ok(RowActionOutcome::Deleted(RowDeletion::Removed))
        );
        assert_eq!(list.rows(), &[row("b")]);
        assert_eq!(RowActionKind::from_control_class("participant-name"), None);
    }

    #[test]
    fn never_empty() {
        let mut list = RowList::from_rows([], row("template"));
        assert_eq!(list.len(), 1);
        for step in 0..20 {
            if step % 3 == 0 {
                list.apply(RowAction::Add).unwrap();
            } else {
                list.apply(RowAction::Delete(0)).unwrap();
            }
            assert!(list.len() >= 1);
        }
    }
}
