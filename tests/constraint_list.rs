use pretty_assertions::assert_eq;
use secret_santa::constraint_list::{
    ArrowDisplay, Constraint, ConstraintList, ConstraintRow, ProbabilityLevel,
};
use secret_santa::error::ListEditError;
use secret_santa::list_editor::RowDeletion;
use secret_santa::test_util::sample_names;
use secret_santa::validity::ValidityError;
use strum::IntoEnumIterator;


fn sample_list() -> ConstraintList {
    let mut list = ConstraintList::new();
    list.set_participants(sample_names().into_iter().map(str::to_owned).collect());
    list.set_enabled(true);
    list
}

#[test]
fn never_shows_bidirectional_arrow() {
    assert_eq!(
        ArrowDisplay::for_level(Some(ProbabilityLevel::Never)),
        ArrowDisplay { arrow_right: false, arrow_both: true, from_label: false }
    );
}

#[test]
fn other_levels_show_directional_arrow() {
    let one_way = ArrowDisplay { arrow_right: true, arrow_both: false, from_label: true };
    assert_eq!(ArrowDisplay::for_level(None), one_way);
    for level in ProbabilityLevel::iter().filter(|level| *level != ProbabilityLevel::Never) {
        assert_eq!(ArrowDisplay::for_level(Some(level)), one_way);
    }
}

#[test]
fn set_level_updates_arrows() {
    let mut list = sample_list();
    assert!(list.set_level(0, "never").unwrap().arrow_both);
    assert!(list.arrows(0).unwrap().arrow_both);
    assert!(list.set_level(0, "2_past_exchange").unwrap().arrow_right);
    assert!(list.set_level(0, "").unwrap().from_label);
}

#[test]
fn unknown_options_are_rejected() {
    let mut list = sample_list();
    assert_eq!(
        list.set_level(0, "sometimes"),
        Err(ListEditError::UnknownOption { value: "sometimes".to_owned() })
    );
    assert_eq!(
        list.set_giver(0, "Mallory"),
        Err(ListEditError::UnknownOption { value: "Mallory".to_owned() })
    );
}

#[test]
fn added_row_is_empty_required_and_enabled() {
    let mut list = sample_list();
    list.set_giver(0, "Alice").unwrap();
    list.set_level(0, "never").unwrap();
    let index = list.add_constraint();
    assert_eq!(index, 1);
    let row = &list.rows()[index];
    assert_eq!(
        row,
        &ConstraintRow { required: true, enabled: true, ..ConstraintRow::blank() }
    );
    assert_eq!(row.arrows(), ArrowDisplay::for_level(None));
}

#[test]
fn deleting_sole_row_resets_selects() {
    let mut list = sample_list();
    list.set_giver(0, "Alice").unwrap();
    list.set_giftee(0, "Bob").unwrap();
    list.set_level(0, "1_past_exchange").unwrap();
    assert_eq!(list.delete_constraint(0), Ok(RowDeletion::Cleared));
    assert_eq!(list.len(), 1);
    assert!(list.rows()[0].is_blank());
    assert!(list.rows()[0].enabled);
}

#[test]
fn blank_optional_row_is_valid() {
    let mut list = sample_list();
    assert!(list.validate());
    assert!(list.constraints().is_empty());
}

#[test]
fn incomplete_rows_are_invalid() {
    let mut list = sample_list();
    list.set_giver(0, "Alice").unwrap();
    list.add_constraint();
    assert!(!list.validate());
    assert_eq!(list.rows()[0].validity, Some(ValidityError::IncompleteConstraint));
    assert_eq!(list.rows()[1].validity, Some(ValidityError::IncompleteConstraint));
    assert_eq!(list.first_invalid_row(), Some(0));
}

#[test]
fn complete_rows_become_constraints() {
    let mut list = sample_list();
    list.set_giver(0, "Alice").unwrap();
    list.set_giftee(0, "Bob").unwrap();
    list.set_level(0, "never").unwrap();
    let index = list.add_constraint();
    list.set_giver(index, "Charlie").unwrap();
    list.set_giftee(index, "Dave").unwrap();
    list.set_level(index, "3_past_exchange").unwrap();
    assert!(list.validate());
    assert_eq!(
        list.constraints(),
        vec![
            Constraint {
                giver: "Alice".to_owned(),
                giftee: "Bob".to_owned(),
                level: ProbabilityLevel::Never,
            },
            Constraint {
                giver: "Charlie".to_owned(),
                giftee: "Dave".to_owned(),
                level: ProbabilityLevel::ThreePastExchanges,
            },
        ]
    );
}

#[test]
fn changing_participants_drops_stale_selections() {
    let mut list = sample_list();
    list.set_giver(0, "Alice").unwrap();
    list.set_giftee(0, "Bob").unwrap();
    list.set_participants(vec!["Bob".to_owned(), "Charlie".to_owned(), "Dave".to_owned()]);
    assert_eq!(list.rows()[0].giver, None);
    assert_eq!(list.rows()[0].giftee.as_deref(), Some("Bob"));
}
