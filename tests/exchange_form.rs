mod common;

use common::*;
use pretty_assertions::assert_eq;
use secret_santa::form_stage::{ExchangeForm, FormStage, StageError, StageView};
use secret_santa::validity::ValidityError;


fn form_with(names: &[&str]) -> ExchangeForm { ExchangeForm::with_participants(filled_list(names)) }

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn initial_view() {
    let form = ExchangeForm::new();
    assert_eq!(form.stage(), FormStage::Participants);
    assert_eq!(
        form.view(),
        StageView {
            participants_enabled: true,
            constraints_visible: false,
            constraints_enabled: false,
            next_visible: true,
            generate_visible: false,
        }
    );
}

#[test]
fn next_populates_constraint_options() {
    let mut form = form_with(&["Alice", "Bob", "", "Charlie"]);
    form.next().unwrap();
    assert_eq!(form.stage(), FormStage::Constraints);
    assert_eq!(form.constraints().participants(), &["Alice", "Bob", "Charlie"]);
    assert_eq!(
        form.view(),
        StageView {
            participants_enabled: false,
            constraints_visible: true,
            constraints_enabled: true,
            next_visible: false,
            generate_visible: true,
        }
    );
}

#[test]
fn next_is_blocked_by_too_few_participants() {
    let mut form = form_with(&["Alice", "Bob"]);
    assert_eq!(form.next(), Err(StageError::InvalidParticipants { first_invalid_row: Some(2) }));
    assert_eq!(form.stage(), FormStage::Participants);
    assert_eq!(names_of(form.participants()), vec!["Alice", "Bob", ""]);

    // Still blocked until the padding row is filled.
    assert!(form.next().is_err());
    form.participants_mut().set_name(2, "Charlie").unwrap();
    form.next().unwrap();
}

#[test]
fn next_is_blocked_by_duplicates() {
    let mut form = form_with(&["A", "B", "A", "C"]);
    assert_eq!(form.next(), Err(StageError::InvalidParticipants { first_invalid_row: Some(0) }));
    assert_eq!(
        validity_of(form.participants()),
        vec![Some(ValidityError::DuplicateName), None, Some(ValidityError::DuplicateName), None]
    );
}

#[test]
fn submit_requires_constraint_stage() {
    let mut form = form_with(&["Alice", "Bob", "Charlie"]);
    assert_eq!(
        form.submit(),
        Err(StageError::WrongStage {
            expected: FormStage::Constraints,
            actual: FormStage::Participants,
        })
    );
}

#[test]
fn disabled_fields_are_posted_on_submit() {
    let mut form = form_with(&["Alice", "Bob", "Charlie"]);
    form.next().unwrap();
    // While in the constraint stage the participant inputs are disabled and would not be posted.
    assert!(!form.posted_fields().iter().any(|(field, _)| field == "participant"));

    let constraints = form.constraints_mut();
    constraints.set_giver(0, "Alice").unwrap();
    constraints.set_giftee(0, "Bob").unwrap();
    constraints.set_level(0, "never").unwrap();
    assert_eq!(
        form.submit().unwrap(),
        fields(&[
            ("participant", "Alice"),
            ("participant", "Bob"),
            ("participant", "Charlie"),
            ("giver", "Alice"),
            ("giftee", "Bob"),
            ("probability_level", "never"),
        ])
    );
    assert!(form.view().participants_enabled);
}

#[test]
fn incomplete_constraint_blocks_submit() {
    let mut form = form_with(&["Alice", "Bob", "Charlie"]);
    form.next().unwrap();
    let index = form.constraints_mut().add_constraint();
    form.constraints_mut().set_giver(index, "Charlie").unwrap();
    assert_eq!(
        form.submit(),
        Err(StageError::InvalidConstraints { first_invalid_row: Some(1) })
    );
    assert!(!form.view().participants_enabled);
}
