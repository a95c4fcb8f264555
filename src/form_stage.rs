// The exchange creation form is filled in two stages: first the participants, then the
// constraints between them. The constraint selects can only be populated once the participant
// list is final, so the participant section is frozen (disabled) during the second stage.
//
// Disabling is purely a UI device. Disabled controls are excluded from the POST body by browsers,
// so everything is re-enabled right before the form is submitted.

use std::fmt;

use crate::constraint_list::ConstraintList;
use crate::participant_list::ParticipantList;


pub const PARTICIPANT_FIELD: &str = "participant";
pub const GIVER_FIELD: &str = "giver";
pub const GIFTEE_FIELD: &str = "giftee";
pub const PROBABILITY_LEVEL_FIELD: &str = "probability_level";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormStage {
    Participants,
    Constraints,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StageView {
    pub participants_enabled: bool,
    pub constraints_visible: bool,
    pub constraints_enabled: bool,
    pub next_visible: bool,
    pub generate_visible: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StageError {
    // The form should ask the browser to report validity: the offending row already carries
    // a validity error.
    InvalidParticipants { first_invalid_row: Option<usize> },
    InvalidConstraints { first_invalid_row: Option<usize> },
    WrongStage { expected: FormStage, actual: FormStage },
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::InvalidParticipants { .. } => write!(f, "participant list is invalid"),
            StageError::InvalidConstraints { .. } => write!(f, "constraint list is invalid"),
            StageError::WrongStage { expected, actual } => {
                write!(f, "expected stage {expected:?}, but the form is at {actual:?}")
            }
        }
    }
}

impl std::error::Error for StageError {}

#[derive(Clone, Debug)]
pub struct ExchangeForm {
    stage: FormStage,
    participants: ParticipantList,
    constraints: ConstraintList,
    participants_enabled: bool,
}

impl ExchangeForm {
    pub fn new() -> Self { Self::with_participants(ParticipantList::new()) }

    pub fn with_participants(participants: ParticipantList) -> Self {
        ExchangeForm {
            stage: FormStage::Participants,
            participants,
            constraints: ConstraintList::new(),
            participants_enabled: true,
        }
    }

    pub fn stage(&self) -> FormStage { self.stage }
    pub fn participants(&self) -> &ParticipantList { &self.participants }
    pub fn participants_mut(&mut self) -> &mut ParticipantList { &mut self.participants }
    pub fn constraints(&self) -> &ConstraintList { &self.constraints }
    pub fn constraints_mut(&mut self) -> &mut ConstraintList { &mut self.constraints }

    pub fn view(&self) -> StageView {
        let constraints_stage = self.stage == FormStage::Constraints;
        StageView {
            participants_enabled: self.participants_enabled,
            constraints_visible: constraints_stage,
            constraints_enabled: constraints_stage,
            next_visible: !constraints_stage,
            generate_visible: constraints_stage,
        }
    }

    // Moves on to the constraint stage. On failure the participant rows carry the validity
    // errors to be reported.
    pub fn next(&mut self) -> Result<(), StageError> {
        if self.stage != FormStage::Participants {
            return Err(StageError::WrongStage {
                expected: FormStage::Participants,
                actual: self.stage,
            });
        }
        let names_unique = self.participants.validate_names();
        let enough_participants = self.participants.ensure_min_participants();
        if !(names_unique && enough_participants && self.participants.is_valid()) {
            return Err(StageError::InvalidParticipants {
                first_invalid_row: self.participants.first_invalid_row(),
            });
        }
        self.constraints.set_participants(self.participants.names());
        self.constraints.set_enabled(true);
        self.participants_enabled = false;
        self.stage = FormStage::Constraints;
        log::info!(
            "Participants confirmed: {} people",
            self.participants.num_distinct_names()
        );
        Ok(())
    }

    // Validates the constraints and re-enables every disabled control. Returns the fields that
    // the browser will post, in document order.
    pub fn submit(&mut self) -> Result<Vec<(String, String)>, StageError> {
        if self.stage != FormStage::Constraints {
            return Err(StageError::WrongStage {
                expected: FormStage::Constraints,
                actual: self.stage,
            });
        }
        if !self.constraints.validate() {
            return Err(StageError::InvalidConstraints {
                first_invalid_row: self.constraints.first_invalid_row(),
            });
        }
        self.participants_enabled = true;
        self.constraints.set_enabled(true);
        Ok(self.posted_fields())
    }

    // Fields of enabled controls. Empty participant inputs are still posted (as empty strings),
    // same as a real form would do.
    pub fn posted_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![];
        if self.participants_enabled {
            for row in self.participants.rows() {
                fields.push((PARTICIPANT_FIELD.to_owned(), row.name.clone()));
            }
        }
        for row in self.constraints.rows().iter().filter(|row| row.enabled) {
            let level = row.level.map(|level| level.as_ref().to_owned());
            for (field, value) in [
                (GIVER_FIELD, row.giver.clone()),
                (GIFTEE_FIELD, row.giftee.clone()),
                (PROBABILITY_LEVEL_FIELD, level),
            ] {
                fields.push((field.to_owned(), value.unwrap_or_default()));
            }
        }
        fields
    }
}
