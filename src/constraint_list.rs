use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ListEditError;
use crate::list_editor::{ListRow, RowAction, RowActionOutcome, RowDeletion, RowList};
use crate::validity::ValidityError;


// How strongly a giver→giftee pairing should be avoided.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, AsRefStr, Display,
    Serialize, Deserialize,
)]
pub enum ProbabilityLevel {
    // Never pair these two people, in either direction.
    #[strum(serialize = "never")]
    #[serde(rename = "never")]
    Never,
    // The pairing was used in the previous exchange.
    #[strum(serialize = "1_past_exchange")]
    #[serde(rename = "1_past_exchange")]
    OnePastExchange,
    #[strum(serialize = "2_past_exchange")]
    #[serde(rename = "2_past_exchange")]
    TwoPastExchanges,
    #[strum(serialize = "3_past_exchange")]
    #[serde(rename = "3_past_exchange")]
    ThreePastExchanges,
}

impl ProbabilityLevel {
    pub fn is_mutual(self) -> bool { self == ProbabilityLevel::Never }

    pub fn arrow(self) -> &'static str { if self.is_mutual() { "↔" } else { "→" } }
}

// Which of the row decorations are visible. A mutual rule reads "A ↔ B", a one-way rule reads
// "from A → B".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArrowDisplay {
    pub arrow_right: bool,
    pub arrow_both: bool,
    pub from_label: bool,
}

impl ArrowDisplay {
    pub fn for_level(level: Option<ProbabilityLevel>) -> Self {
        let mutual = level.is_some_and(ProbabilityLevel::is_mutual);
        ArrowDisplay {
            arrow_right: !mutual,
            arrow_both: mutual,
            from_label: !mutual,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Constraint {
    pub giver: String,
    pub giftee: String,
    pub level: ProbabilityLevel,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}: {}", self.giver, self.level.arrow(), self.giftee, self.level)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConstraintRow {
    pub giver: Option<String>,
    pub giftee: Option<String>,
    pub level: Option<ProbabilityLevel>,
    pub required: bool,
    pub enabled: bool,
    pub validity: Option<ValidityError>,
}

impl ConstraintRow {
    // The row present when the page loads: nothing selected, and nothing needs to be, since an
    // exchange without constraints is perfectly fine. Disabled until the participant list is
    // confirmed.
    pub fn blank() -> Self {
        ConstraintRow {
            giver: None,
            giftee: None,
            level: None,
            required: false,
            enabled: false,
            validity: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.giver.is_none() && self.giftee.is_none() && self.level.is_none()
    }

    pub fn to_constraint(&self) -> Option<Constraint> {
        Some(Constraint {
            giver: self.giver.clone()?,
            giftee: self.giftee.clone()?,
            level: self.level?,
        })
    }

    pub fn arrows(&self) -> ArrowDisplay { ArrowDisplay::for_level(self.level) }
}

impl ListRow for ConstraintRow {
    fn clear_for_new(&mut self) {
        *self = ConstraintRow {
            required: true,
            enabled: true,
            ..ConstraintRow::blank()
        };
    }
    fn clear_for_reset(&mut self) {
        *self = ConstraintRow { enabled: self.enabled, ..ConstraintRow::blank() };
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Giver,
    Giftee,
}

#[derive(Clone, Debug)]
pub struct ConstraintList {
    rows: RowList<ConstraintRow>,
    // Options for both the giver and the giftee selects.
    participants: Vec<String>,
}

impl ConstraintList {
    pub fn new() -> Self {
        ConstraintList {
            rows: RowList::new(ConstraintRow::blank()),
            participants: vec![],
        }
    }

    pub fn rows(&self) -> &[ConstraintRow] { self.rows.rows() }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn participants(&self) -> &[String] { &self.participants }

    pub fn set_participants(&mut self, names: Vec<String>) {
        self.participants = names;
        let participants = &self.participants;
        let keep = |value: &mut Option<String>| {
            if value.as_ref().is_some_and(|v| !participants.contains(v)) {
                *value = None;
            }
        };
        for row in self.rows.rows_mut() {
            keep(&mut row.giver);
            keep(&mut row.giftee);
        }
    }

    pub fn add_constraint(&mut self) -> usize { self.rows.add_row() }

    pub fn delete_constraint(&mut self, index: usize) -> Result<RowDeletion, ListEditError> {
        self.rows.delete_row(index)
    }

    pub fn apply(&mut self, action: RowAction) -> Result<RowActionOutcome, ListEditError> {
        self.rows.apply(action)
    }

    pub fn set_giver(&mut self, index: usize, value: &str) -> Result<(), ListEditError> {
        self.set_participant(index, Side::Giver, value)
    }

    pub fn set_giftee(&mut self, index: usize, value: &str) -> Result<(), ListEditError> {
        self.set_participant(index, Side::Giftee, value)
    }

    // Returns the new arrow state, so that the caller can update the row decorations.
    pub fn set_level(&mut self, index: usize, value: &str) -> Result<ArrowDisplay, ListEditError> {
        let level = if value.is_empty() {
            None
        } else {
            Some(value.parse::<ProbabilityLevel>().map_err(|_| {
                ListEditError::UnknownOption { value: value.to_owned() }
            })?)
        };
        let row = self.rows.row_mut(index)?;
        row.level = level;
        row.validity = None;
        Ok(row.arrows())
    }

    pub fn arrows(&self, index: usize) -> Result<ArrowDisplay, ListEditError> {
        Ok(self.rows.row(index)?.arrows())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        for row in self.rows.rows_mut() {
            row.enabled = enabled;
        }
    }

    // A row must be either complete or, if optional, completely blank. Returns true if all rows
    // pass.
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        for row in self.rows.rows_mut() {
            let incomplete = row.to_constraint().is_none() && (row.required || !row.is_blank());
            row.validity = incomplete.then_some(ValidityError::IncompleteConstraint);
            valid &= !incomplete;
        }
        valid
    }

    pub fn first_invalid_row(&self) -> Option<usize> {
        self.rows().iter().position(|row| row.validity.is_some())
    }

    pub fn constraints(&self) -> Vec<Constraint> {
        self.rows().iter().filter_map(ConstraintRow::to_constraint).collect()
    }

    fn set_participant(
        &mut self, index: usize, side: Side, value: &str,
    ) -> Result<(), ListEditError> {
        let value = if value.is_empty() {
            None
        } else if self.participants.iter().any(|p| p == value) {
            Some(value.to_owned())
        } else {
            return Err(ListEditError::UnknownOption { value: value.to_owned() });
        };
        let row = self.rows.row_mut(index)?;
        match side {
            Side::Giver => row.giver = value,
            Side::Giftee => row.giftee = value,
        }
        row.validity = None;
        Ok(())
    }
}
