// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use secret_santa::participant_list::ParticipantList;
use secret_santa::validity::ValidityError;


#[allow(dead_code)]
pub fn validity_of(list: &ParticipantList) -> Vec<Option<ValidityError>> {
    list.rows().iter().map(|row| row.validity).collect()
}

#[allow(dead_code)]
pub fn names_of(list: &ParticipantList) -> Vec<&str> {
    list.rows().iter().map(|row| row.name.as_str()).collect()
}

#[allow(dead_code)]
pub fn filled_list(names: &[&str]) -> ParticipantList { ParticipantList::from_names(names.iter().copied()) }
