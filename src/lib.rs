#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod config;
pub mod constraint_list;
pub mod error;
pub mod form_stage;
pub mod list_editor;
pub mod name_check;
pub mod participant_list;
pub mod result_page;
pub mod test_util;
pub mod util;
pub mod validity;
