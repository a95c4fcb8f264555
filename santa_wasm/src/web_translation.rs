use std::cell::RefCell;

use secret_santa::validity::{Catalogue, Translator, ValidityError};
use wasm_bindgen::prelude::*;

use crate::web_error_handling::{JsResult, js_error};


thread_local! {
    static CATALOGUE: RefCell<Catalogue> = RefCell::new(Catalogue::default());
}

// Installs the message catalogue for the page language: a JSON object from message key to text.
// Untranslated keys fall back to English.
#[wasm_bindgen]
pub fn set_translations(catalogue_json: &str) -> JsResult<()> {
    let catalogue = Catalogue::from_json(catalogue_json).map_err(js_error)?;
    CATALOGUE.with(|cell| *cell.borrow_mut() = catalogue);
    Ok(())
}

pub fn translate_or(key: &str, default: &str) -> String {
    CATALOGUE.with(|cell| cell.borrow().translate(key)).unwrap_or_else(|| default.to_owned())
}

// Empty message means "valid", which is what `setCustomValidity` expects.
pub fn validity_message(error: Option<ValidityError>) -> String {
    match error {
        None => String::new(),
        Some(error) => CATALOGUE.with(|cell| error.message(&*cell.borrow())),
    }
}
