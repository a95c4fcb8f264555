// Browser bindings for the Secret Santa pages. Each page calls exactly one of the `init_*` functions
// once the module is loaded.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod web_document;
mod web_element_ext;
mod web_error_handling;
mod web_exchange_form;
mod web_iterators;
mod web_logger;
mod web_rename_form;
mod web_result_page;
mod web_transport;
mod web_translation;

use secret_santa::name_check::{RenameContext, RenameTarget};
use wasm_bindgen::prelude::*;

pub use web_error_handling::{JsResult, RustError, last_panic, set_panic_hook};
pub use web_translation::set_translations;


fn init_page() {
    set_panic_hook();
    web_logger::init_logger(log::LevelFilter::Info);
}

// The "create exchange" page: participant list, then constraints.
#[wasm_bindgen]
pub fn init_create_page() -> JsResult<()> {
    init_page();
    web_exchange_form::init_exchange_form()
}

#[wasm_bindgen]
pub fn init_rename_exchange_page(current_name: Option<String>) -> JsResult<()> {
    init_page();
    web_rename_form::init_rename_form(RenameTarget::Exchange { current_name })
}

#[wasm_bindgen]
pub fn init_rename_participant_page(exchange_slug: String, old_name: String) -> JsResult<()> {
    init_page();
    web_rename_form::init_rename_form(RenameTarget::Participant(RenameContext {
        exchange_slug,
        old_name,
    }))
}

#[wasm_bindgen]
pub fn init_result_page() -> JsResult<()> {
    init_page();
    web_result_page::init_result_page()
}
