// Rename forms for an exchange and for a participant. Submission is intercepted until the server
// confirms that the new name is free.

use std::cell::RefCell;
use std::rc::Rc;

use secret_santa::config::ClientConfig;
use secret_santa::name_check::{NameChecker, RenameForm, RenameTarget, SubmitDecision};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement};

use crate::web_document::{web_document, web_window};
use crate::web_element_ext::WebEventTargetExt;
use crate::web_error_handling::{JsResult, js_error};
use crate::web_transport::FetchTransport;
use crate::web_translation::validity_message;


const RENAME_EXCHANGE_FORM_ID: &str = "rename_exchange";
const EXCHANGE_NAME_INPUT_ID: &str = "exchange_name";
const RENAME_PARTICIPANT_FORM_ID: &str = "rename_participant";
const PARTICIPANT_NAME_INPUT_ID: &str = "participant_name";
const SUBMIT_CONTROL_SELECTOR: &str = "button:not([type=button]), input[type=submit]";

pub fn init_rename_form(target: RenameTarget) -> JsResult<()> {
    let (form_id, input_id) = match target {
        RenameTarget::Exchange { .. } => (RENAME_EXCHANGE_FORM_ID, EXCHANGE_NAME_INPUT_ID),
        RenameTarget::Participant(_) => (RENAME_PARTICIPANT_FORM_ID, PARTICIPANT_NAME_INPUT_ID),
    };
    let document = web_document()?;
    let form_node: HtmlFormElement = document.get_typed_element_by_id(form_id)?;
    let input: HtmlInputElement = document.get_typed_element_by_id(input_id)?;

    // The check endpoints live on the same server that rendered the page.
    let config = ClientConfig::default().with_server_url(web_window()?.location().origin()?);
    let checker = Rc::new(NameChecker::from_config(FetchTransport::new(), &config).map_err(js_error)?);
    let form = Rc::new(RefCell::new(RenameForm::new(target)));
    form.borrow_mut().set_value(input.value());

    {
        let form = Rc::clone(&form);
        let input_node = input.clone();
        input.add_event_listener_and_forget("input", move |_: web_sys::Event| {
            form.borrow_mut().set_value(input_node.value());
            input_node.set_custom_validity("");
            Ok(())
        })?;
    }

    {
        // Native validation runs right after the submit control's click. A transient error (failed
        // check) must be gone by then, or the retry would never reach the submit handler.
        let form = Rc::clone(&form);
        let input_node = input.clone();
        form_node.add_event_listener_and_forget("click", move |event: web_sys::Event| {
            let on_submit_control = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .map(|target| target.closest(SUBMIT_CONTROL_SELECTOR))
                .transpose()?
                .flatten()
                .is_some();
            if on_submit_control && form.borrow().validity().is_none() {
                input_node.set_custom_validity("");
            }
            Ok(())
        })?;
    }

    let submit_target = form_node.clone();
    submit_target.add_event_listener_and_forget("submit", move |event: web_sys::Event| {
        event.prevent_default();
        let Some(request) = form.borrow_mut().begin_submit() else {
            return Ok(());
        };
        let form = Rc::clone(&form);
        let checker = Rc::clone(&checker);
        let form_node = form_node.clone();
        let input = input.clone();
        spawn_local(async move {
            let outcome = checker.check(&request).await;
            let decision = form.borrow_mut().finish_submit(&outcome);
            match decision {
                SubmitDecision::Submit => {
                    log::info!("Name \"{}\" is available, submitting", request.candidate());
                    // `submit()` does not fire the submit event, so this is not intercepted again.
                    if let Err(err) = form_node.submit() {
                        log::error!("Cannot submit rename form: {err:?}");
                    }
                }
                SubmitDecision::Report(err) => {
                    input.set_custom_validity(&validity_message(Some(err)));
                    form_node.report_validity();
                }
            }
        });
        Ok(())
    })
}
