// DOM side of the "create exchange" form. The model (`ExchangeForm`) is the source of truth: every
// handler updates the model and then re-renders the affected rows from it.

use std::cell::RefCell;
use std::rc::Rc;

use itertools::Itertools;
use secret_santa::constraint_list::{ArrowDisplay, ConstraintList, ProbabilityLevel};
use secret_santa::form_stage::{
    ExchangeForm, FormStage, GIFTEE_FIELD, GIVER_FIELD, PARTICIPANT_FIELD,
    PROBABILITY_LEVEL_FIELD, StageError,
};
use secret_santa::internal_error_message;
use secret_santa::list_editor::{RowActionKind, RowActionOutcome};
use secret_santa::participant_list::ParticipantList;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

use crate::rust_error;
use crate::web_document::{web_document, WebDocument};
use crate::web_element_ext::{WebElementExt, WebEventTargetExt};
use crate::web_error_handling::{JsResult, js_error};
use crate::web_iterators::IntoHtmlCollectionIterator;
use crate::web_translation::{translate_or, validity_message};


const FORM_ID: &str = "participant-form";
const PARTICIPANT_SECTION_ID: &str = "participant-section";
const PARTICIPANT_LIST_ID: &str = "participant-list";
const ADD_PARTICIPANT_ID: &str = "add-participant";
const CONSTRAINT_SECTION_ID: &str = "constraint-section";
const CONSTRAINT_LIST_ID: &str = "constraint-list";
const ADD_CONSTRAINT_ID: &str = "add-constraint";
const NEXT_BUTTON_ID: &str = "next-button";
const GENERATE_BUTTON_ID: &str = "generate-button";

const PARTICIPANT_ROW_CLASS: &str = "participant-row";
const PARTICIPANT_NAME_CLASS: &str = "participant-name";
const DELETE_PARTICIPANT_CLASS: &str = "delete-participant";
const CONSTRAINT_ROW_CLASS: &str = "constraint-row";
const FROM_LABEL_CLASS: &str = "from-label";
const GIVER_CLASS: &str = "giver";
const ARROW_RIGHT_CLASS: &str = "arrow-right";
const ARROW_BOTH_CLASS: &str = "arrow-both";
const GIFTEE_CLASS: &str = "giftee";
const LEVEL_CLASS: &str = "probability-level";
const DELETE_CONSTRAINT_CLASS: &str = "delete-constraint";

const PLACEHOLDER_OPTION: &str = "—";

struct WebExchangeForm {
    form: ExchangeForm,
    form_node: HtmlFormElement,
    participant_section: web_sys::Element,
    participant_list: web_sys::Element,
    add_participant: web_sys::Element,
    constraint_section: web_sys::Element,
    constraint_list: web_sys::Element,
    next_button: web_sys::Element,
    generate_button: web_sys::Element,
}

type SharedForm = Rc<RefCell<WebExchangeForm>>;

// Things to do after the model borrow is released. Moving focus and reporting validity dispatch
// focus events synchronously, and their handlers borrow the model too.
enum FollowUp {
    Nothing,
    FocusParticipant(usize),
    FocusConstraint(usize),
    ReportValidity,
}

type Handler = fn(&mut WebExchangeForm, &web_sys::Event) -> JsResult<FollowUp>;

pub fn init_exchange_form() -> JsResult<()> {
    let document = web_document()?;
    let state = Rc::new(RefCell::new(WebExchangeForm::new(&document)?));
    state.borrow().render()?;

    let participant_list = state.borrow().participant_list.clone();
    let constraint_list = state.borrow().constraint_list.clone();
    let form_node = state.borrow().form_node.clone();
    listen(&*document.get_existing_element_by_id(ADD_PARTICIPANT_ID)?, "click", &state, on_add_participant)?;
    listen(&participant_list, "click", &state, on_participant_click)?;
    listen(&participant_list, "keydown", &state, on_participant_keydown)?;
    listen(&participant_list, "input", &state, on_participant_input)?;
    listen(&participant_list, "focusout", &state, on_participant_focusout)?;
    listen(&*document.get_existing_element_by_id(ADD_CONSTRAINT_ID)?, "click", &state, on_add_constraint)?;
    listen(&constraint_list, "click", &state, on_constraint_click)?;
    listen(&constraint_list, "change", &state, on_constraint_change)?;
    listen(&*document.get_existing_element_by_id(NEXT_BUTTON_ID)?, "click", &state, on_next)?;
    listen(&form_node, "submit", &state, on_submit)?;
    log::info!("Exchange form ready");
    Ok(())
}

fn listen(
    target: &web_sys::EventTarget, event_type: &str, state: &SharedForm, handler: Handler,
) -> JsResult<()> {
    let state = Rc::clone(state);
    target.add_event_listener_and_forget(event_type, move |event: web_sys::Event| {
        let follow_up = {
            let Ok(mut form) = state.try_borrow_mut() else {
                // Re-entrant dispatch, e.g. a focusout caused by removing the focused row.
                return Ok(());
            };
            handler(&mut *form, &event)?
        };
        follow_up.run(&state)
    })
}

impl FollowUp {
    fn run(self, state: &SharedForm) -> JsResult<()> {
        match self {
            FollowUp::Nothing => Ok(()),
            FollowUp::FocusParticipant(index) => {
                let list = state.borrow().participant_list.clone();
                focus_row_control::<HtmlInputElement>(&list, index, PARTICIPANT_NAME_CLASS)
            }
            FollowUp::FocusConstraint(index) => {
                let list = state.borrow().constraint_list.clone();
                focus_row_control::<HtmlSelectElement>(&list, index, GIVER_CLASS)
            }
            FollowUp::ReportValidity => {
                let form_node = state.borrow().form_node.clone();
                form_node.report_validity();
                Ok(())
            }
        }
    }
}

fn focus_row_control<T: JsCast + AsRef<web_sys::HtmlElement>>(
    list: &web_sys::Element, index: usize, class: &str,
) -> JsResult<()> {
    let Some(row) = list.children().item(index as u32) else {
        return Ok(());
    };
    let control = row.typed_child_by_class::<T>(class)?;
    AsRef::<web_sys::HtmlElement>::as_ref(&control).focus()
}

// Returns the event target together with the index of the row it belongs to, or `None` if the
// event did not originate inside a row.
fn event_row(event: &web_sys::Event, row_class: &str) -> JsResult<Option<(web_sys::Element, usize)>> {
    let Some(target) = event.target().and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return Ok(None);
    };
    let Some(row) = target.closest(&format!(".{row_class}"))? else {
        return Ok(None);
    };
    let index = row.child_index()?;
    Ok(Some((target, index)))
}

fn on_add_participant(this: &mut WebExchangeForm, _: &web_sys::Event) -> JsResult<FollowUp> {
    let index = this.form.participants_mut().add_participant();
    this.render()?;
    Ok(FollowUp::FocusParticipant(index))
}

fn on_participant_click(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    let Some((target, index)) = event_row(event, PARTICIPANT_ROW_CLASS)? else {
        return Ok(FollowUp::Nothing);
    };
    let classes = target.class_names();
    let Some(kind) = RowActionKind::from_control_classes(classes.iter().map(String::as_str)) else {
        return Ok(FollowUp::Nothing);
    };
    let outcome = this.form.participants_mut().apply(kind.with_row(index)).map_err(js_error)?;
    this.render()?;
    Ok(match outcome {
        RowActionOutcome::Added(index) => FollowUp::FocusParticipant(index),
        RowActionOutcome::Deleted(_) => FollowUp::Nothing,
    })
}

fn on_participant_keydown(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
        return Ok(FollowUp::Nothing);
    };
    let in_name_input = event_row(event, PARTICIPANT_ROW_CLASS)?
        .is_some_and(|(target, _)| target.has_class(PARTICIPANT_NAME_CLASS));
    if key_event.key() != "Enter" || !in_name_input {
        return Ok(FollowUp::Nothing);
    }
    // Enter would otherwise submit the form.
    event.prevent_default();
    let index = this.form.participants_mut().handle_enter_key();
    this.render()?;
    Ok(FollowUp::FocusParticipant(index))
}

fn on_participant_input(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    let Some((target, index)) = event_row(event, PARTICIPANT_ROW_CLASS)? else {
        return Ok(FollowUp::Nothing);
    };
    let Some(input) = target.dyn_ref::<HtmlInputElement>() else {
        return Ok(FollowUp::Nothing);
    };
    this.form.participants_mut().set_name(index, input.value()).map_err(js_error)?;
    this.render()?;
    Ok(FollowUp::Nothing)
}

fn on_participant_focusout(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    if event_row(event, PARTICIPANT_ROW_CLASS)?.is_none() {
        return Ok(FollowUp::Nothing);
    }
    this.form.participants_mut().validate_names();
    this.render()?;
    Ok(FollowUp::Nothing)
}

fn on_add_constraint(this: &mut WebExchangeForm, _: &web_sys::Event) -> JsResult<FollowUp> {
    let index = this.form.constraints_mut().add_constraint();
    this.render()?;
    Ok(FollowUp::FocusConstraint(index))
}

fn on_constraint_click(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    let Some((target, index)) = event_row(event, CONSTRAINT_ROW_CLASS)? else {
        return Ok(FollowUp::Nothing);
    };
    let classes = target.class_names();
    let Some(kind) = RowActionKind::from_control_classes(classes.iter().map(String::as_str)) else {
        return Ok(FollowUp::Nothing);
    };
    let outcome = this.form.constraints_mut().apply(kind.with_row(index)).map_err(js_error)?;
    this.render()?;
    Ok(match outcome {
        RowActionOutcome::Added(index) => FollowUp::FocusConstraint(index),
        RowActionOutcome::Deleted(_) => FollowUp::Nothing,
    })
}

fn on_constraint_change(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    let Some((target, index)) = event_row(event, CONSTRAINT_ROW_CLASS)? else {
        return Ok(FollowUp::Nothing);
    };
    let Some(select) = target.dyn_ref::<HtmlSelectElement>() else {
        return Ok(FollowUp::Nothing);
    };
    let value = select.value();
    let constraints = this.form.constraints_mut();
    if target.has_class(GIVER_CLASS) {
        constraints.set_giver(index, &value).map_err(js_error)?;
    } else if target.has_class(GIFTEE_CLASS) {
        constraints.set_giftee(index, &value).map_err(js_error)?;
    } else if target.has_class(LEVEL_CLASS) {
        constraints.set_level(index, &value).map_err(js_error)?;
    }
    this.render()?;
    Ok(FollowUp::Nothing)
}

fn on_next(this: &mut WebExchangeForm, _: &web_sys::Event) -> JsResult<FollowUp> { this.next() }

fn on_submit(this: &mut WebExchangeForm, event: &web_sys::Event) -> JsResult<FollowUp> {
    match this.form.stage() {
        FormStage::Participants => {
            // Enter in the last field submits the form. At this stage it means "next".
            event.prevent_default();
            this.next()
        }
        FormStage::Constraints => {
            let result = this.form.submit();
            this.render()?;
            match result {
                Ok(fields) => {
                    log::info!("Submitting exchange form with {} fields", fields.len());
                    Ok(FollowUp::Nothing)
                }
                Err(StageError::InvalidConstraints { .. }) => {
                    event.prevent_default();
                    Ok(FollowUp::ReportValidity)
                }
                Err(err) => {
                    event.prevent_default();
                    Err(rust_error!("{}", internal_error_message!("{}", err)))
                }
            }
        }
    }
}

impl WebExchangeForm {
    fn new(document: &WebDocument) -> JsResult<Self> {
        Ok(WebExchangeForm {
            form: ExchangeForm::with_participants(initial_participants(document)?),
            form_node: document.get_typed_element_by_id(FORM_ID)?,
            participant_section: document.get_existing_element_by_id(PARTICIPANT_SECTION_ID)?,
            participant_list: document.get_existing_element_by_id(PARTICIPANT_LIST_ID)?,
            add_participant: document.get_existing_element_by_id(ADD_PARTICIPANT_ID)?,
            constraint_section: document.get_existing_element_by_id(CONSTRAINT_SECTION_ID)?,
            constraint_list: document.get_existing_element_by_id(CONSTRAINT_LIST_ID)?,
            next_button: document.get_existing_element_by_id(NEXT_BUTTON_ID)?,
            generate_button: document.get_existing_element_by_id(GENERATE_BUTTON_ID)?,
        })
    }

    fn next(&mut self) -> JsResult<FollowUp> {
        let result = self.form.next();
        self.render()?;
        match result {
            Ok(()) => Ok(FollowUp::FocusConstraint(0)),
            Err(StageError::InvalidParticipants { .. }) => Ok(FollowUp::ReportValidity),
            Err(err) => Err(rust_error!("{}", internal_error_message!("{}", err))),
        }
    }

    fn render(&self) -> JsResult<()> {
        let view = self.form.view();
        render_participants(&self.participant_list, self.form.participants(), view.participants_enabled)?;
        render_constraints(&self.constraint_list, self.form.constraints())?;
        self.participant_section.toggle_attribute_with_force("disabled", !view.participants_enabled)?;
        self.add_participant.toggle_attribute_with_force("disabled", !view.participants_enabled)?;
        self.constraint_section.set_displayed(view.constraints_visible)?;
        self.constraint_section.toggle_attribute_with_force("disabled", !view.constraints_enabled)?;
        self.next_button.set_displayed(view.next_visible)?;
        self.generate_button.set_displayed(view.generate_visible)?;
        Ok(())
    }
}

// Names already present in the markup, e.g. when the server re-renders the form after an error.
fn initial_participants(document: &WebDocument) -> JsResult<ParticipantList> {
    let names = document
        .get_elements_by_class_name(PARTICIPANT_NAME_CLASS)
        .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .collect_vec();
    Ok(if names.is_empty() { ParticipantList::new() } else { ParticipantList::from_names(names) })
}

fn sync_row_count(
    list: &web_sys::Element, len: usize, new_row: fn() -> JsResult<web_sys::Element>,
) -> JsResult<()> {
    while list.child_element_count() as usize > len {
        match list.last_element_child() {
            Some(last) => last.remove(),
            None => break,
        }
    }
    while (list.child_element_count() as usize) < len {
        list.append_child(&*new_row()?)?;
    }
    Ok(())
}

fn render_participants(
    list: &web_sys::Element, participants: &ParticipantList, enabled: bool,
) -> JsResult<()> {
    sync_row_count(list, participants.len(), new_participant_row)?;
    for (node, row) in list.children().into_iterator().zip(participants.rows()) {
        let input: HtmlInputElement = node.typed_child_by_class(PARTICIPANT_NAME_CLASS)?;
        // Rewriting an unchanged value would move the caret.
        if input.value() != row.name {
            input.set_value(&row.name);
        }
        input.set_custom_validity(&validity_message(row.validity));
        input.set_disabled(!enabled);
        node.existing_child_by_class(DELETE_PARTICIPANT_CLASS)?
            .toggle_attribute_with_force("disabled", !enabled)?;
    }
    Ok(())
}

fn render_constraints(list: &web_sys::Element, constraints: &ConstraintList) -> JsResult<()> {
    sync_row_count(list, constraints.len(), new_constraint_row)?;
    let participant_options = with_placeholder(
        constraints.participants().iter().map(|name| (name.clone(), name.clone())),
    );
    for (node, row) in list.children().into_iterator().zip(constraints.rows()) {
        let giver: HtmlSelectElement = node.typed_child_by_class(GIVER_CLASS)?;
        let giftee: HtmlSelectElement = node.typed_child_by_class(GIFTEE_CLASS)?;
        let level: HtmlSelectElement = node.typed_child_by_class(LEVEL_CLASS)?;
        set_select_options(&giver, &participant_options)?;
        set_select_options(&giftee, &participant_options)?;
        giver.set_value(row.giver.as_deref().unwrap_or(""));
        giftee.set_value(row.giftee.as_deref().unwrap_or(""));
        level.set_value(row.level.as_ref().map_or("", |level| level.as_ref()));

        // The message goes to the first unfilled select, so that the browser points at it.
        let message = validity_message(row.validity);
        let mut message_target = None;
        for select in [&giver, &giftee, &level] {
            select.set_required(row.required);
            select.set_disabled(!row.enabled);
            select.set_custom_validity("");
            if message_target.is_none() && select.value().is_empty() {
                message_target = Some(select);
            }
        }
        message_target.unwrap_or(&giver).set_custom_validity(&message);

        render_arrows(&node, row.arrows())?;
        node.existing_child_by_class(DELETE_CONSTRAINT_CLASS)?
            .toggle_attribute_with_force("disabled", !row.enabled)?;
    }
    Ok(())
}

fn render_arrows(node: &web_sys::Element, arrows: ArrowDisplay) -> JsResult<()> {
    node.existing_child_by_class(ARROW_RIGHT_CLASS)?.set_displayed(arrows.arrow_right)?;
    node.existing_child_by_class(ARROW_BOTH_CLASS)?.set_displayed(arrows.arrow_both)?;
    node.existing_child_by_class(FROM_LABEL_CLASS)?.set_displayed(arrows.from_label)?;
    Ok(())
}

fn new_participant_row() -> JsResult<web_sys::Element> {
    let row = web_document()?.create_element("div")?.with_classes([PARTICIPANT_ROW_CLASS])?;
    row.append_new_element("input")?
        .with_classes([PARTICIPANT_NAME_CLASS])?
        .with_attribute("type", "text")?
        .with_attribute("name", PARTICIPANT_FIELD)?
        .with_attribute("autocomplete", "off")?;
    row.append_new_element("button")?
        .with_classes([DELETE_PARTICIPANT_CLASS])?
        .with_attribute("type", "button")?
        .with_attribute("aria-label", &translate_or("delete_participant", "Remove participant"))?
        .with_text_content("✕");
    Ok(row)
}

fn new_constraint_row() -> JsResult<web_sys::Element> {
    let row = web_document()?.create_element("div")?.with_classes([CONSTRAINT_ROW_CLASS])?;
    row.append_new_element("span")?
        .with_classes([FROM_LABEL_CLASS])?
        .with_text_content(&translate_or("from", "From"));
    append_select(&row, GIVER_CLASS, GIVER_FIELD)?;
    row.append_new_element("span")?.with_classes([ARROW_RIGHT_CLASS])?.with_text_content("→");
    row.append_new_element("span")?.with_classes([ARROW_BOTH_CLASS])?.with_text_content("↔");
    append_select(&row, GIFTEE_CLASS, GIFTEE_FIELD)?;
    let level = append_select(&row, LEVEL_CLASS, PROBABILITY_LEVEL_FIELD)?;
    set_select_options(&level, &level_options())?;
    row.append_new_element("button")?
        .with_classes([DELETE_CONSTRAINT_CLASS])?
        .with_attribute("type", "button")?
        .with_attribute("aria-label", &translate_or("delete_constraint", "Remove constraint"))?
        .with_text_content("✕");
    Ok(row)
}

fn append_select(row: &web_sys::Element, class: &str, field: &str) -> JsResult<HtmlSelectElement> {
    row.append_new_element("select")?
        .with_classes([class])?
        .with_attribute("name", field)?
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| rust_error!("Cannot create select \"{}\"", class))
}

fn with_placeholder(options: impl Iterator<Item = (String, String)>) -> Vec<(String, String)> {
    std::iter::once((String::new(), PLACEHOLDER_OPTION.to_owned())).chain(options).collect()
}

fn level_options() -> Vec<(String, String)> {
    with_placeholder(
        ProbabilityLevel::iter().map(|level| (level.as_ref().to_owned(), level_label(level))),
    )
}

fn level_label(level: ProbabilityLevel) -> String {
    let default = match level {
        ProbabilityLevel::Never => "never",
        ProbabilityLevel::OnePastExchange => "not if gifted in the last exchange",
        ProbabilityLevel::TwoPastExchanges => "not if gifted in the last 2 exchanges",
        ProbabilityLevel::ThreePastExchanges => "not if gifted in the last 3 exchanges",
    };
    translate_or(level.as_ref(), default)
}

// Keeps the current selection when the option list is unchanged.
fn set_select_options(select: &HtmlSelectElement, options: &[(String, String)]) -> JsResult<()> {
    let current = (0..select.length())
        .filter_map(|idx| select.item(idx))
        .filter_map(|node| node.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect_vec();
    if current.iter().eq(options.iter().map(|(value, _)| value)) {
        return Ok(());
    }
    select.remove_all_children();
    for (value, label) in options {
        let option = HtmlOptionElement::new_with_text_and_value(label, value)?;
        select.append_child(&option)?;
    }
    Ok(())
}
