use std::cell::RefCell;
use std::rc::Rc;

use itertools::Itertools;
use secret_santa::result_page::ResultPage;
use web_sys::HtmlDialogElement;

use crate::rust_error;
use crate::web_document::{web_document, web_window};
use crate::web_element_ext::{WebElementExt, WebEventTargetExt};
use crate::web_error_handling::JsResult;


const CONFIRMATION_DIALOG_ID: &str = "name-confirmation";
const YES_BUTTON_ID: &str = "yes-button";
const NO_BUTTON_ID: &str = "no-button";
const RESULT_CONTENT_ID: &str = "result-content";
const SPOILER_COVER_CLASS: &str = "spoiler-cover";

struct Spoiler {
    cover: web_sys::Element,
    content: web_sys::Element,
}

struct WebResultPage {
    page: ResultPage,
    dialog: HtmlDialogElement,
    content: web_sys::Element,
    spoilers: Vec<Spoiler>,
}

impl WebResultPage {
    fn render(&self) -> JsResult<()> {
        if self.page.is_modal_open() && !self.dialog.open() {
            self.dialog.show_modal()?;
        } else if !self.page.is_modal_open() && self.dialog.open() {
            self.dialog.close();
        }
        self.content.set_displayed(self.page.is_content_visible())?;
        for (index, spoiler) in self.spoilers.iter().enumerate() {
            let revealed = self.page.is_spoiler_revealed(index);
            spoiler.cover.set_displayed(!revealed)?;
            spoiler.content.set_displayed(revealed)?;
        }
        Ok(())
    }
}

// Each cover hides the element right after it.
fn find_spoilers() -> JsResult<Vec<Spoiler>> {
    web_document()?
        .get_elements_by_class_name(SPOILER_COVER_CLASS)
        .map(|cover| {
            let content = cover
                .next_element_sibling()
                .ok_or_else(|| rust_error!("Spoiler cover without content"))?;
            Ok(Spoiler { cover, content })
        })
        .collect()
}

pub fn init_result_page() -> JsResult<()> {
    let document = web_document()?;
    let spoilers = find_spoilers()?;
    let covers = spoilers.iter().map(|spoiler| spoiler.cover.clone()).collect_vec();
    let state = Rc::new(RefCell::new(WebResultPage {
        page: ResultPage::new(spoilers.len()),
        dialog: document.get_typed_element_by_id(CONFIRMATION_DIALOG_ID)?,
        content: document.get_existing_element_by_id(RESULT_CONTENT_ID)?,
        spoilers,
    }));

    // The first "pageshow" may fire before this code is loaded.
    {
        let mut this = state.borrow_mut();
        this.page.on_page_show();
        this.render()?;
    }
    {
        let state = Rc::clone(&state);
        web_window()?.add_event_listener_and_forget("pageshow", move |_: web_sys::Event| {
            let mut this = state.borrow_mut();
            this.page.on_page_show();
            this.render()
        })?;
    }
    {
        let state = Rc::clone(&state);
        document.get_existing_element_by_id(YES_BUTTON_ID)?.add_event_listener_and_forget(
            "click",
            move |_: web_sys::Event| {
                let mut this = state.borrow_mut();
                this.page.confirm();
                log::info!("Identity confirmed, showing result");
                this.render()
            },
        )?;
    }
    {
        let state = Rc::clone(&state);
        document.get_existing_element_by_id(NO_BUTTON_ID)?.add_event_listener_and_forget(
            "click",
            move |_: web_sys::Event| {
                let navigation = {
                    let mut this = state.borrow_mut();
                    let navigation = this.page.decline();
                    this.render()?;
                    navigation
                };
                web_window()?.location().set_href(navigation.href())
            },
        )?;
    }
    {
        // Escape would close the dialog without an answer.
        let dialog = state.borrow().dialog.clone();
        dialog.add_event_listener_and_forget("cancel", move |event: web_sys::Event| {
            event.prevent_default();
            Ok(())
        })?;
    }
    for (index, cover) in covers.into_iter().enumerate() {
        let state = Rc::clone(&state);
        cover.add_event_listener_and_forget("click", move |_: web_sys::Event| {
            let mut this = state.borrow_mut();
            if this.page.reveal_spoiler(index) {
                this.render()?;
            }
            Ok(())
        })?;
    }
    Ok(())
}
