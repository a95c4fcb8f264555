use wasm_bindgen::JsCast;

use crate::rust_error;
use crate::web_error_handling::JsResult;
use crate::web_iterators::HtmlCollectionIterator;


pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn get_existing_element_by_id(&self, element_id: &str) -> JsResult<web_sys::Element> {
        let element = self
            .0
            .get_element_by_id(element_id)
            .ok_or_else(|| rust_error!("Cannot find element \"{}\"", element_id))?;
        if !element.is_object() {
            return Err(rust_error!("Element \"{}\" is not an object", element_id));
        }
        Ok(element)
    }

    // Same as `get_existing_element_by_id`, but also checks the element type, e.g. that a form
    // is really a `<form>`.
    pub fn get_typed_element_by_id<T: JsCast>(&self, element_id: &str) -> JsResult<T> {
        self.get_existing_element_by_id(element_id)?
            .dyn_into::<T>()
            .map_err(|_| rust_error!("Element \"{}\" has unexpected type", element_id))
    }

    pub fn get_elements_by_class_name(&self, class_name: &str) -> HtmlCollectionIterator {
        self.0.get_elements_by_class_name(class_name).into()
    }

    pub fn create_element(&self, local_name: &str) -> JsResult<web_sys::Element> {
        self.0.create_element(local_name)
    }
}

pub fn web_window() -> JsResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| rust_error!("Cannot find window"))
}

pub fn web_document() -> JsResult<WebDocument> {
    let document = web_window()?.document().ok_or_else(|| rust_error!("Cannot find document"))?;
    Ok(WebDocument(document))
}
