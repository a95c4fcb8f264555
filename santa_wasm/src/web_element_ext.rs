use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;

use crate::rust_error;
use crate::web_document::web_document;
use crate::web_error_handling::JsResult;
use crate::web_iterators::IntoHtmlCollectionIterator;


pub trait WebEventTargetExt {
    fn add_event_listener_and_forget<E: FromWasmAbi + 'static>(
        &self, event_type: &str, listener: impl FnMut(E) -> JsResult<()> + 'static,
    ) -> JsResult<()>;
}

// Listeners are attached once per page load and live as long as the page, so leaking the closures
// is fine.
impl WebEventTargetExt for web_sys::EventTarget {
    fn add_event_listener_and_forget<E: FromWasmAbi + 'static>(
        &self, event_type: &str, listener: impl FnMut(E) -> JsResult<()> + 'static,
    ) -> JsResult<()> {
        let closure = Closure::new(listener);
        self.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

pub trait WebElementExt {
    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> JsResult<web_sys::Element>;
    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element>;
    fn with_text_content(self, text: &str) -> web_sys::Element;

    fn has_class(&self, class: &str) -> bool;
    fn class_names(&self) -> Vec<String>;

    // Uses the `hidden` attribute, same as the page templates do.
    fn set_displayed(&self, displayed: bool) -> JsResult<()>;

    fn append_new_element(&self, local_name: &str) -> JsResult<web_sys::Element>;
    fn remove_all_children(&self);

    // Position among the element siblings.
    fn child_index(&self) -> JsResult<usize>;
    fn existing_child_by_class(&self, class: &str) -> JsResult<web_sys::Element>;
    fn typed_child_by_class<T: JsCast>(&self, class: &str) -> JsResult<T>;
}

impl WebElementExt for web_sys::Element {
    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> JsResult<web_sys::Element> {
        for class in classes {
            self.class_list().add_1(class)?;
        }
        Ok(self)
    }

    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    fn with_text_content(self, text: &str) -> web_sys::Element {
        self.set_text_content(Some(text));
        self
    }

    fn has_class(&self, class: &str) -> bool { self.class_list().contains(class) }

    fn class_names(&self) -> Vec<String> {
        let class_list = self.class_list();
        (0..class_list.length()).filter_map(|idx| class_list.item(idx)).collect()
    }

    fn set_displayed(&self, displayed: bool) -> JsResult<()> {
        self.toggle_attribute_with_force("hidden", !displayed)?;
        Ok(())
    }

    fn append_new_element(&self, local_name: &str) -> JsResult<web_sys::Element> {
        let node = web_document()?.create_element(local_name)?;
        self.append_child(&node)?;
        Ok(node)
    }

    fn remove_all_children(&self) { self.replace_children_with_node_0() }

    fn child_index(&self) -> JsResult<usize> {
        let parent = self.parent_element().ok_or_else(|| rust_error!("Element has no parent"))?;
        parent
            .children()
            .into_iterator()
            .position(|sibling| sibling.is_same_node(Some(self)))
            .ok_or_else(|| rust_error!("Element is not a child of its parent"))
    }

    fn existing_child_by_class(&self, class: &str) -> JsResult<web_sys::Element> {
        self.get_elements_by_class_name(class)
            .into_iterator()
            .next()
            .ok_or_else(|| rust_error!("Cannot find \"{}\" inside row", class))
    }

    fn typed_child_by_class<T: JsCast>(&self, class: &str) -> JsResult<T> {
        self.existing_child_by_class(class)?
            .dyn_into::<T>()
            .map_err(|_| rust_error!("\"{}\" has unexpected type", class))
    }
}
