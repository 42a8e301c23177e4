use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;

use crate::web_error_handling::JsResult;


// Listener closure that stays alive as long as this value does. Drop it only after the element
// is gone or the listener is no longer needed.
pub type OwnedListener<E> = Closure<dyn FnMut(E) -> JsResult<()>>;

pub trait WebElementExt {
    fn with_text_content(self, text: &str) -> web_sys::Element;
    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element>;
    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> JsResult<web_sys::Element>;

    fn add_owned_event_listener<E: FromWasmAbi + 'static>(
        &self, event_type: &str, listener: impl FnMut(E) -> JsResult<()> + 'static,
    ) -> JsResult<OwnedListener<E>>;

    fn remove_all_children(&self);
}

impl WebElementExt for web_sys::Element {
    fn with_text_content(self, text: &str) -> web_sys::Element {
        self.set_text_content(Some(text));
        self
    }

    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> JsResult<web_sys::Element> {
        for class in classes {
            self.class_list().add_1(class)?;
        }
        Ok(self)
    }

    // Unlike a forgotten closure, the returned one is freed when dropped, so re-rendering the
    // board many times does not leak.
    fn add_owned_event_listener<E: FromWasmAbi + 'static>(
        &self, event_type: &str, listener: impl FnMut(E) -> JsResult<()> + 'static,
    ) -> JsResult<OwnedListener<E>> {
        let closure: OwnedListener<E> = Closure::new(listener);
        self.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        Ok(closure)
    }

    fn remove_all_children(&self) { self.replace_children_with_node_0() }
}
