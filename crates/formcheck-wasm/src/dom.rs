//! `web-sys` implementations of the binder's element traits

use formcheck_core::{AttributeSource, FormElement, InputElement};
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlFormElement, HtmlInputElement};

#[derive(Debug, Clone)]
pub struct DomInput(HtmlInputElement);

impl DomInput {
    pub fn new(element: HtmlInputElement) -> Self {
        Self(element)
    }

    pub fn target(&self) -> &EventTarget {
        self.0.as_ref()
    }
}

impl AttributeSource for DomInput {
    fn attribute(&self, key: &str) -> Option<String> {
        self.0.dataset().get(key)
    }
}

impl InputElement for DomInput {
    fn value(&self) -> String {
        self.0.value()
    }

    fn label(&self) -> String {
        let name = self.0.name();
        if name.is_empty() {
            self.0.id()
        } else {
            name
        }
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            tracing::warn!(class, ?err, "failed to add input class");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            tracing::warn!(class, ?err, "failed to remove input class");
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomForm(HtmlFormElement);

impl DomForm {
    pub fn new(element: HtmlFormElement) -> Self {
        Self(element)
    }

    pub fn target(&self) -> &EventTarget {
        self.0.as_ref()
    }
}

impl FormElement for DomForm {
    type Input = DomInput;

    fn inputs(&self) -> Vec<DomInput> {
        let collection = self.0.get_elements_by_tag_name("input");
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .map(DomInput::new)
            .collect()
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            tracing::warn!(class, ?err, "failed to add form class");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            tracing::warn!(class, ?err, "failed to remove form class");
        }
    }
}
