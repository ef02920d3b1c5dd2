//! formcheck WASM
//!
//! WebAssembly bindings that attach formcheck validation to an HTML form.
//! Listeners are registered for `submit` on the form and for `blur`/`focus`
//! on each of its inputs; classes are toggled according to the outcome.
//!
//! # Example (JavaScript)
//! ```javascript
//! const handle = validateForm({
//!     formId: 'signup',
//!     formValidClass: 'form--valid',
//!     formInvalidClass: 'form--invalid',
//!     inputErrorClass: 'input--error',
//! });
//!
//! validateField('15', { validator: 'number', validatorMin: 10 }); // true
//! handle.detach();
//! ```

pub mod console;
pub mod dom;

use std::rc::Rc;

use anyhow::{anyhow, Context};
use formcheck_core::{evaluate, BindError, Field, FormBinder, FormConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlFormElement};

use crate::dom::DomForm;

/// Set panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console::install(tracing::Level::DEBUG);
}

type Callback = Closure<dyn FnMut(Event)>;

/// A registered event listener, removed again when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Callback,
}

impl Listener {
    fn register(
        target: &EventTarget,
        event: &'static str,
        capture: bool,
        callback: Callback,
    ) -> anyhow::Result<Self> {
        target
            .add_event_listener_with_callback_and_bool(
                event,
                callback.as_ref().unchecked_ref(),
                capture,
            )
            .map_err(|err| anyhow!("failed to add {event} listener: {err:?}"))?;

        Ok(Self {
            target: target.clone(),
            event,
            capture,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let removed = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
        if let Err(err) = removed {
            tracing::warn!(event = self.event, ?err, "failed to remove listener");
        }
    }
}

/// Validation attached to one form, returned by `validateForm`.
#[wasm_bindgen]
pub struct FormHandle {
    binder: Rc<FormBinder<DomForm>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FormHandle {
    /// Run the submit pass without submitting; returns the form validity.
    pub fn validate(&self) -> bool {
        self.binder.on_submit().is_valid()
    }

    /// Remove every listener this handle registered
    pub fn detach(&mut self) {
        if !self.listeners.is_empty() {
            tracing::info!(form = %self.binder.config().form_id, "validation detached");
        }
        self.listeners.clear();
    }

    /// Leave the listeners attached for good and release the handle.
    pub fn forget(self) {
        tracing::debug!(
            form = %self.binder.config().form_id,
            listeners = self.listeners.len(),
            "listeners kept for the page lifetime"
        );
        std::mem::forget(self.listeners);
    }

    #[wasm_bindgen(getter, js_name = inputCount)]
    pub fn input_count(&self) -> usize {
        self.binder.inputs().len()
    }

    #[wasm_bindgen(getter, js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }
}

/// Attach validation to the form named in `config`
///
/// # Arguments
/// * `config` - `{ formId, formValidClass, formInvalidClass, inputErrorClass }`
///
/// Throws when the config is incomplete, the form does not exist, or an
/// input carries a malformed pattern.
///
/// Inputs are collected once, here. Inputs added to the form afterwards are
/// not validated until the handle is detached and `validateForm` is called
/// again.
///
/// Listeners live as long as the returned handle. Keep a reference to it, or
/// call `handle.forget()` to leave validation attached for the page lifetime.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(config: JsValue) -> Result<FormHandle, JsValue> {
    attach(config).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

fn attach(config: JsValue) -> anyhow::Result<FormHandle> {
    let config: FormConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| anyhow!("failed to parse form config: {e}"))?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .context("no document available")?;

    let form = document
        .get_element_by_id(&config.form_id)
        .ok_or_else(|| BindError::FormNotFound {
            id: config.form_id.clone(),
        })?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| anyhow!("element #{} is not a <form>", config.form_id))?;

    let binder = Rc::new(FormBinder::bind(config, DomForm::new(form))?);
    let mut listeners = Vec::with_capacity(binder.inputs().len() * 2 + 1);

    let on_submit = {
        let binder = Rc::clone(&binder);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            binder.on_submit();
        })
    };
    listeners.push(Listener::register(
        binder.form().target(),
        "submit",
        false,
        on_submit,
    )?);

    for (index, input) in binder.inputs().iter().enumerate() {
        let on_blur = {
            let binder = Rc::clone(&binder);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Some(input) = binder.input(index) {
                    binder.on_blur(input);
                }
            })
        };
        let on_focus = {
            let binder = Rc::clone(&binder);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Some(input) = binder.input(index) {
                    binder.on_focus(input);
                }
            })
        };

        let target = input.element().target();
        listeners.push(Listener::register(target, "blur", true, on_blur)?);
        listeners.push(Listener::register(target, "focus", true, on_focus)?);
    }

    Ok(FormHandle { binder, listeners })
}

/// Check one value against declarative attributes
///
/// # Example (JavaScript)
/// ```javascript
/// validateField('AB1234', { validator: 'regexp', validatorPattern: '^[A-Z]{2}\\d{4}$' });
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(value: &str, attrs: JsValue) -> Result<bool, JsValue> {
    let mut field: Field = if attrs.is_undefined() || attrs.is_null() {
        Field::default()
    } else {
        serde_wasm_bindgen::from_value(attrs)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse attributes: {}", e)))?
    };
    field.value = value.to_string();

    evaluate(&field).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use formcheck_core::{AttributeSource, InputElement};
    use serde::Serialize;
    use std::collections::HashMap;
    use wasm_bindgen_test::*;
    use web_sys::{Document, HtmlInputElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn config(form_id: &str) -> JsValue {
        let config = FormConfig::new(form_id, "form-valid", "form-invalid", "input-error");
        serde_wasm_bindgen::to_value(&config).unwrap()
    }

    fn build_form(id: &str, inputs: &[&[(&str, &str)]]) -> (HtmlFormElement, Vec<HtmlInputElement>) {
        let document = document();
        let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();
        form.set_id(id);

        let inputs = inputs
            .iter()
            .enumerate()
            .map(|(i, attrs)| {
                let input: HtmlInputElement =
                    document.create_element("input").unwrap().dyn_into().unwrap();
                input.set_name(&format!("field{i}"));
                for (name, value) in attrs.iter() {
                    input.set_attribute(name, value).unwrap();
                }
                form.append_child(&input).unwrap();
                input
            })
            .collect();

        document.body().unwrap().append_child(&form).unwrap();
        (form, inputs)
    }

    fn fire(target: &EventTarget, event: &str) {
        target.dispatch_event(&Event::new(event).unwrap()).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_validate_field() {
        let attrs = plain_object(&[("validator", "number"), ("validatorMin", "10")]);
        assert_eq!(validate_field("15", attrs.clone()), Ok(true));
        assert_eq!(validate_field("10", attrs), Ok(false));
        assert_eq!(validate_field("", JsValue::UNDEFINED), Ok(true));
    }

    #[wasm_bindgen_test]
    fn test_validate_field_malformed_pattern() {
        let attrs = plain_object(&[("validator", "regexp"), ("validatorPattern", "(")]);
        assert!(validate_field("x", attrs).is_err());
    }

    #[wasm_bindgen_test]
    fn test_submit_toggles_classes() {
        let (form, inputs) = build_form(
            "wasm-submit",
            &[
                &[("data-required", ""), ("data-validator", "number")],
                &[("data-validator", "letters")],
            ],
        );
        let handle = validate_form(config("wasm-submit")).unwrap();
        assert_eq!(handle.input_count(), 2);

        inputs[1].set_value("abc1");
        fire(form.as_ref(), "submit");
        assert!(form.class_list().contains("form-invalid"));
        assert!(inputs[0].class_list().contains("input-error"));
        assert!(inputs[1].class_list().contains("input-error"));

        inputs[0].set_value("42");
        inputs[1].set_value("abc");
        assert!(handle.validate());
        assert!(form.class_list().contains("form-valid"));
        assert!(!form.class_list().contains("form-invalid"));
    }

    #[wasm_bindgen_test]
    fn test_blur_and_focus() {
        let (form, inputs) = build_form("wasm-blur", &[&[("data-required", "")]]);
        let _handle = validate_form(config("wasm-blur")).unwrap();

        fire(inputs[0].as_ref(), "blur");
        assert!(inputs[0].class_list().contains("input-error"));
        assert!(!form.class_list().contains("form-invalid"));

        fire(inputs[0].as_ref(), "focus");
        assert!(!inputs[0].class_list().contains("input-error"));
    }

    #[wasm_bindgen_test]
    fn test_detach_removes_listeners() {
        let (_form, inputs) = build_form("wasm-detach", &[&[("data-required", "")]]);
        let mut handle = validate_form(config("wasm-detach")).unwrap();
        handle.detach();
        assert!(!handle.is_attached());

        fire(inputs[0].as_ref(), "blur");
        assert!(!inputs[0].class_list().contains("input-error"));
    }

    #[wasm_bindgen_test]
    fn test_forget_keeps_listeners() {
        let (_form, inputs) = build_form("wasm-forget", &[&[("data-required", "")]]);
        validate_form(config("wasm-forget")).unwrap().forget();

        fire(inputs[0].as_ref(), "blur");
        assert!(inputs[0].class_list().contains("input-error"));
    }

    #[wasm_bindgen_test]
    fn test_empty_form_id_rejected() {
        assert!(validate_form(config("")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_missing_form() {
        assert!(validate_form(config("no-such-form")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_bad_pattern_fails_setup() {
        build_form(
            "wasm-bad-pattern",
            &[&[("data-validator", "regexp"), ("data-validator-pattern", "(")]],
        );
        assert!(validate_form(config("wasm-bad-pattern")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_dom_input_reads_dataset() {
        let (_form, inputs) = build_form(
            "wasm-dataset",
            &[&[("data-validator-min", "3"), ("id", "age")]],
        );
        let input = dom::DomInput::new(inputs[0].clone());
        assert_eq!(input.attribute("validatorMin").as_deref(), Some("3"));
        assert_eq!(input.label(), "field0");
    }

    fn plain_object(entries: &[(&str, &str)]) -> JsValue {
        let map: HashMap<&str, &str> = entries.iter().copied().collect();
        map.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap()
    }
}
