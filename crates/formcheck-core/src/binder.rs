// File: src/binder.rs
// Purpose: Form-level validation over abstract form/input elements

use crate::config::FormConfig;
use crate::error::BindError;
use crate::field::AttributeSource;
use crate::rules::FieldRules;

/// An `<input>` the binder can read and mark.
pub trait InputElement: AttributeSource {
    /// Current value as typed by the user
    fn value(&self) -> String;

    /// Name used in logs and errors (`name`, then `id`)
    fn label(&self) -> String;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);
}

/// A `<form>` whose inputs are validated together.
pub trait FormElement {
    type Input: InputElement;

    /// Inputs in document order
    fn inputs(&self) -> Vec<Self::Input>;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);
}

/// Aggregate result of a submit pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Valid,
    Invalid,
}

impl FormState {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    /// Class this state puts on the form
    pub fn class(self, config: &FormConfig) -> &str {
        match self {
            Self::Valid => &config.form_valid_class,
            Self::Invalid => &config.form_invalid_class,
        }
    }
}

impl From<bool> for FormState {
    fn from(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

/// An input together with the rules compiled from its attributes
#[derive(Debug)]
pub struct BoundInput<I> {
    element: I,
    rules: FieldRules,
}

impl<I: InputElement> BoundInput<I> {
    pub fn element(&self) -> &I {
        &self.element
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    pub fn is_valid(&self) -> bool {
        self.rules.check(&self.element.value())
    }
}

/// Validation attached to one form.
///
/// Rules are compiled for every input when the binder is created, so a bad
/// `data-validator-pattern` is reported at setup instead of in the middle of
/// an event handler. The set of inputs is fixed at that point too; inputs
/// added to the form later are not validated.
pub struct FormBinder<F: FormElement> {
    config: FormConfig,
    form: F,
    inputs: Vec<BoundInput<F::Input>>,
}

impl<F: FormElement> FormBinder<F> {
    pub fn bind(config: FormConfig, form: F) -> Result<Self, BindError> {
        config.validate()?;

        let inputs = form
            .inputs()
            .into_iter()
            .map(|element| {
                let rules = FieldRules::from_attributes(&element).map_err(|source| {
                    BindError::Rule {
                        field: element.label(),
                        source,
                    }
                })?;
                Ok(BoundInput { element, rules })
            })
            .collect::<Result<Vec<_>, BindError>>()?;

        tracing::info!(
            form = %config.form_id,
            inputs = inputs.len(),
            "validation attached"
        );

        Ok(Self {
            config,
            form,
            inputs,
        })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn inputs(&self) -> &[BoundInput<F::Input>] {
        &self.inputs
    }

    pub fn input(&self, index: usize) -> Option<&BoundInput<F::Input>> {
        self.inputs.get(index)
    }

    /// Validate one input and mark it when it fails. An already marked
    /// input keeps its marker until it is focused.
    pub fn validate_input(&self, input: &BoundInput<F::Input>) -> bool {
        let valid = input.is_valid();
        tracing::debug!(field = %input.element.label(), valid, "field validated");

        if !valid {
            input.element.add_class(&self.config.input_error_class);
        }
        valid
    }

    /// Blur on a single input
    pub fn on_blur(&self, input: &BoundInput<F::Input>) -> bool {
        self.validate_input(input)
    }

    /// Focus clears the error marker whatever the current value.
    pub fn on_focus(&self, input: &BoundInput<F::Input>) {
        input.element.remove_class(&self.config.input_error_class);
    }

    /// Validate every input, then put exactly one state class on the form.
    ///
    /// All inputs are visited even after a failure so each invalid one gets
    /// its marker.
    pub fn on_submit(&self) -> FormState {
        let failures = self
            .inputs
            .iter()
            .filter(|input| !self.validate_input(input))
            .count();

        let state = FormState::from(failures == 0);
        self.apply_form_state(state);

        tracing::debug!(
            form = %self.config.form_id,
            failures,
            state = ?state,
            "form validated"
        );
        state
    }

    fn apply_form_state(&self, state: FormState) {
        self.form.remove_class(&self.config.form_valid_class);
        self.form.remove_class(&self.config.form_invalid_class);
        self.form.add_class(state.class(&self.config));
    }
}
