//! Per-form configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings passed when validation is attached to a form.
///
/// Each bound form owns its own copy, so several forms on one page can use
/// different class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormConfig {
    /// `id` attribute of the `<form>` element
    pub form_id: String,

    /// Class added to the form after a successful submit pass
    pub form_valid_class: String,

    /// Class added to the form after a failed submit pass
    pub form_invalid_class: String,

    /// Class added to each input that fails validation
    pub input_error_class: String,
}

impl FormConfig {
    pub fn new(
        form_id: impl Into<String>,
        form_valid_class: impl Into<String>,
        form_invalid_class: impl Into<String>,
        input_error_class: impl Into<String>,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            form_valid_class: form_valid_class.into(),
            form_invalid_class: form_invalid_class.into(),
            input_error_class: input_error_class.into(),
        }
    }

    /// Parse and check a JSON configuration object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration before any element is touched.
    ///
    /// Class names end up in `classList.add`, which rejects empty tokens and
    /// tokens containing whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form_id.trim().is_empty() {
            return Err(ConfigError::EmptyFormId);
        }

        check_class("formValidClass", &self.form_valid_class)?;
        check_class("formInvalidClass", &self.form_invalid_class)?;
        check_class("inputErrorClass", &self.input_error_class)?;

        if self.form_valid_class == self.form_invalid_class {
            return Err(ConfigError::IndistinctFormClasses(
                self.form_valid_class.clone(),
            ));
        }

        Ok(())
    }
}

fn check_class(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidClass {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FormConfig {
        FormConfig::new("signup", "form--valid", "form--invalid", "input--error")
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_empty_form_id_rejected() {
        let mut config = config();
        config.form_id = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyFormId)));
    }

    #[test]
    fn test_class_names_checked() {
        let mut config = config();
        config.input_error_class = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClass { name: "inputErrorClass", .. })
        ));

        let mut config = self::config();
        config.form_valid_class = "is valid".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClass { name: "formValidClass", .. })
        ));
    }

    #[test]
    fn test_form_classes_must_differ() {
        let mut config = config();
        config.form_invalid_class = config.form_valid_class.clone();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IndistinctFormClasses(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let config = FormConfig::from_json(
            r#"{
                "formId": "signup",
                "formValidClass": "form--valid",
                "formInvalidClass": "form--invalid",
                "inputErrorClass": "input--error"
            }"#,
        )
        .unwrap();
        assert_eq!(config, self::config());
    }

    #[test]
    fn test_from_json_rejects_unknown_and_missing_keys() {
        let unknown = r#"{"formId":"f","formValidClass":"a","formInvalidClass":"b","inputErrorClass":"c","extra":1}"#;
        assert!(matches!(FormConfig::from_json(unknown), Err(ConfigError::Json(_))));

        let missing = r#"{"formId":"f"}"#;
        assert!(matches!(FormConfig::from_json(missing), Err(ConfigError::Json(_))));
    }
}
