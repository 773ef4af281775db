//! Manual prediction form model.
//!
//! One numeric input per backend-advertised feature. When the backend
//! advertises no features the form renders zero inputs and an explicit
//! unavailable message instead of an empty grid.

use crate::models::FeatureSet;

const UNAVAILABLE_MESSAGE: &str =
    "Could not load prediction model features. Manual prediction is unavailable.";

/// One numeric input of the manual form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: Option<f64>,
}

/// Feature-driven manual entry form.
#[derive(Debug, Clone, Default)]
pub struct ManualForm {
    fields: Vec<FormField>,
    unavailable_message: Option<&'static str>,
}

impl ManualForm {
    /// Build from the advertised feature list.
    pub fn from_features(features: &[String]) -> Self {
        if features.is_empty() {
            return Self {
                fields: Vec::new(),
                unavailable_message: Some(UNAVAILABLE_MESSAGE),
            };
        }
        Self {
            fields: features
                .iter()
                .map(|name| FormField {
                    name: name.clone(),
                    value: None,
                })
                .collect(),
            unavailable_message: None,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn unavailable_message(&self) -> Option<&'static str> {
        self.unavailable_message
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable_message.is_some()
    }

    /// Mirror a fetched reading into its input; unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: f64) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = Some(value);
        }
    }

    /// Current values as a feature set; unfilled inputs are omitted.
    pub fn values(&self) -> FeatureSet {
        self.fields
            .iter()
            .filter_map(|f| f.value.map(|v| (f.name.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_feature_list_renders_no_inputs_and_a_message() {
        let form = ManualForm::from_features(&[]);
        assert!(form.fields().is_empty());
        assert!(form.is_unavailable());
        assert!(form
            .unavailable_message()
            .is_some_and(|m| m.contains("unavailable")));
    }

    #[test]
    fn mirrors_known_values_and_ignores_unknown_names() {
        let mut form =
            ManualForm::from_features(&["pm25".to_string(), "pm10".to_string()]);
        form.set_value("pm25", 40.0);
        form.set_value("not_a_feature", 1.0);

        assert_eq!(form.fields()[0].value, Some(40.0));
        assert_eq!(form.fields()[1].value, None);

        let values = form.values();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("pm25"), Some(40.0));
    }
}
