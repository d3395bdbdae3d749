// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Picklist metadata and the controller/dependent filter between clinics and specialists.

use std::collections::BTreeMap;
use std::fmt;

use serde::de;

/// Key linking a controlling picklist value to the dependent values valid for it.
///
/// The metadata service emits integer indices, other sources use strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ControllerKey(String);

impl ControllerKey {
    /// Creates a key from any displayable value.
    pub fn new(key: impl ToString) -> Self {
        Self(key.to_string())
    }

    /// Returns the key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> serde::Deserialize<'de> for ControllerKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct KeyVisitor;

        impl de::Visitor<'_> for KeyVisitor {
            type Value = ControllerKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a controller key as a string or an integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ControllerKey::new(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ControllerKey::new(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ControllerKey::new(value))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// A single picklist entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValue {
    /// Display label.
    pub label: String,

    /// Stored value.
    pub value: String,

    /// Controller keys this value is valid for; empty for independent picklists.
    #[serde(default)]
    pub valid_for: Vec<ControllerKey>,
}

impl PicklistValue {
    /// Creates an entry whose label equals its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            valid_for: Vec::new(),
        }
    }

    /// Marks the entry as valid for the given controller keys.
    #[must_use]
    pub fn valid_for<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: ToString,
    {
        self.valid_for = keys.into_iter().map(ControllerKey::new).collect();
        self
    }
}

/// Picklist metadata for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistCatalog {
    /// All values of the field.
    #[serde(default)]
    pub values: Vec<PicklistValue>,

    /// Maps each controlling value to its key, for dependent fields.
    #[serde(default)]
    pub controller_values: BTreeMap<String, ControllerKey>,
}

impl PicklistCatalog {
    /// Creates a catalog from its values and controller mapping.
    pub fn new(
        values: Vec<PicklistValue>,
        controller_values: impl IntoIterator<Item = (String, ControllerKey)>,
    ) -> Self {
        Self {
            values,
            controller_values: controller_values.into_iter().collect(),
        }
    }

    /// Key of the given controlling value.
    pub fn controller_key(&self, controller_value: &str) -> Option<&ControllerKey> {
        self.controller_values.get(controller_value)
    }

    /// Values valid for the given controlling value.
    ///
    /// An unknown controlling value yields no options.
    pub fn dependent_options(&self, controller_value: &str) -> Vec<PicklistValue> {
        let Some(key) = self.controller_key(controller_value) else {
            tracing::debug!(controller_value, "no controller key for value");
            return Vec::new();
        };

        self.values
            .iter()
            .filter(|opt| opt.valid_for.contains(key))
            .cloned()
            .collect()
    }

    /// Whether the catalog has an entry with the given value.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|a| a.value == value)
    }

    /// Whether the catalog holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(options: &[PicklistValue]) -> Vec<&str> {
        options.iter().map(|a| a.value.as_str()).collect()
    }

    #[test]
    fn filters_by_controller_key() {
        let catalog = PicklistCatalog::new(
            vec![
                PicklistValue::new("A").valid_for(["k1"]),
                PicklistValue::new("B").valid_for(["k2"]),
            ],
            [("ClinicX".to_string(), ControllerKey::new("k1"))],
        );

        assert_eq!(values(&catalog.dependent_options("ClinicX")), vec!["A"]);
    }

    #[test]
    fn unknown_controller_yields_nothing() {
        let catalog = PicklistCatalog::new(
            vec![PicklistValue::new("A").valid_for(["k1"])],
            [("ClinicX".to_string(), ControllerKey::new("k1"))],
        );
        assert!(catalog.dependent_options("ClinicY").is_empty());
    }

    #[test]
    fn value_valid_for_several_controllers() {
        let catalog = PicklistCatalog::new(
            vec![
                PicklistValue::new("Dermatology").valid_for([0, 1]),
                PicklistValue::new("Cardiology").valid_for([1]),
                PicklistValue::new("Pediatrics").valid_for([0]),
            ],
            [
                ("Norte".to_string(), ControllerKey::new(0)),
                ("Sur".to_string(), ControllerKey::new(1)),
            ],
        );

        assert_eq!(
            values(&catalog.dependent_options("Norte")),
            vec!["Dermatology", "Pediatrics"]
        );
        assert_eq!(
            values(&catalog.dependent_options("Sur")),
            vec!["Dermatology", "Cardiology"]
        );
    }

    #[test]
    fn deserialize_metadata_with_integer_keys() {
        let json = r#"{
            "controllerValues": { "Clinic Norte": 0, "Clinic Sur": 1 },
            "defaultValue": null,
            "eTag": "abc",
            "url": "/picklist",
            "values": [
                { "attributes": null, "label": "Cardiology", "validFor": [1], "value": "Cardiology" },
                { "attributes": null, "label": "Dermatology", "validFor": [0, 1], "value": "Dermatology" }
            ]
        }"#;

        let catalog: PicklistCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.values.len(), 2);
        assert_eq!(
            catalog.controller_key("Clinic Sur"),
            Some(&ControllerKey::new("1"))
        );
        assert_eq!(
            values(&catalog.dependent_options("Clinic Norte")),
            vec!["Dermatology"]
        );
    }

    #[test]
    fn deserialize_independent_picklist() {
        let json = r#"{ "values": [ { "label": "Clinic Norte", "value": "Norte" } ] }"#;
        let catalog: PicklistCatalog = serde_json::from_str(json).unwrap();
        assert!(catalog.controller_values.is_empty());
        assert!(catalog.contains("Norte"));
        assert!(!catalog.contains("Clinic Norte"));
    }
}
