// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// The name of the application.
pub const APP_NAME: &str = "clinibook";

/// Configuration of the booking core.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    /// Object holding the appointment picklists.
    #[serde(default = "default_object")]
    pub object: String,

    /// Controlling field listing the clinics.
    #[serde(default = "default_clinic_field")]
    pub clinic_field: String,

    /// Dependent field listing the specialists.
    #[serde(default = "default_specialist_field")]
    pub specialist_field: String,
}

fn default_object() -> String {
    "Appointment__c".to_string()
}

fn default_clinic_field() -> String {
    "Clinic__c".to_string()
}

fn default_specialist_field() -> String {
    "Specialist__c".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            object: default_object(),
            clinic_field: default_clinic_field(),
            specialist_field: default_specialist_field(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.object, "Appointment__c");
        assert_eq!(config.clinic_field, "Clinic__c");
        assert_eq!(config.specialist_field, "Specialist__c");
    }

    #[test]
    fn test_override_fields() {
        let config: Config = toml::from_str(
            r#"
object = "Visit__c"
specialist_field = "Doctor__c"
"#,
        )
        .unwrap();
        assert_eq!(config.object, "Visit__c");
        assert_eq!(config.clinic_field, "Clinic__c");
        assert_eq!(config.specialist_field, "Doctor__c");
    }
}
