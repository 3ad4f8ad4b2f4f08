//! Externally visible shapes of a system record.
//!
//! These types are what the service accepts and returns; they carry no storage
//! types. JSON field names are camelCase and absent optional fields are omitted.

use crate::core::identifier::SystemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered system as returned to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRecord {
    /// Store-assigned identifier
    pub id: SystemId,
    /// Display name
    pub system_name: String,
    /// Associated local government, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_government_id: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Contact email address
    pub mail_address: String,
    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Body of a create or full-replace update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInput {
    /// Display name, must not be blank
    pub system_name: String,
    /// Associated local government
    #[serde(default)]
    pub local_government_id: Option<String>,
    /// Contact email address, must be syntactically valid
    pub mail_address: String,
    /// Contact phone number
    #[serde(default)]
    pub telephone: Option<String>,
    /// Free-text note
    #[serde(default)]
    pub remark: Option<String>,
}

impl SystemInput {
    /// Input with only the required fields set.
    #[must_use]
    pub fn new(system_name: impl Into<String>, mail_address: impl Into<String>) -> Self {
        Self {
            system_name: system_name.into(),
            mail_address: mail_address.into(),
            ..Self::default()
        }
    }

    /// Sets the local-government reference.
    #[must_use]
    pub fn with_local_government_id(mut self, value: impl Into<String>) -> Self {
        self.local_government_id = Some(value.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_telephone(mut self, value: impl Into<String>) -> Self {
        self.telephone = Some(value.into());
        self
    }

    /// Sets the remark.
    #[must_use]
    pub fn with_remark(mut self, value: impl Into<String>) -> Self {
        self.remark = Some(value.into());
        self
    }
}

/// Body of a contact-only update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    /// New contact email address
    pub mail_address: String,
    /// New phone number; absent clears it
    #[serde(default)]
    pub telephone: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_input_distinguishes_missing_null_and_empty() {
        let input: SystemInput = serde_json::from_str(
            r#"{"systemName":"A","mailAddress":"a@b.com","telephone":null,"remark":""}"#,
        )
        .unwrap();

        assert_eq!(input.local_government_id, None);
        assert_eq!(input.telephone, None);
        assert_eq!(input.remark, Some(String::new()));
    }

    #[test]
    fn test_record_omits_absent_fields_and_uses_camel_case() {
        let now = Utc::now();
        let record = SystemRecord {
            id: SystemId::generate(),
            system_name: "A".to_string(),
            local_government_id: None,
            created_at: now,
            updated_at: now,
            mail_address: "a@b.com".to_string(),
            telephone: Some(String::new()),
            remark: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["systemName"], "A");
        assert_eq!(json["mailAddress"], "a@b.com");
        assert_eq!(json["telephone"], "");
        assert!(json.get("localGovernmentId").is_none());
        assert!(json.get("remark").is_none());
    }
}
