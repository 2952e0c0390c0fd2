//! The advocate identity sent to the referral service.

use refwidget_config::{IdentityConfig, IdentityField};
use serde::Serialize;

/// Immutable identity record. `id` and `account_id` are opaque, typically
/// hashed, identifiers computed outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: String,
    account_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    locale: Option<String>,
    country_code: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            first_name: None,
            last_name: None,
            email: None,
            locale: None,
            country_code: None,
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self {
            id: config.id.clone(),
            account_id: config.account_id.clone(),
            first_name: config.first_name.clone(),
            last_name: config.last_name.clone(),
            email: config.email.clone(),
            locale: config.locale.clone(),
            country_code: config.country_code.clone(),
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>, country_code: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self.country_code = Some(country_code.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Build the JSON body for the upsert call, keeping only the optional
    /// fields listed in `include`.
    pub fn payload(&self, include: &[IdentityField]) -> UpsertPayload {
        let pick = |field: IdentityField, value: Option<&str>| {
            value
                .filter(|_| include.contains(&field))
                .map(str::to_owned)
        };

        UpsertPayload {
            id: self.id.clone(),
            account_id: self.account_id.clone(),
            first_name: pick(IdentityField::FirstName, self.first_name.as_deref()),
            last_name: pick(IdentityField::LastName, self.last_name.as_deref()),
            email: pick(IdentityField::Email, self.email.as_deref()),
            locale: pick(IdentityField::Locale, self.locale.as_deref()),
            country_code: pick(IdentityField::CountryCode, self.country_code.as_deref()),
        }
    }
}

/// Request body for the widget upsert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPayload {
    pub id: String,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn advocate() -> Identity {
        Identity::new("user-hash", "account-hash")
            .with_name("John", "Doe")
            .with_email("john.doe@example.com")
            .with_locale("en_CA", "CA")
    }

    #[test]
    fn full_payload_uses_camel_case_keys() {
        let body = serde_json::to_value(advocate().payload(&IdentityField::ALL)).unwrap();
        assert_eq!(
            body,
            json!({
                "id": "user-hash",
                "accountId": "account-hash",
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "locale": "en_CA",
                "countryCode": "CA",
            })
        );
    }

    #[test]
    fn excluded_fields_are_omitted() {
        let body = serde_json::to_value(advocate().payload(&[IdentityField::Locale])).unwrap();
        assert_eq!(
            body,
            json!({"id": "user-hash", "accountId": "account-hash", "locale": "en_CA"})
        );
    }

    #[test]
    fn ids_are_always_sent_even_when_empty() {
        let body = serde_json::to_value(Identity::new("", "").payload(&IdentityField::ALL)).unwrap();
        assert_eq!(body, json!({"id": "", "accountId": ""}));
    }

    #[test]
    fn from_config_copies_every_field() {
        let config = IdentityConfig {
            id: "a".into(),
            account_id: "b".into(),
            email: Some("x@example.com".into()),
            ..Default::default()
        };
        let identity = Identity::from_config(&config);
        assert_eq!(identity, Identity::new("a", "b").with_email("x@example.com"));
    }
}
