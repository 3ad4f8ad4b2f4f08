//! Input validation for write operations.

use crate::core::model::{ContactInput, SystemInput};
use crate::errors::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Local part of RFC 5322 dot-atoms, followed by a domain with at least one dot.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap()
});

/// Rejects blank system names.
pub fn validate_system_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("systemName", "System name cannot be empty"));
    }
    Ok(())
}

/// Rejects empty or syntactically invalid email addresses.
pub fn validate_mail_address(address: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(Error::validation("mailAddress", "Mail address cannot be empty"));
    }
    if address.len() > 254 || !EMAIL_PATTERN.is_match(address) {
        return Err(Error::validation(
            "mailAddress",
            format!("{address:?} is not a valid email address"),
        ));
    }
    Ok(())
}

/// Validates a create or full-replace body.
pub fn validate_system_input(input: &SystemInput) -> Result<()> {
    validate_system_name(&input.system_name)?;
    validate_mail_address(&input.mail_address)
}

/// Validates a contact-only update body.
pub fn validate_contact_input(contact: &ContactInput) -> Result<()> {
    validate_mail_address(&contact.mail_address)
}
