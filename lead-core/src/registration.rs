use crate::lead::{RegisterLeadInput, ServiceTag};
use std::collections::BTreeSet;

/// In-progress form state, owned by the registration view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub postcode: String,
    pub services: BTreeSet<ServiceTag>,
}

/// Per-field validation messages. Presence checks only; email/mobile/postcode
/// shape is the server's concern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub mobile: Option<&'static str>,
    pub postcode: Option<&'static str>,
    pub services: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.mobile.is_none()
            && self.postcode.is_none()
            && self.services.is_none()
    }
}

/// Check every required field and either produce the mutation input or the
/// full set of field messages. Accepted drafts carry trimmed values and list
/// services in vocabulary order.
pub fn validate(draft: &RegistrationDraft) -> Result<RegisterLeadInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if draft.email.trim().is_empty() {
        errors.email = Some("Email is required");
    }
    if draft.mobile.trim().is_empty() {
        errors.mobile = Some("Mobile is required");
    }
    if draft.postcode.trim().is_empty() {
        errors.postcode = Some("Postcode is required");
    }
    if draft.services.is_empty() {
        errors.services = Some("Please select at least one service");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RegisterLeadInput {
        name: draft.name.trim().to_string(),
        email: draft.email.trim().to_string(),
        mobile: draft.mobile.trim().to_string(),
        postcode: draft.postcode.trim().to_string(),
        services: ServiceTag::ALL
            .iter()
            .copied()
            .filter(|tag| draft.services.contains(tag))
            .collect(),
    })
}
