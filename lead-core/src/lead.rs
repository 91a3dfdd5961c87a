use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Offering categories a lead can express interest in. The vocabulary is
/// fixed by the server schema; wire tokens are the upper-case variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceTag {
    Delivery,
    Pickup,
    Payment,
}

impl ServiceTag {
    /// Canonical vocabulary order. Submissions list services in this order.
    pub const ALL: [ServiceTag; 3] = [ServiceTag::Delivery, ServiceTag::Pickup, ServiceTag::Payment];

    pub fn label(self) -> &'static str {
        match self {
            ServiceTag::Delivery => "Delivery",
            ServiceTag::Pickup => "Pick-up",
            ServiceTag::Payment => "Payment",
        }
    }
}

/// A submitted registration record. Immutable client-side: this client only
/// creates and reads leads, never edits or deletes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub postcode: String,
    pub services: Vec<ServiceTag>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input object for the register mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterLeadInput {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub postcode: String,
    pub services: Vec<ServiceTag>,
}

pub fn parse_lead_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Render a server timestamp for display. Accepts RFC 3339 or epoch
/// milliseconds; anything else is shown verbatim so presentation never fails.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%-d %b %Y %H:%M").to_string();
    }
    if let Ok(millis) = raw.parse::<i64>() {
        if let Some(parsed) = Utc.timestamp_millis_opt(millis).single() {
            return parsed.format("%-d %b %Y %H:%M").to_string();
        }
    }
    raw.to_string()
}
