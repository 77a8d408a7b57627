//! Wire types for the inbound alert payload.
//!
//! The webhook source sends far more fields than the relay needs; parsing
//! is deliberately lenient. Unknown fields are ignored and missing labels
//! default to empty strings, so a partial payload still produces a message
//! instead of a rejected request.

use serde::Deserialize;

/// Labels attached to a single alert.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AlertLabels {
    /// Host or target the alert fired on.
    #[serde(default)]
    pub instance: String,
    /// Rule name, e.g. `DiskFull`.
    #[serde(default)]
    pub alertname: String,
    /// Optional free-form qualifier.
    #[serde(default)]
    pub name: String,
}

/// One firing or resolved condition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub labels: AlertLabels,
    /// `"firing"`, `"resolved"`, or whatever else the source sends.
    #[serde(default)]
    pub status: String,
}

/// The webhook payload body: an ordered batch of alerts.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AlertBatch {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}
