//! Alert rendering — deterministic text and HTML bodies for chat delivery.
//!
//! Each alert contributes a status tag and an `instance: alertname name`
//! line; parts are joined with `\n` for plain text and `<br>` for HTML.
//! The `name` label is frequently empty, which leaves a trailing space —
//! downstream chat rendering depends on the exact byte shape, so it is
//! preserved as-is.

use crate::alert::AlertBatch;

/// Tag prepended to alerts with status `firing`.
const FIRING_TAG: &str = "[🔥 firing]";

/// Tag for every other status (resolved, ok, anything unrecognized).
const RESOLVED_TAG: &str = "[✅ resolved]";

/// Render a batch into a message body.
///
/// The HTML variant performs no escaping: the alert source is trusted
/// input. Known limitation.
pub fn render(batch: &AlertBatch, html: bool) -> String {
    let sep = if html { "<br>" } else { "\n" };

    let entries: Vec<String> = batch
        .alerts
        .iter()
        .map(|alert| {
            format!(
                "{}{}{}: {} {}",
                status_tag(&alert.status),
                sep,
                alert.labels.instance,
                alert.labels.alertname,
                alert.labels.name
            )
        })
        .collect();

    entries.join(sep)
}

/// Map a status string onto its rendered tag.
///
/// Exactly two states are distinguished: `firing`, and everything else.
fn status_tag(status: &str) -> &'static str {
    if status == "firing" {
        FIRING_TAG
    } else {
        RESOLVED_TAG
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
