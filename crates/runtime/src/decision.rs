//! Repairing free-form model replies into engine actions.
//!
//! Model output is untrusted text. [`repair_decision`] extracts the first
//! JSON object it can find, maps it onto an [`Action`], and falls back to a
//! plain attack whenever anything about the reply is unusable. A battle
//! never stalls on a malformed reply.

use serde::Deserialize;

use arena_core::{Action, ActionKind, ActionTag, Direction};

/// Wire shape of a decision reply.
///
/// `action` is one of the lowercase action names; `direction` is required
/// for `move` and `dash` and ignored otherwise.
#[derive(Debug, Deserialize)]
struct RawDecision {
    action: String,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parse a model reply into an action, defaulting to attack on any failure.
pub fn repair_decision(reply: &str) -> Action {
    match parse(reply) {
        Some(action) => action,
        None => {
            tracing::warn!(reply = %truncate(reply), "unusable decision reply, defaulting to attack");
            Action::new(ActionKind::Attack)
        }
    }
}

fn parse(reply: &str) -> Option<Action> {
    let raw = extract_object(reply)?;
    let tag: ActionTag = raw.action.trim().to_lowercase().parse().ok()?;
    let direction = || -> Option<Direction> {
        raw.direction.as_deref()?.trim().to_lowercase().parse().ok()
    };

    let kind = match tag {
        ActionTag::Move => ActionKind::Move {
            direction: direction()?,
        },
        ActionTag::Dash => ActionKind::Dash {
            direction: direction()?,
        },
        ActionTag::Attack => ActionKind::Attack,
        ActionTag::Special => ActionKind::Special,
        ActionTag::Defend => ActionKind::Defend,
        ActionTag::Heal => ActionKind::Heal,
        ActionTag::Charge => ActionKind::Charge,
    };
    Some(match raw.reasoning {
        Some(reasoning) if !reasoning.trim().is_empty() => {
            Action::with_reasoning(kind, reasoning.trim())
        }
        _ => Action::new(kind),
    })
}

/// Pull the first top-level `{...}` span out of the reply. Models often wrap
/// the object in prose or code fences, so parsing the reply as-is first and
/// then the widest brace span covers both cases.
fn extract_object(reply: &str) -> Option<RawDecision> {
    if let Ok(raw) = serde_json::from_str(reply.trim()) {
        return Some(raw);
    }
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&reply[start..=end]).ok()
}

fn truncate(reply: &str) -> &str {
    let end = reply
        .char_indices()
        .nth(120)
        .map(|(i, _)| i)
        .unwrap_or(reply.len());
    &reply[..end]
}
