//! Passive abilities and the model-identity lookup that assigns them.
//!
//! A passive is fixed for the whole battle. Assignment is an injected
//! configuration concern: callers hand a [`PassiveRegistry`] to battle
//! creation, so tests and tournaments can substitute their own mapping
//! instead of consulting a hidden global table.

/// Battle-long modifier tied to a fighter's model identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Passive {
    /// No passive ability.
    #[default]
    None,
    /// Move actions cover two tiles instead of one.
    Speed,
    /// Incoming damage reduced by 10% after all other reductions.
    Fortified,
    /// Recovers 3 hp at the start of every round.
    Regeneration,
    /// 15% chance to dodge any incoming hit entirely.
    Evasion,
    /// Critical hits deal 3x damage instead of 2x.
    Berserker,
    /// Independent 20% chance to add +10 damage to any attack.
    Unpredictable,
}

impl Passive {
    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Passive::None => "None",
            Passive::Speed => "Speed",
            Passive::Fortified => "Fortified",
            Passive::Regeneration => "Regeneration",
            Passive::Evasion => "Evasion",
            Passive::Berserker => "Berserker",
            Passive::Unpredictable => "Unpredictable",
        }
    }

    /// One-line rules text, surfaced in decision briefings.
    pub const fn description(self) -> &'static str {
        match self {
            Passive::None => "no passive ability",
            Passive::Speed => "moves 2 tiles per move action",
            Passive::Fortified => "takes 10% less damage",
            Passive::Regeneration => "regenerates 3 hp per round",
            Passive::Evasion => "15% chance to dodge attacks",
            Passive::Berserker => "critical hits deal 3x damage",
            Passive::Unpredictable => "20% chance of +10 bonus damage",
        }
    }
}

/// Ordered model-identifier pattern table resolved once at battle creation.
///
/// Patterns are matched as case-insensitive substrings of the model id; the
/// first match wins, and unknown identifiers fall back to [`Passive::None`].
#[derive(Clone, Debug, Default)]
pub struct PassiveRegistry {
    entries: Vec<(String, Passive)>,
}

impl PassiveRegistry {
    /// Empty registry: every model resolves to `Passive::None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the well-known model families.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("gpt", Passive::Speed);
        registry.insert("claude", Passive::Fortified);
        registry.insert("gemini", Passive::Unpredictable);
        registry.insert("llama", Passive::Berserker);
        registry.insert("mistral", Passive::Evasion);
        registry.insert("deepseek", Passive::Regeneration);
        registry
    }

    /// Append a pattern. Later entries only apply when no earlier pattern
    /// matched.
    pub fn insert(&mut self, pattern: impl Into<String>, passive: Passive) {
        self.entries.push((pattern.into().to_lowercase(), passive));
    }

    /// Resolve a model identifier to its passive.
    pub fn resolve(&self, model_id: &str) -> Passive {
        let id = model_id.to_lowercase();
        self.entries
            .iter()
            .find(|(pattern, _)| id.contains(pattern))
            .map(|(_, passive)| *passive)
            .unwrap_or(Passive::None)
    }
}
