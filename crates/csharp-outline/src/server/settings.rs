use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::symbols::DeclarationDepth;

pub(crate) const SETTINGS_SECTION_KEY: &str = "csharp-outline";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub(crate) symbols: SymbolSettings,
    pub(crate) logging: LoggingSettings,
}

impl ServerSettings {
    pub(crate) fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    /// Apply a configuration payload on top of these settings. Both the
    /// namespaced form (`{"csharp-outline": {...}}`) and the bare form are
    /// accepted; keys that fail to deserialize are ignored.
    pub(crate) fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(symbols) = patch.symbols {
            self.symbols.apply_patch(symbols);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SymbolSettings {
    pub(crate) include_locals: bool,
}

impl SymbolSettings {
    fn apply_patch(
        &mut self,
        patch: SymbolSettingsPatch,
    ) {
        if let Some(include_locals) = patch.include_locals {
            self.include_locals = include_locals;
        }
    }

    pub(crate) fn depth(&self) -> DeclarationDepth {
        if self.include_locals {
            DeclarationDepth::Locals
        } else {
            DeclarationDepth::Members
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct LoggingSettings {
    pub(crate) level: LoggingLevel,
}

impl LoggingSettings {
    fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub(crate) fn allows_info(self) -> bool {
        self >= LoggingLevel::Info
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    symbols: Option<SymbolSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SymbolSettingsPatch {
    include_locals: Option<bool>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LoggingLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());

    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }

    candidates
}

#[cfg(test)]
#[path = "../../tests/src/server/settings_tests.rs"]
mod tests;
