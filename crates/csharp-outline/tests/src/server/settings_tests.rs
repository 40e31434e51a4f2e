use serde_json::json;

use super::*;

#[test]
fn defaults_without_payload() {
    let settings = ServerSettings::from_lsp_payload(None);
    assert!(!settings.symbols.include_locals);
    assert_eq!(settings.symbols.depth(), DeclarationDepth::Members);
    assert_eq!(settings.logging.level, LoggingLevel::Info);
}

#[test]
fn parses_namespaced_payload() {
    let payload = json!({
        "csharp-outline": {
            "symbols": {
                "includeLocals": true
            },
            "logging": {
                "level": "debug"
            }
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(settings.symbols.include_locals);
    assert_eq!(settings.symbols.depth(), DeclarationDepth::Locals);
    assert_eq!(settings.logging.level, LoggingLevel::Debug);
}

#[test]
fn parses_direct_payload() {
    let payload = json!({
        "symbols": { "includeLocals": true }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(settings.symbols.include_locals);
    assert_eq!(settings.logging.level, LoggingLevel::Info);
}

#[test]
fn ignores_unknown_keys() {
    let payload = json!({
        "formatting": { "enabled": false },
        "symbols": { "includeLocals": true, "maxDepth": 3 }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(settings.symbols.include_locals);
}

#[test]
fn invalid_values_keep_previous_settings() {
    let current = ServerSettings::from_lsp_payload(Some(&json!({
        "symbols": { "includeLocals": true }
    })));

    let merged = current.merged_with_payload(&json!({
        "logging": { "level": "chatty" }
    }));
    assert_eq!(merged, current);
}

#[test]
fn merge_preserves_unrelated_sections() {
    let current = ServerSettings::from_lsp_payload(Some(&json!({
        "symbols": { "includeLocals": true }
    })));

    let merged = current.merged_with_payload(&json!({
        "csharp-outline": { "logging": { "level": "warn" } }
    }));
    assert!(merged.symbols.include_locals);
    assert_eq!(merged.logging.level, LoggingLevel::Warn);
    assert!(!merged.logging.level.allows_info());
}
