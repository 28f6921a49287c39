//! Knowledge base loading
//!
//! The catalog is either the built-in one or a YAML file named by
//! `assistant.knowledge_base_path`. Either way it is validated before use.

use std::path::Path;

use terrenos_core::KnowledgeBase;

use crate::validator::validate_knowledge_base;
use crate::ConfigError;

/// Load and validate a catalog from a YAML file
pub fn load_knowledge_base<P: AsRef<Path>>(path: P) -> Result<KnowledgeBase, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    let kb: KnowledgeBase = serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

    checked(kb, &path.display().to_string())
}

/// Resolve the catalog from an optional path, falling back to the built-in one
pub fn resolve_knowledge_base(path: Option<&str>) -> Result<KnowledgeBase, ConfigError> {
    match path {
        Some(path) => load_knowledge_base(path),
        None => checked(KnowledgeBase::builtin(), "builtin"),
    }
}

fn checked(kb: KnowledgeBase, origin: &str) -> Result<KnowledgeBase, ConfigError> {
    let result = validate_knowledge_base(&kb);

    for warning in result.warnings() {
        tracing::warn!(origin = %origin, "Knowledge base warning: {}", warning);
    }

    if !result.is_ok() {
        let messages: Vec<String> = result
            .critical_errors()
            .iter()
            .map(|e| e.to_string())
            .collect();
        return Err(ConfigError::Validation(messages.join("; ")));
    }

    tracing::info!(
        origin = %origin,
        properties = kb.properties.len(),
        services = kb.services.len(),
        "Knowledge base loaded"
    );

    Ok(kb)
}
