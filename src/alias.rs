// Exact-match display aliases for node and component names

use std::collections::HashMap;

/// Name → display name substitutions, loaded from `[alias]` / `[component_alias]`.
pub type AliasMap = HashMap<String, String>;

/// Returns the alias for `name` if `mapping` has an exact key for it, else `name` itself.
pub fn resolve<'a>(name: &'a str, mapping: &'a AliasMap) -> &'a str {
    mapping.get(name).map(String::as_str).unwrap_or(name)
}
