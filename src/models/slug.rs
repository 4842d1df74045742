/// Derives a stable identifier from a display name.
///
/// The name is lowercased, runs of non-alphanumeric characters collapse into
/// single `-` separators, leading and trailing runs are stripped, and the
/// result is prefixed. The derivation is deterministic, so re-submitting the
/// same name always lands on the same identifier.
///
/// Returns `None` when nothing of the name survives.
pub(crate) fn derive_id(prefix: &str, name: &str) -> Option<String> {
    let lowered = name.to_lowercase();
    let parts: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(format!("{}-{}", prefix, parts.join("-")))
}
