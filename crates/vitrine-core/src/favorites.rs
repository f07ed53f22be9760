use std::collections::HashSet;

/// Store key the favorites set is mirrored under.
pub const FAVORITES_KEY: &str = "vitrine.favorites";

/// Serialize a favorites set as a comma-joined id list
///
/// Ids are sorted so the persisted form is deterministic. Product ids are
/// catalog-assigned and never contain the delimiter.
pub fn serialize(favorites: &HashSet<String>) -> String {
    let mut ids: Vec<&str> = favorites.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids.join(",")
}

/// Parse the persisted form back into a set
///
/// Empty segments are skipped, so the empty string round-trips to the empty
/// set.
pub fn deserialize(raw: &str) -> HashSet<String> {
    raw.split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
