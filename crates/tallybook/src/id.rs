/// Timestamp-based entity id, e.g. `prod_1754400000000`. Matches the id
/// scheme already present in repository data files.
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", chrono::Utc::now().timestamp_millis())
}
