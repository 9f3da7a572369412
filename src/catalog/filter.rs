//! Selector view over the catalog: search, free-only, recommended first.

use super::descriptor::ModelDescriptor;

/// Models to display, in display order.
///
/// `query` matches name or provider case-insensitively. Allow-listed models
/// move to the front; the sort is stable so provider order is otherwise kept.
pub fn visible_models<'a>(
    catalog: &'a [ModelDescriptor],
    query: Option<&str>,
    free_only: bool,
) -> Vec<&'a ModelDescriptor> {
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let mut models: Vec<&ModelDescriptor> = catalog
        .iter()
        .filter(|m| !free_only || m.free)
        .filter(|m| match query {
            Some(ref q) => {
                m.name.to_lowercase().contains(q.as_str())
                    || m.provider.to_lowercase().contains(q.as_str())
            }
            None => true,
        })
        .collect();
    models.sort_by_key(|m| !m.is_reliable());
    models
}
