/// Builds a homogeneous container from a variadic-style argument list
/// (spec §4.5.5). Strictly an ergonomic helper with no continuation-specific
/// contract — it just collects an iterator into a `Vec`.
pub fn populate<T>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    items.into_iter().collect()
}
