//! INSERT SQL generation.

/// Generate INSERT SQL with one placeholder per column.
pub fn insert<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let names: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    let placeholders = vec!["?"; names.len()];
    format!(
        "INSERT INTO {}({}) VALUES({});",
        table,
        names.join(","),
        placeholders.join(",")
    )
}
