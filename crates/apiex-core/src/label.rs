//! Registry-safe name derivation.
//!
//! Registry resource names are restricted to lowercase letters, digits and
//! hyphens. Apigee names (products, hostnames) are freer, so anything that
//! lands in a `metadata.name` field goes through [`label`] first.

/// Converts an arbitrary Apigee identifier into a registry-safe name.
///
/// Lowercases the input, maps every character outside `[a-z0-9-]` to a
/// hyphen, and strips leading/trailing hyphens.
pub fn label(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_matches('-').to_string()
}
