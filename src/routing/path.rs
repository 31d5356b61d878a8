//! URL path derivation from route file locations.
//!
//! # Responsibilities
//! - Convert `[name]` segments to axum's `{name}` template syntax
//! - Join ancestor directory segments into a mount prefix
//! - Derive documentation tags and registry keys
//!
//! # Design Decisions
//! - Pure string functions, no filesystem access
//! - The base-route marker never contributes a segment
//! - The root base-route file maps to the empty prefix (application root)

use std::path::{Component, Path};

/// Convert square brackets to curly brackets for route parameters.
pub fn square_to_curly(path: &str) -> String {
    path.replace('[', "{").replace(']', "}")
}

/// URL segment for a single directory name or file stem.
pub fn segment_for(name: &str) -> String {
    square_to_curly(name)
}

/// Names of every `[name]` group in a segment, in order of appearance.
pub fn param_names(segment: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = segment;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close) => {
                names.push(after[..close].to_string());
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    names
}

/// Returns true if the name contains a bracketed parameter group.
pub fn is_dynamic(name: &str) -> bool {
    !param_names(name).is_empty()
}

/// Check that a directory name or file stem maps to a mountable segment.
pub fn validate_segment(name: &str) -> Result<(), &'static str> {
    if name.contains(['{', '}']) {
        return Err("curly braces are reserved for path parameters");
    }
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return Err("unbalanced square brackets"),
            ']' => depth -= 1,
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced square brackets");
    }

    let params = param_names(name);
    if params.len() > 1 {
        return Err("only one path parameter per segment");
    }
    for param in &params {
        if param.is_empty() {
            return Err("empty path parameter name");
        }
        if param.starts_with('*') {
            return Err("catch-all parameters cannot be mounted");
        }
        if param.contains('[') {
            return Err("nested square brackets");
        }
    }

    Ok(())
}

/// Derive the mount prefix for a route file.
///
/// `dirs` are the directory names between the root and the file, `stem` is
/// the file name without extension. A stem equal to `index_stem` mounts at
/// its directory's own prefix.
pub fn derive_prefix<S: AsRef<str>>(dirs: &[S], stem: &str, index_stem: &str) -> String {
    let mut segments: Vec<String> = dirs.iter().map(|d| segment_for(d.as_ref())).collect();
    if stem != index_stem {
        segments.push(segment_for(stem));
    }

    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Documentation tag for a mount prefix.
pub fn derive_tag(prefix: &str) -> String {
    if prefix.is_empty() {
        "/".to_string()
    } else {
        prefix.to_string()
    }
}

/// Registry key for a root-relative route file path.
///
/// `users/[user_id]/route.rs` becomes `users/[user_id]/route`.
pub fn module_key(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_square_to_curly() {
        assert_eq!(square_to_curly("users/[user_id]"), "users/{user_id}");
        assert_eq!(square_to_curly("products/[category]/[id]"), "products/{category}/{id}");
        assert_eq!(square_to_curly("normal/path"), "normal/path");
    }

    #[test]
    fn test_param_names() {
        assert_eq!(param_names("[user_id]"), vec!["user_id"]);
        assert_eq!(param_names("[a]-[b]"), vec!["a", "b"]);
        assert!(param_names("profile").is_empty());
        // Unterminated group is not a parameter
        assert!(param_names("[oops").is_empty());
    }

    #[test]
    fn test_is_dynamic() {
        assert!(is_dynamic("[id]"));
        assert!(!is_dynamic("users"));
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("users").is_ok());
        assert!(validate_segment("[user_id]").is_ok());
        assert!(validate_segment("v[version]").is_ok());
        assert_eq!(validate_segment("[]"), Err("empty path parameter name"));
        assert_eq!(validate_segment("[*rest]"), Err("catch-all parameters cannot be mounted"));
        assert_eq!(validate_segment("[id"), Err("unbalanced square brackets"));
        assert_eq!(validate_segment("]a["), Err("unbalanced square brackets"));
        assert_eq!(validate_segment("a[b]c]d["), Err("unbalanced square brackets"));
        assert_eq!(validate_segment("{id}"), Err("curly braces are reserved for path parameters"));
        assert_eq!(validate_segment("[a]-[b]"), Err("only one path parameter per segment"));
        assert_eq!(validate_segment("[[id]]"), Err("nested square brackets"));
    }

    #[test]
    fn test_prefix_for_index_file() {
        assert_eq!(derive_prefix(&["users"], "route", "route"), "/users");
        assert_eq!(
            derive_prefix(&["documents", "[document_id]"], "route", "route"),
            "/documents/{document_id}"
        );
    }

    #[test]
    fn test_prefix_for_named_file() {
        assert_eq!(derive_prefix(&["users"], "[user_id]", "route"), "/users/{user_id}");
        assert_eq!(
            derive_prefix(&["users", "[user_id]"], "profile", "route"),
            "/users/{user_id}/profile"
        );
    }

    #[test]
    fn test_index_file_adds_no_segment() {
        let index = derive_prefix(&["users"], "route", "route");
        let sibling = derive_prefix(&["users"], "search", "route");
        assert_eq!(sibling, format!("{}/search", index));
    }

    #[test]
    fn test_root_prefixes() {
        let none: [&str; 0] = [];
        assert_eq!(derive_prefix(&none, "route", "route"), "");
        assert_eq!(derive_prefix(&none, "health", "route"), "/health");
    }

    #[test]
    fn test_derive_tag() {
        assert_eq!(derive_tag(""), "/");
        assert_eq!(derive_tag("/users/{user_id}"), "/users/{user_id}");
    }

    #[test]
    fn test_module_key() {
        let path: PathBuf = ["users", "[user_id]", "route.rs"].iter().collect();
        assert_eq!(module_key(&path), "users/[user_id]/route");
        assert_eq!(module_key(Path::new("health.rs")), "health");
    }
}
