//! FEXCore version option list.
//!
//! The version picker shows the versions bundled with the app followed by
//! every FEXCore content profile the user has installed.  Installed profiles
//! are named `<type>-<version>` (e.g. `fexcore-2508`); only the part after the
//! first dash is shown.

/// Builds the ordered version option list.
///
/// `builtin` entries come first, unchanged.  Each profile entry name has
/// everything up to and including its first `-` removed; names without a dash
/// are kept whole.
pub fn version_options<B, P>(builtin: &[B], profile_entry_names: &[P]) -> Vec<String>
where
    B: AsRef<str>,
    P: AsRef<str>,
{
    let mut options: Vec<String> = builtin.iter().map(|b| b.as_ref().to_string()).collect();
    options.extend(
        profile_entry_names
            .iter()
            .map(|name| profile_version(name.as_ref()).to_string()),
    );
    options
}

/// Strips the content-type prefix from an installed profile entry name.
pub fn profile_version(entry_name: &str) -> &str {
    match entry_name.split_once('-') {
        Some((_, version)) => version,
        None => entry_name,
    }
}

/// Picks the version a shortcut should run with: its own override when set,
/// otherwise the owning container's version.
pub fn preferred_version<'a>(shortcut_override: Option<&'a str>, container_version: &'a str) -> &'a str {
    match shortcut_override {
        Some(v) if !v.is_empty() => v,
        _ => container_version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_come_first() {
        let opts = version_options(&["2508"], &["fexcore-2601"]);
        assert_eq!(opts, vec!["2508".to_string(), "2601".to_string()]);
    }

    #[test]
    fn test_profile_version_strips_only_first_dash() {
        assert_eq!(profile_version("fexcore-2508-rc1"), "2508-rc1");
    }

    #[test]
    fn test_profile_version_without_dash_is_unchanged() {
        assert_eq!(profile_version("2508"), "2508");
    }

    #[test]
    fn test_empty_inputs_give_empty_list() {
        let none: [&str; 0] = [];
        assert!(version_options(&none, &none).is_empty());
    }

    #[test]
    fn test_preferred_version_uses_shortcut_override() {
        assert_eq!(preferred_version(Some("2601"), "2508"), "2601");
    }

    #[test]
    fn test_preferred_version_falls_back_to_container() {
        assert_eq!(preferred_version(None, "2508"), "2508");
        assert_eq!(preferred_version(Some(""), "2508"), "2508");
    }
}
