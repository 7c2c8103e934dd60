//! Case-insensitive matching of item paths against well-known file names.
//!
//! Matching is on the final path segment only, so `c:\myfolder\sonarlint.dll`
//! and `sonarlint.dll` both match `SonarLint.dll` while `sonarlint.dll.bak`
//! does not. Both `/` and `\` separate segments regardless of host platform,
//! since project files carry Windows paths.

use prebuild_core::types::FxHashSet;

/// Final segment of `path`, splitting on `/` and `\`.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// True when the file name of `path` equals one of `names`, ignoring case.
pub fn matches_well_known(path: &str, names: &[String]) -> bool {
    let file_name = file_name_of(path.trim()).to_lowercase();
    !file_name.is_empty() && names.iter().any(|n| n.to_lowercase() == file_name)
}

/// Drop every path that matches a well-known name, keeping order.
pub fn remove_well_known<'a>(
    paths: impl IntoIterator<Item = &'a str>,
    names: &[String],
) -> Vec<String> {
    paths
        .into_iter()
        .filter(|p| !matches_well_known(p, names))
        .map(str::to_string)
        .collect()
}

/// Remove exact duplicates, keeping the first occurrence.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn file_name_handles_both_separators() {
        assert_eq!(file_name_of(r"c:\x\SONARLINT.DLL"), "SONARLINT.DLL");
        assert_eq!(file_name_of("a/b/c.dll"), "c.dll");
        assert_eq!(file_name_of("plain.dll"), "plain.dll");
        assert_eq!(file_name_of(r"c:\dir\"), "");
    }

    #[test]
    fn filters_by_file_name_identity() {
        let well_known = names(&["sonarlint.dll"]);
        let kept = remove_well_known(
            ["SonarLint.dll", r"c:\x\SONARLINT.DLL", "other.dll", "sonarlint.dll.bak"],
            &well_known,
        );
        assert_eq!(kept, names(&["other.dll", "sonarlint.dll.bak"]));
    }

    #[test]
    fn directory_named_like_pattern_does_not_match() {
        let well_known = names(&["SonarLint.dll"]);
        assert!(!matches_well_known(r"c:\SonarLint.dll\my.dll", &well_known));
        assert!(!matches_well_known("XXSONARLINT.dll", &well_known));
        assert!(matches_well_known("../rel/sonarlint.DLL", &well_known));
    }

    #[test]
    fn dedup_keeps_first() {
        let items = names(&["a", "b", "a", "c", "b"]);
        assert_eq!(dedup_preserving_order(items), names(&["a", "b", "c"]));
    }
}
