//! Parsing of `git status --porcelain` output.
//!
//! The worktree pass of a scan cares about files that were modified,
//! newly created, or renamed; deletions are skipped. Rename entries
//! contribute only their destination path.

/// Extract the uncommitted paths eligible for collection, in the order
/// git lists them.
pub fn uncommitted_paths(porcelain: &str) -> Vec<String> {
    let mut paths = Vec::new();

    for line in porcelain.lines() {
        // Porcelain v1: two status characters, a space, then the path.
        if line.len() < 4 {
            continue;
        }
        let code = &line[..2];
        let rest = &line[3..];

        let eligible = code == "??"
            || code.contains('A')
            || code.contains('M')
            || code.contains('R');
        if !eligible {
            continue;
        }

        // Renames are listed as `old -> new`; only the destination counts.
        let path = match rest.rsplit_once(" -> ") {
            Some((_, to)) => to,
            None => rest,
        };
        paths.push(unquote(path).to_string());
    }

    paths
}

/// Strip the quotes git adds around paths with unusual characters.
fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
}
