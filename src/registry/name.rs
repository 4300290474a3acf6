//! Logger name hierarchy.
//!
//! Names are dot separated. `ROOT` sits above every other name; the parent
//! of `a.b.c` is `a.b` and the parent of `a` is `ROOT`.

/// Name of the top-most logger.
pub const ROOT: &str = "ROOT";

/// Separator between hierarchy segments.
pub const SEPARATOR: char = '.';

/// Map the empty name onto `ROOT`; every other name is kept as given.
pub fn canonical(name: &str) -> &str {
    if name.is_empty() {
        ROOT
    } else {
        name
    }
}

/// Immediate parent of `name`, or `None` for `ROOT`.
pub fn parent(name: &str) -> Option<&str> {
    if name == ROOT {
        return None;
    }
    match name.rsplit_once(SEPARATOR) {
        Some((prefix, _)) if !prefix.is_empty() => Some(prefix),
        _ => Some(ROOT),
    }
}

/// Walk from `name` up to and including `ROOT`.
pub fn lineage(name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(canonical(name)), |current| parent(*current))
}

/// Whether `name` sits strictly below `ancestor` in the hierarchy.
pub fn is_descendant(name: &str, ancestor: &str) -> bool {
    if name == ancestor {
        return false;
    }
    if ancestor == ROOT {
        return true;
    }
    name.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}
