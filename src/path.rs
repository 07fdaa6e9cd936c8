//! Rendering of locations inside a document, e.g. `a.b[0].c`.

pub(crate) const ROOT: &str = "root";

pub(crate) fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{}.{}", path, key)
    }
}

pub(crate) fn join_index(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// The empty path only ever shows up in output as `root`.
pub(crate) fn display(path: &str) -> String {
    if path.is_empty() {
        ROOT.to_owned()
    } else {
        path.to_owned()
    }
}
