//! Node names of a transferred zone.

use std::collections::HashSet;

use crate::config::ZONE_APEX_NODE;

/// Writes `name` relative to `origin`: `@` for the apex, the leading labels
/// for names inside the zone. Names outside the zone stay absolute.
///
/// Comparison is ASCII case-insensitive; the case of `name` is preserved.
pub fn relative_node_name(name: &str, origin: &str) -> String {
    let name = name.trim_end_matches('.');
    let origin = origin.trim_end_matches('.');

    if name.eq_ignore_ascii_case(origin) {
        return ZONE_APEX_NODE.to_string();
    }
    if origin.is_empty() {
        return name.to_string();
    }
    if name.len() > origin.len() + 1 {
        let split = name.len() - origin.len();
        if name.is_char_boundary(split) {
            let (prefix, suffix) = name.split_at(split);
            if suffix.eq_ignore_ascii_case(origin) {
                if let Some(relative) = prefix.strip_suffix('.') {
                    return relative.to_string();
                }
            }
        }
    }
    format!("{name}.")
}

/// Ordered, de-duplicated node names of one zone.
#[derive(Debug)]
pub struct ZoneNodes {
    origin: String,
    seen: HashSet<String>,
    nodes: Vec<String>,
}

impl ZoneNodes {
    /// Starts an empty node list for the zone at `origin`.
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            seen: HashSet::new(),
            nodes: Vec::new(),
        }
    }

    /// Adds the owner name of a record; repeated owners are kept once.
    pub fn add(&mut self, owner: &str) {
        let node = relative_node_name(owner, &self.origin);
        if self.seen.insert(node.to_ascii_lowercase()) {
            self.nodes.push(node);
        }
    }

    /// Number of distinct nodes so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` before the first record.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names in first-seen order.
    pub fn into_vec(self) -> Vec<String> {
        self.nodes
    }
}
