//! Inventory to display-tree conversion.
//!
//! A fresh immutable tree is built from the flat inventory on every
//! call; nodes are never mutated after construction. Directories sort
//! before files, names compare in natural (digit-aware) order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::path::PathBuf;
use std::str::Chars;

use serde::Serialize;

use super::events::MarkdownEntry;

/// One node of the display tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Path segment name.
    pub name: String,
    /// Absolute path for file nodes, `None` for directories.
    pub path: Option<PathBuf>,
    /// Root-relative path of this node, `/`-separated.
    pub relative_path: String,
    /// Whether this node names a file.
    pub is_file: bool,
    /// Child nodes, sorted directories-first.
    pub children: Vec<TreeNode>,
}

#[derive(Default)]
struct Builder {
    file_path: Option<PathBuf>,
    children: BTreeMap<String, Builder>,
}

/// Build a display tree from a flat inventory.
///
/// If two entries normalize to the same relative path the last one wins.
#[must_use]
pub fn build_tree(entries: &[MarkdownEntry]) -> Vec<TreeNode> {
    let mut root = Builder::default();

    for entry in entries {
        let parts: Vec<&str> = entry
            .relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            continue;
        }
        let mut node = &mut root;
        for part in &parts {
            node = node.children.entry((*part).to_string()).or_default();
        }
        node.file_path = Some(entry.path.clone());
    }

    into_nodes(root.children, "")
}

fn into_nodes(children: BTreeMap<String, Builder>, prefix: &str) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = children
        .into_iter()
        .map(|(name, builder)| {
            let relative_path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            let is_file = builder.file_path.is_some();
            let children = into_nodes(builder.children, &relative_path);
            TreeNode {
                name,
                path: builder.file_path,
                relative_path,
                is_file,
                children,
            }
        })
        .collect();

    nodes.sort_by(|a, b| match (a.is_file, b.is_file) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => natural_cmp(&a.name, &b.name),
    });

    nodes
}

/// Natural-order name comparison: digit runs compare numerically, other
/// characters case-insensitively, with a raw comparison as tiebreaker.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ac = a.chars().peekable();
    let mut bc = b.chars().peekable();
    loop {
        match (ac.peek().copied(), bc.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    match take_number(&mut ac).cmp(&take_number(&mut bc)) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                } else {
                    match x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()) {
                        Ordering::Equal => {
                            ac.next();
                            bc.next();
                        }
                        ord => return ord,
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut Peekable<Chars>) -> u64 {
    let mut n: u64 = 0;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(u64::from(d));
        chars.next();
    }
    n
}
