//! Flat edge list → single rooted tree.
//!
//! The builder indexes nodes, derives a child→parent map and ordered parent→children lists from
//! the edges, rejects any cycle in the full edge set, then materializes every root with an
//! explicit stack into an arena. The arena is converted into nested [`TreeNode`] records
//! bottom-up, so no step recurses on the native call stack.

use crate::model::{Edge, Node, NodeId};
use crate::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize, Serializer};

pub const SYNTHETIC_ID: &str = "root";
pub const SYNTHETIC_COLOR: &str = "#ffffff";
pub const SYNTHETIC_LEVEL: i64 = -1;
pub const DEFAULT_ROOT_NAME: &str = "Root";
pub const EMPTY_NAME: &str = "Empty";
/// Leaf weight hint for area-proportional layouts.
pub const LEAF_VALUE: u32 = 1;

/// What to do when two edges name the same `to` node.
///
/// Root detection is the same under every policy: a node with any incoming edge is not a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateParentPolicy {
    /// The child is placed under every parent that declares it, so its subtree repeats.
    #[default]
    AttachAll,
    /// The child hangs only under its last declared parent.
    LastWins,
    /// A second parent is an error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyOptions {
    /// Display name of the synthetic super-root used when there are several roots.
    pub root_name: String,
    pub duplicate_parents: DuplicateParentPolicy,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            duplicate_parents: DuplicateParentPolicy::AttachAll,
        }
    }
}

impl HierarchyOptions {
    /// Rejects nodes with more than one parent instead of resolving them.
    pub fn strict() -> Self {
        Self {
            duplicate_parents: DuplicateParentPolicy::Reject,
            ..Self::default()
        }
    }

    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }
}

/// Output record consumed by tree/treemap clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub id: NodeId,
    pub color: String,
    pub level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    /// Omitted from the wire form when empty; clients branch on its presence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of records in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut total = 0usize;
        let mut stack: Vec<&TreeNode> = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }

    /// Maximum depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut max = 0usize;
        let mut stack: Vec<(&TreeNode, usize)> = vec![(self, 1)];
        while let Some((node, d)) = stack.pop() {
            max = max.max(d);
            stack.extend(node.children.iter().map(|c| (c, d + 1)));
        }
        max
    }
}

/// A built hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Exactly one real root.
    Node(TreeNode),
    /// Several roots wrapped under an artificial node.
    SyntheticRoot {
        name: String,
        children: Vec<TreeNode>,
    },
    /// No nodes at all.
    Empty,
}

impl Tree {
    /// Number of output records, synthetic nodes included.
    pub fn count(&self) -> usize {
        match self {
            Tree::Node(n) => n.count(),
            Tree::SyntheticRoot { children, .. } => {
                1 + children.iter().map(TreeNode::count).sum::<usize>()
            }
            Tree::Empty => 1,
        }
    }

    /// Top-level real nodes: the single root, or the synthetic root's children.
    pub fn roots(&self) -> &[TreeNode] {
        match self {
            Tree::Node(n) => std::slice::from_ref(n),
            Tree::SyntheticRoot { children, .. } => children,
            Tree::Empty => &[],
        }
    }

    /// Converts into the wire record; synthetic nodes carry no `value`.
    pub fn into_tree_node(self) -> TreeNode {
        match self {
            Tree::Node(n) => n,
            Tree::SyntheticRoot { name, children } => TreeNode {
                name,
                id: NodeId::from(SYNTHETIC_ID),
                color: SYNTHETIC_COLOR.to_string(),
                level: SYNTHETIC_LEVEL,
                value: None,
                children,
            },
            Tree::Empty => TreeNode {
                name: EMPTY_NAME.to_string(),
                id: NodeId::from(SYNTHETIC_ID),
                color: SYNTHETIC_COLOR.to_string(),
                level: SYNTHETIC_LEVEL,
                value: None,
                children: Vec::new(),
            },
        }
    }
}

#[derive(Serialize)]
struct SyntheticRecord<'a> {
    name: &'a str,
    id: &'static str,
    color: &'static str,
    level: i64,
    #[serde(skip_serializing_if = "<[TreeNode]>::is_empty")]
    children: &'a [TreeNode],
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (name, children) = match self {
            Tree::Node(n) => return n.serialize(serializer),
            Tree::SyntheticRoot { name, children } => (name.as_str(), children.as_slice()),
            Tree::Empty => (EMPTY_NAME, &[][..]),
        };
        SyntheticRecord {
            name,
            id: SYNTHETIC_ID,
            color: SYNTHETIC_COLOR,
            level: SYNTHETIC_LEVEL,
            children,
        }
        .serialize(serializer)
    }
}

#[derive(Debug)]
struct ArenaNode {
    source: usize,
    children: Vec<usize>,
}

/// Builds the hierarchy for `nodes`/`edges`.
///
/// Fails on undeclared edge endpoints, duplicate node ids, nodes lacking `color`/`level`, cycles,
/// and (under [`DuplicateParentPolicy::Reject`]) nodes with several parents.
pub fn build_hierarchy(nodes: &[Node], edges: &[Edge], options: &HierarchyOptions) -> Result<Tree> {
    let index = index_nodes(nodes)?;
    let endpoints = resolve_edges(edges, &index)?;

    if nodes.is_empty() {
        return Ok(Tree::Empty);
    }

    let parent_of = parent_map(nodes, &endpoints, options.duplicate_parents)?;
    let mut children_of = child_lists(nodes.len(), &endpoints);
    check_acyclic(nodes, &children_of)?;
    if options.duplicate_parents == DuplicateParentPolicy::LastWins {
        for (parent, children) in children_of.iter_mut().enumerate() {
            children.retain(|&child| parent_of[child] == Some(parent));
        }
    }

    let mut roots: Vec<usize> = (0..nodes.len())
        .filter(|&i| parent_of[i].is_none())
        .collect();
    roots.sort_by(|&a, &b| nodes[a].id.cmp(&nodes[b].id));

    let (arena, top) = materialize(&roots, &children_of);
    let mut built = into_records(nodes, &arena)?;
    let mut top_nodes: Vec<TreeNode> = top.iter().filter_map(|&i| built[i].take()).collect();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        roots = top_nodes.len(),
        "built hierarchy"
    );

    Ok(match top_nodes.len() {
        0 => Tree::Empty,
        1 => Tree::Node(top_nodes.remove(0)),
        _ => Tree::SyntheticRoot {
            name: options.root_name.clone(),
            children: top_nodes,
        },
    })
}

fn index_nodes(nodes: &[Node]) -> Result<FxHashMap<&NodeId, usize>> {
    let mut index: FxHashMap<&NodeId, usize> = FxHashMap::default();
    index.reserve(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(&node.id, i).is_some() {
            return Err(Error::DuplicateNode {
                id: node.id.to_string(),
            });
        }
    }
    Ok(index)
}

fn resolve_edges(
    edges: &[Edge],
    index: &FxHashMap<&NodeId, usize>,
) -> Result<Vec<(usize, usize)>> {
    let lookup = |id: &NodeId, edge_index: usize, endpoint: &'static str| {
        index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UndeclaredNode {
                id: id.to_string(),
                edge_index,
                endpoint,
            })
    };

    edges
        .iter()
        .enumerate()
        .map(|(i, e)| -> Result<(usize, usize)> {
            Ok((lookup(&e.from, i, "from")?, lookup(&e.to, i, "to")?))
        })
        .collect()
}

fn parent_map(
    nodes: &[Node],
    endpoints: &[(usize, usize)],
    policy: DuplicateParentPolicy,
) -> Result<Vec<Option<usize>>> {
    let mut parent_of: Vec<Option<usize>> = vec![None; nodes.len()];
    for &(parent, child) in endpoints {
        match parent_of[child] {
            Some(prev) if prev != parent => match policy {
                DuplicateParentPolicy::Reject => {
                    return Err(Error::DuplicateParent {
                        child: nodes[child].id.to_string(),
                        first: nodes[prev].id.to_string(),
                        second: nodes[parent].id.to_string(),
                    });
                }
                DuplicateParentPolicy::LastWins => {
                    tracing::debug!(
                        child = %nodes[child].id,
                        dropped = %nodes[prev].id,
                        kept = %nodes[parent].id,
                        "node has several parents; keeping the last"
                    );
                }
                DuplicateParentPolicy::AttachAll => {
                    tracing::debug!(
                        child = %nodes[child].id,
                        parents = %format_args!("{}, {}", nodes[prev].id, nodes[parent].id),
                        "node has several parents; its subtree repeats"
                    );
                }
            },
            _ => {}
        }
        parent_of[child] = Some(parent);
    }
    Ok(parent_of)
}

/// Ordered children per parent, in edge order; an identical repeated edge counts once.
fn child_lists(len: usize, endpoints: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); len];
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    for &(parent, child) in endpoints {
        if seen.insert((parent, child)) {
            children_of[parent].push(child);
        }
    }
    children_of
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    Open,
    Done,
}

/// Depth-first search over every edge, entered in id order. A child that is still open closes a
/// cycle made of the open path from that child down to the current node.
fn check_acyclic(nodes: &[Node], children_of: &[Vec<usize>]) -> Result<()> {
    let mut mark = vec![Mark::New; nodes.len()];
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[a].id.cmp(&nodes[b].id));

    for start in order {
        if mark[start] != Mark::New {
            continue;
        }
        mark[start] = Mark::Open;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let Some(&child) = children_of[node].get(next) else {
                mark[node] = Mark::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;
            match mark[child] {
                Mark::New => {
                    mark[child] = Mark::Open;
                    stack.push((child, 0));
                }
                Mark::Open => {
                    let from = stack.iter().position(|&(n, _)| n == child).unwrap_or(0);
                    let members: Vec<usize> = stack[from..].iter().map(|&(n, _)| n).collect();
                    return Err(cycle_error(nodes, members));
                }
                Mark::Done => {}
            }
        }
    }
    Ok(())
}

/// Pre-order walk from the sorted roots. Returns the arena and the arena indices of the roots.
///
/// The edge set is acyclic here, so every walk terminates and every node is reached.
fn materialize(roots: &[usize], children_of: &[Vec<usize>]) -> (Vec<ArenaNode>, Vec<usize>) {
    let mut arena: Vec<ArenaNode> = Vec::with_capacity(children_of.len());
    let mut top: Vec<usize> = Vec::with_capacity(roots.len());
    let mut stack: Vec<(usize, Option<usize>)> = roots.iter().rev().map(|&r| (r, None)).collect();

    while let Some((source, parent_slot)) = stack.pop() {
        let idx = arena.len();
        arena.push(ArenaNode {
            source,
            children: Vec::new(),
        });
        match parent_slot {
            Some(p) => arena[p].children.push(idx),
            None => top.push(idx),
        }

        for &child in children_of[source].iter().rev() {
            stack.push((child, Some(idx)));
        }
    }

    (arena, top)
}

/// `members` is the cycle in edge direction; it is reported from its smallest id and closed.
fn cycle_error(nodes: &[Node], mut members: Vec<usize>) -> Error {
    let smallest = (0..members.len()).min_by(|&a, &b| nodes[members[a]].id.cmp(&nodes[members[b]].id));
    if let Some(pos) = smallest {
        members.rotate_left(pos);
    }
    let mut path: Vec<String> = members.iter().map(|&i| nodes[i].id.to_string()).collect();
    if let Some(first) = path.first().cloned() {
        path.push(first);
    }
    Error::Cycle { path }
}

fn into_records(nodes: &[Node], arena: &[ArenaNode]) -> Result<Vec<Option<TreeNode>>> {
    let mut built: Vec<Option<TreeNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    // Pre-order places every child after its parent, so a reverse sweep sees children first.
    for idx in (0..arena.len()).rev() {
        let entry = &arena[idx];
        let node = &nodes[entry.source];
        let color = node.color.clone().ok_or_else(|| Error::MissingField {
            id: node.id.to_string(),
            field: "color",
        })?;
        let level = node.level.ok_or_else(|| Error::MissingField {
            id: node.id.to_string(),
            field: "level",
        })?;
        let children = entry
            .children
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        built[idx] = Some(TreeNode {
            name: node.label.clone(),
            id: node.id.clone(),
            color,
            level,
            value: Some(LEAF_VALUE),
            children,
        });
    }
    Ok(built)
}
