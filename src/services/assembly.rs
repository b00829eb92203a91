//! Walks over assembly budget trees.
//!
//! Trees come from the backend and are trusted to be acyclic.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::budget::AssemblyNode;
use crate::services::pricing::{PriceLine, Priced};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeCounts {
    pub folders: usize,
    pub articles: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Folder,
    Article,
}

/// One node of a pre-order walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatNode<'a> {
    pub depth: usize,
    pub kind: NodeKind,
    pub id: Uuid,
    pub description: &'a str,
    /// Quantity as entered on the node.
    pub quantity: Decimal,
    /// Quantity times every enclosing folder quantity.
    pub effective_quantity: Decimal,
    /// Node total times every enclosing folder quantity.
    pub total: Decimal,
}

pub fn count_nodes(nodes: &[AssemblyNode]) -> NodeCounts {
    let mut counts = NodeCounts::default();
    count_into(nodes, &mut counts);
    counts
}

fn count_into(nodes: &[AssemblyNode], counts: &mut NodeCounts) {
    for node in nodes {
        match node {
            AssemblyNode::Folder(folder) => {
                counts.folders += 1;
                count_into(&folder.children, counts);
            }
            AssemblyNode::Article(_) => counts.articles += 1,
        }
    }
}

pub fn tree_total(nodes: &[AssemblyNode]) -> Decimal {
    nodes.iter().map(AssemblyNode::total).sum()
}

pub fn flatten(nodes: &[AssemblyNode]) -> Vec<FlatNode<'_>> {
    let mut out = Vec::new();
    flatten_into(nodes, 0, Decimal::ONE, &mut out);
    out
}

fn flatten_into<'a>(
    nodes: &'a [AssemblyNode],
    depth: usize,
    multiplier: Decimal,
    out: &mut Vec<FlatNode<'a>>,
) {
    for node in nodes {
        match node {
            AssemblyNode::Folder(folder) => {
                out.push(FlatNode {
                    depth,
                    kind: NodeKind::Folder,
                    id: folder.id,
                    description: &folder.description,
                    quantity: folder.quantity,
                    effective_quantity: folder.quantity * multiplier,
                    total: node.total() * multiplier,
                });
                flatten_into(&folder.children, depth + 1, multiplier * folder.quantity, out);
            }
            AssemblyNode::Article(article) => out.push(FlatNode {
                depth,
                kind: NodeKind::Article,
                id: article.id,
                description: &article.description,
                quantity: article.quantity,
                effective_quantity: article.quantity * multiplier,
                total: node.total() * multiplier,
            }),
        }
    }
}

/// Every article of the tree as a price line at its effective quantity.
pub fn price_lines(nodes: &[AssemblyNode]) -> Vec<PriceLine> {
    let mut out = Vec::new();
    collect_lines(nodes, Decimal::ONE, &mut out);
    out
}

fn collect_lines(nodes: &[AssemblyNode], multiplier: Decimal, out: &mut Vec<PriceLine>) {
    for node in nodes {
        match node {
            AssemblyNode::Folder(folder) => {
                collect_lines(&folder.children, multiplier * folder.quantity, out)
            }
            AssemblyNode::Article(article) => {
                let mut line = PriceLine::of(article);
                line.quantity = article.quantity() * multiplier;
                out.push(line);
            }
        }
    }
}

pub fn find_node(nodes: &[AssemblyNode], id: Uuid) -> Option<&AssemblyNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let AssemblyNode::Folder(folder) = node {
            if let Some(found) = find_node(&folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Indented text rendering of the tree, one line per node.
pub fn render_tree(nodes: &[AssemblyNode]) -> Vec<String> {
    flatten(nodes)
        .into_iter()
        .map(|node| {
            let indent = "  ".repeat(node.depth);
            match node.kind {
                NodeKind::Folder => format!(
                    "{}[+] {} (x{}) = {}",
                    indent,
                    node.description,
                    node.quantity.normalize(),
                    node.total.round_dp(2)
                ),
                NodeKind::Article => format!(
                    "{}- {} x{} = {}",
                    indent,
                    node.description,
                    node.quantity.normalize(),
                    node.total.round_dp(2)
                ),
            }
        })
        .collect()
}
