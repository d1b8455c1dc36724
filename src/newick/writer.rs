//! Newick format writing for [PhylogeneticTree]s.

use crate::model::tree::{PhylogeneticTree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes the given trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
pub fn write_newick_file<P: AsRef<Path>>(path: P, trees: &[PhylogeneticTree]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Tip names and internal labels are quoted when necessary (see
/// [escape_label]); branch lengths are written whenever they are set,
/// including a root edge.
///
/// # Example
/// ```
/// use rtt_reconcile::model::{BranchLength, PhylogeneticTree};
/// use rtt_reconcile::newick::to_newick;
///
/// let mut tree = PhylogeneticTree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(1.0)), "Little Spotted Kiwi".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(2.5)), "Tokoeka".to_string());
/// tree.add_root(vec![a, b], None, None);
///
/// assert_eq!(to_newick(&tree), "('Little Spotted Kiwi':1,Tokoeka:2.5);");
/// ```
pub fn to_newick(tree: &PhylogeneticTree) -> String {
    if !tree.is_root_set() {
        return String::new();
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    build_newick(tree, &mut newick, tree.root_index());
    newick.push(';');

    newick
}

/// Appends the subtree at `index`; iterative so ladder-like trees cannot overflow the stack.
fn build_newick(tree: &PhylogeneticTree, newick: &mut String, index: VertexIndex) {
    enum Step {
        Enter(VertexIndex),
        Separator,
        Close(VertexIndex),
    }

    let mut stack = vec![Step::Enter(index)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(current) => {
                let vertex = &tree[current];
                if let Some(label) = vertex.label() {
                    newick.push_str(&escape_label(label));
                    push_branch_length(newick, vertex.branch_length());
                    continue;
                }

                newick.push('(');
                stack.push(Step::Close(current));
                for (i, &child) in vertex.children().iter().enumerate().rev() {
                    stack.push(Step::Enter(child));
                    if i > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Separator => newick.push(','),
            Step::Close(current) => {
                let vertex = &tree[current];
                newick.push(')');
                if let Some(name) = vertex.name() {
                    newick.push_str(&escape_label(name));
                }
                push_branch_length(newick, vertex.branch_length());
            }
        }
    }
}

fn push_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
    if let Some(branch_length) = branch_length {
        newick.push(':');
        newick.push_str(&branch_length.to_string());
    }
}

/// Estimates the number of characters of the Newick string of `tree`,
/// used to pre-allocate the output.
pub(crate) fn estimate_newick_len(tree: &PhylogeneticTree) -> usize {
    // "(,)" per non-leaf vertex
    const INTERNAL_NODE_CHARS: usize = 3;
    // e.g. ":0.009529961339106089"
    const BRANCH_LENGTH_CHARS: usize = 20;

    let structure_capacity = (tree.num_vertices() - tree.num_leaves()) * INTERNAL_NODE_CHARS;
    let label_capacity: usize = tree
        .pre_order_iter()
        .filter_map(|v| v.label())
        .map(|label| label.len() + 2)
        .sum();
    let branch_capacity = tree
        .pre_order_iter()
        .filter(|v| v.has_branch_length())
        .count()
        * BRANCH_LENGTH_CHARS;

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}
