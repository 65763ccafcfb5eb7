//! Formula mutation for quiz distractors.
//!
//! [`tweak_formula`] toggles a negation on one randomly chosen non-root node of
//! a private copy of the formula: a `Not` is removed (its child takes its
//! place), anything else gets wrapped in a new `Not`. The caller's formula is
//! never touched.
//!
//! A single toggle usually, but not always, changes the truth table: removing
//! one of two stacked negations, for instance, leaves an equivalent formula.
//! Use [`crate::quiz::find_distractor`] for a bounded search that guarantees a
//! non-equivalent result.

use log::debug;
use rand::Rng;

use crate::ast::Node;
use crate::formula::Formula;

/// Path from the root to a node: child indices, outermost first.
type Path = Vec<usize>;

/// Paths of all non-root nodes, in pre-order.
fn edges(root: &Node) -> Vec<Path> {
    let mut paths = Vec::new();
    let mut stack: Vec<(&Node, Path)> = vec![(root, Vec::new())];
    while let Some((node, path)) = stack.pop() {
        for (i, child) in node.children().iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(i);
            stack.push((child, child_path));
        }
        if !path.is_empty() {
            paths.push(path);
        }
    }
    paths
}

fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = root;
    for &i in path {
        node = node.children_mut().get_mut(i)?;
    }
    Some(node)
}

/// Removes a negation from `node`, or adds one.
fn toggle_not(node: &mut Node) {
    let taken = std::mem::replace(node, Node::Const(false));
    *node = match taken {
        Node::Not(child) => *child,
        other => Node::not(other),
    };
}

/// Number of nodes that [`tweak_formula`] can choose from.
pub fn edge_count(formula: &Formula) -> usize {
    edges(formula.root()).len()
}

/// Returns a copy of `formula` with one negation toggled.
///
/// A single-leaf formula has nothing to toggle and is returned unchanged.
///
/// ```
/// use logic_tutor::formula::Formula;
/// use logic_tutor::tweak::tweak_formula;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let f: Formula = "A and B".parse().unwrap();
/// let g = tweak_formula(&f, &mut rng);
/// assert!(g.to_string() == "not A and B" || g.to_string() == "A and not B");
/// assert_eq!(f.to_string(), "A and B");
/// ```
pub fn tweak_formula<R: Rng + ?Sized>(formula: &Formula, rng: &mut R) -> Formula {
    let mut root = formula.root().clone();
    let paths = edges(&root);
    if paths.is_empty() {
        debug!("tweak({}): nothing to toggle", formula);
        return Formula::new(root);
    }

    let chosen = &paths[rng.random_range(0..paths.len())];
    if let Some(node) = node_at_mut(&mut root, chosen) {
        toggle_not(node);
    }
    let tweaked = Formula::new(root);
    debug!("tweak({}) at {:?} -> {}", formula, chosen, tweaked);
    tweaked
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    use super::*;

    fn parse(text: &str) -> Formula {
        text.parse().unwrap()
    }

    #[test]
    fn test_edges_preorder() {
        let f = parse("not A and (B or C)");
        let paths = edges(f.root());
        assert_eq!(
            paths,
            vec![vec![0], vec![0, 0], vec![1], vec![1, 0], vec![1, 1]]
        );
        assert_eq!(edge_count(&f), 5);
    }

    #[test]
    fn test_single_leaf_is_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for text in ["A", "true"] {
            let f = parse(text);
            assert_eq!(edge_count(&f), 0);
            assert_eq!(tweak_formula(&f, &mut rng), f);
        }
    }

    #[test]
    fn test_negated_leaf_gets_double_negation() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let f = parse("not A");
        // The only edge is `A`, which gets a second negation.
        assert_eq!(tweak_formula(&f, &mut rng).to_string(), "not not A");
    }

    #[test]
    fn test_toggle_not() {
        let mut node = Node::not(Node::input("A"));
        toggle_not(&mut node);
        assert_eq!(node, Node::input("A"));
        toggle_not(&mut node);
        assert_eq!(node, Node::not(Node::input("A")));
    }

    #[test]
    fn test_tweak_changes_structure() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let f = parse("not (A and B) or C and not not D");
        for _ in 0..100 {
            let g = tweak_formula(&f, &mut rng);
            assert_ne!(g.root(), f.root());
            let diff = g.root().size() as isize - f.root().size() as isize;
            assert!(diff == 1 || diff == -1);
        }
        assert_eq!(f.to_string(), "not (A and B) or C and not not D");
    }

    #[test]
    fn test_every_edge_is_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let f = parse("A or B and C");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(tweak_formula(&f, &mut rng).to_string());
        }
        assert_eq!(seen.len(), edge_count(&f));
    }

    #[test]
    fn test_tweak_is_deterministic_for_seed() {
        let f = parse("(A or B) and (C or not D)");
        let g1 = tweak_formula(&f, &mut ChaCha8Rng::seed_from_u64(9));
        let g2 = tweak_formula(&f, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(g1, g2);
    }
}
