//! The `disambiguator` module picks exactly one winning [`ParseTree`] out of however many the
//! [`crate::chart`] parser found for a line. The grammar is deliberately permissive — it admits
//! every syntactically valid reading, including the ones a human would immediately discard —
//! so ranking, not recognition, is where the crate's actual judgment calls live.
use crate::address::AddressKind;
use crate::chart::ParseTree;
use crate::grammar::NonTerminal;

/// The lexicographic ranking key compared across candidate trees. Larger is better in every
/// component; ties are broken component by component, left to right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    /// Trees with more `unnamed_street` subtrees outrank those with fewer — this is what keeps
    /// `Calle 11` read as a named street numbered eleven rather than an unnamed street reading
    /// that never actually fires for this category sequence, and more generally prefers the
    /// route/type-marked reading whenever the grammar offers one.
    unnamed_street_count: usize,
    /// A tree that accounts for a door number outranks one that doesn't.
    has_door_number: bool,
    /// A kind preference, conditioned on whether a door number is present (see `kind_rank`).
    kind_rank: u8,
}

/// Maps a tree's top-level kind to a small rank value, with the preference order depending on
/// whether the tree carries a door number. With a door number present, `between` ranks above
/// `simple` above `intersection` (a number strongly suggests a single addressed street, with
/// `between` only winning when the grammar found a genuine three-street clause). With no door
/// number, `between` still ranks highest, but `intersection` now ranks above `simple` — lacking
/// any numeric evidence, a connector word most likely joins two street names rather than
/// extending one.
fn kind_rank(kind: AddressKind, has_door_number: bool) -> u8 {
    use AddressKind::*;
    match (has_door_number, kind) {
        (true, Intersection) => 0,
        (true, Simple) => 1,
        (true, Between) => 2,
        (false, Simple) => 0,
        (false, Intersection) => 1,
        (false, Between) => 2,
    }
}

fn kind_of(tree: &ParseTree) -> Option<AddressKind> {
    let child_label = match tree {
        ParseTree::Node { label: NonTerminal::Address, children } => {
            children.first().and_then(ParseTree::label)
        }
        _ => tree.label(),
    }?;
    match child_label {
        NonTerminal::Simple => Some(AddressKind::Simple),
        NonTerminal::Intersection => Some(AddressKind::Intersection),
        NonTerminal::Between => Some(AddressKind::Between),
        _ => None,
    }
}

fn count_label(tree: &ParseTree, label: NonTerminal) -> usize {
    tree.nodes().into_iter().filter(|n| n.label() == Some(label)).count()
}

fn has_label(tree: &ParseTree, label: NonTerminal) -> bool {
    tree.find(label).is_some()
}

/// Computes the ranking key for one candidate tree. Returns `None` if the tree has no
/// recognizable top-level kind — which should not happen for a tree [`crate::chart::parse`]
/// actually returned, but is handled defensively rather than panicking.
pub fn rank_key(tree: &ParseTree) -> Option<RankKey> {
    let kind = kind_of(tree)?;
    let has_door_number = has_label(tree, NonTerminal::DoorNumber);
    Some(RankKey {
        unnamed_street_count: count_label(tree, NonTerminal::UnnamedStreet),
        has_door_number,
        kind_rank: kind_rank(kind, has_door_number),
    })
}

/// Picks the single best tree among `trees` by [`RankKey`]. Returns `None` when `trees` is
/// empty, when no tree has a recognizable rank, or when more than one tree ties on the full
/// key — an irresolvable ambiguity, which the caller turns into `kind: null`.
pub fn disambiguate(trees: &[ParseTree]) -> Option<&ParseTree> {
    let keyed: Vec<(usize, RankKey)> = trees
        .iter()
        .enumerate()
        .filter_map(|(idx, tree)| rank_key(tree).map(|key| (idx, key)))
        .collect();
    let max_key = keyed.iter().map(|(_, key)| *key).max()?;
    let mut winners = keyed.iter().filter(|(_, key)| *key == max_key);
    let first = winners.next()?;
    if winners.next().is_some() {
        tracing::trace!("disambiguation tied across the full rank key; reporting unknown");
        return None;
    }
    Some(&trees[first.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart;
    use crate::grammar::Grammar;
    use crate::tokenizer::tokenize;

    fn best_kind(line: &str) -> Option<AddressKind> {
        let grammar = Grammar::new();
        let tokens = tokenize(line).unwrap();
        let trees = chart::parse(&grammar, &tokens);
        disambiguate(&trees).and_then(kind_of)
    }

    #[test]
    fn prefers_simple_with_door_number_over_connector_reading() {
        assert_eq!(best_kind("Vicente Lopez y Planes 120"), Some(AddressKind::Simple));
    }

    #[test]
    fn prefers_intersection_without_door_number() {
        assert_eq!(best_kind("Tucuman y 9 de Julio"), Some(AddressKind::Intersection));
        assert_eq!(best_kind("Cordoba e Hipolito Yrigoyen"), Some(AddressKind::Intersection));
    }

    #[test]
    fn no_derivation_yields_no_winner() {
        let grammar = Grammar::new();
        let tokens = tokenize("qwerty").unwrap();
        let trees = chart::parse(&grammar, &tokens);
        assert!(disambiguate(&trees).is_none());
    }
}
