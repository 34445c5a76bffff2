//! The `projector` module walks the single winning [`ParseTree`] the [`crate::disambiguator`]
//! selected and reconstructs an [`crate::address::AddressResult`] from it. It never invents
//! characters: every string it emits is a space-joined concatenation of surface substrings
//! already present in the tokens it was given.
use crate::address::{AddressKind, AddressResult, DoorNumber};
use crate::chart::ParseTree;
use crate::grammar::NonTerminal;
use crate::tokenizer::Token;

fn surface(tree: &ParseTree, tokens: &[Token]) -> String {
    tree.positions()
        .into_iter()
        .map(|pos| tokens[pos].surface().as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn street_names(tree: &ParseTree, tokens: &[Token]) -> Vec<String> {
    tree.nodes()
        .into_iter()
        .filter(|n| n.label() == Some(NonTerminal::Street))
        .map(|n| surface(n, tokens))
        .collect()
}

fn door_number(tree: &ParseTree, tokens: &[Token]) -> Option<DoorNumber> {
    let node = tree.find(NonTerminal::DoorNumber)?;
    let children = match node {
        ParseTree::Node { children, .. } => children,
        ParseTree::Leaf { .. } => return None,
    };
    match children.as_slice() {
        [unit, value] => Some(DoorNumber {
            unit: Some(surface(unit, tokens)),
            value: surface(value, tokens),
        }),
        [value] => Some(DoorNumber {
            unit: None,
            value: surface(value, tokens),
        }),
        _ => None,
    }
}

fn floor(tree: &ParseTree, tokens: &[Token]) -> Option<String> {
    tree.find(NonTerminal::Floor).map(|n| surface(n, tokens))
}

fn kind_of(tree: &ParseTree) -> Option<AddressKind> {
    let child = match tree {
        ParseTree::Node { label: NonTerminal::Address, children } => children.first()?,
        other => other,
    };
    match child.label()? {
        NonTerminal::Simple => Some(AddressKind::Simple),
        NonTerminal::Intersection => Some(AddressKind::Intersection),
        NonTerminal::Between => Some(AddressKind::Between),
        _ => None,
    }
}

/// Projects a winning parse tree into the public result shape. The trailing `location` phrase
/// on a `simple` address, if the tree has one, is walked (it's part of the tree) but discarded —
/// no field on [`AddressResult`] receives it.
pub fn project(tree: &ParseTree, tokens: &[Token]) -> AddressResult {
    let Some(kind) = kind_of(tree) else {
        return AddressResult::unknown();
    };
    AddressResult {
        kind: Some(kind),
        street_names: street_names(tree, tokens),
        door_number: door_number(tree, tokens),
        floor: floor(tree, tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart;
    use crate::disambiguator::disambiguate;
    use crate::grammar::Grammar;
    use crate::tokenizer::tokenize;

    fn project_line(line: &str) -> AddressResult {
        let grammar = Grammar::new();
        let tokens = tokenize(line).unwrap();
        let trees = chart::parse(&grammar, &tokens);
        match disambiguate(&trees) {
            Some(tree) => project(tree, &tokens),
            None => AddressResult::unknown(),
        }
    }

    #[test]
    fn projects_simple_with_door_number() {
        let result = project_line("Sarmiento N° 1100");
        assert_eq!(result.kind, Some(AddressKind::Simple));
        assert_eq!(result.street_names, vec!["Sarmiento".to_string()]);
        let door = result.door_number.unwrap();
        assert_eq!(door.unit.as_deref(), Some("N°"));
        assert_eq!(door.value, "1100");
    }

    #[test]
    fn discards_trailing_location_phrase() {
        let result = project_line("Ruta 33 s/n Villa Chacon");
        assert_eq!(result.kind, Some(AddressKind::Simple));
        assert_eq!(result.street_names, vec!["Ruta 33".to_string()]);
        assert_eq!(result.door_number.unwrap().value, "s/n");
    }

    #[test]
    fn projects_between_with_three_streets() {
        let result = project_line(
            "Av. Libertador N 1331 2ndo A e/ 25 de Mayo y Bartolome Mitre",
        );
        assert_eq!(result.kind, Some(AddressKind::Between));
        assert_eq!(result.street_names.len(), 3);
        assert_eq!(result.floor.as_deref(), Some("2ndo A"));
    }
}
