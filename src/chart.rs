//! The `chart` module is the Earley-style recognizer that turns a token sequence into every
//! syntactically valid [`ParseTree`] under the [`crate::grammar::Grammar`]. A chart parser,
//! rather than a simpler recursive-descent or `nom` combinator stack, is mandatory here: the
//! grammar's left-recursive productions (a street name or floor description growing one token
//! at a time) would send naive recursive descent into infinite regress.
//!
//! Ambiguity is not resolved here — every derivation the grammar admits is returned, in a
//! reproducible order, for the [`crate::disambiguator`] to rank.
use std::collections::HashMap;

use crate::grammar::{Grammar, NonTerminal, Symbol};
use crate::tokenizer::Token;

/// A node in a parse tree: either a leaf referencing one input token by position, or an
/// interior node labeled with the [`NonTerminal`] it derives, holding its children
/// left-to-right. Leaves never carry surface text — only the position — which is what lets a
/// tree be cached and reprojected onto a different but category-equivalent token sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParseTree {
    /// A single matched token, identified by its position in the token sequence.
    Leaf { position: usize },
    /// A nonterminal and the children its winning production matched, left to right.
    Node {
        label: NonTerminal,
        children: Vec<ParseTree>,
    },
}

impl ParseTree {
    /// The nonterminal label at the root, if this is a [`ParseTree::Node`].
    pub fn label(&self) -> Option<NonTerminal> {
        match self {
            ParseTree::Node { label, .. } => Some(*label),
            ParseTree::Leaf { .. } => None,
        }
    }

    /// Depth-first left-to-right iteration over every node (not leaves) in the tree, including
    /// this one.
    pub fn nodes(&self) -> Vec<&ParseTree> {
        let mut out = Vec::new();
        self.collect_nodes(&mut out);
        out
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a ParseTree>) {
        if let ParseTree::Node { children, .. } = self {
            out.push(self);
            for child in children {
                child.collect_nodes(out);
            }
        }
    }

    /// The first descendant node (depth-first, left to right, including this tree) labeled
    /// `label`, if any.
    pub fn find(&self, label: NonTerminal) -> Option<&ParseTree> {
        self.nodes().into_iter().find(|n| n.label() == Some(label))
    }

    /// Every leaf position covered by this subtree, left to right.
    pub fn positions(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_positions(&mut out);
        out
    }

    fn collect_positions(&self, out: &mut Vec<usize>) {
        match self {
            ParseTree::Leaf { position } => out.push(*position),
            ParseTree::Node { children, .. } => {
                for child in children {
                    child.collect_positions(out);
                }
            }
        }
    }
}

/// Identifies one Earley item occurrence: a partially (or fully) matched rule, how far into its
/// right-hand side the dot has advanced, and where the match began.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct ItemKey {
    rule: usize,
    dot: usize,
    origin: usize,
}

/// How an item occurrence came to exist. Each represents one edge in the shared parse forest;
/// an item with more than one backpointer is a genuinely ambiguous point in the derivation.
#[derive(Copy, Clone, Debug)]
enum Backpointer {
    /// The dot advanced over a terminal, scanning the token at the previous column.
    Scan,
    /// The dot advanced over a nonterminal, completed by some rule spanning
    /// `[child_origin, this column)`.
    Complete { child_rule: usize, child_origin: usize },
}

#[derive(Default)]
struct Column {
    order: Vec<ItemKey>,
    index: HashMap<ItemKey, usize>,
    backpointers: Vec<Vec<Backpointer>>,
}

impl Column {
    fn add(&mut self, key: ItemKey) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.order.len();
        self.order.push(key);
        self.backpointers.push(Vec::new());
        self.index.insert(key, idx);
        idx
    }

    fn push_backpointer(&mut self, idx: usize, bp: Backpointer) {
        self.backpointers[idx].push(bp);
    }
}

/// Recognizes `tokens` against `grammar`, returning every complete parse tree rooted at the
/// grammar's start symbol. Returns an empty vector when no derivation spans the whole input —
/// never an error; a caller with no valid tree reports `kind: null`.
pub fn parse(grammar: &Grammar, tokens: &[Token]) -> Vec<ParseTree> {
    let n = tokens.len();
    if n == 0 {
        return Vec::new();
    }
    let mut columns: Vec<Column> = (0..=n).map(|_| Column::default()).collect();

    for rule_idx in grammar.rules_for(grammar.start()) {
        let key = ItemKey {
            rule: rule_idx,
            dot: 0,
            origin: 0,
        };
        columns[0].add(key);
    }

    for i in 0..=n {
        let mut cursor = 0;
        while cursor < columns[i].order.len() {
            let key = columns[i].order[cursor];
            let rule = &grammar.rules()[key.rule];

            if key.dot < rule.rhs.len() {
                match rule.rhs[key.dot] {
                    Symbol::NonTerminal(next) => {
                        // Predict: add an initial item for every rule expanding `next`, in
                        // declaration order, so enumeration order stays reproducible.
                        for predicted_rule in grammar.rules_for(next) {
                            let predicted_key = ItemKey {
                                rule: predicted_rule,
                                dot: 0,
                                origin: i,
                            };
                            columns[i].add(predicted_key);
                        }
                    }
                    Symbol::Terminal(category) => {
                        // Scan: if the next token matches, advance into column i + 1.
                        if i < n && tokens[i].category() == &category {
                            let advanced = ItemKey {
                                rule: key.rule,
                                dot: key.dot + 1,
                                origin: key.origin,
                            };
                            let idx = columns[i + 1].add(advanced);
                            columns[i + 1].push_backpointer(idx, Backpointer::Scan);
                        }
                    }
                }
            } else {
                // Complete: this item's nonterminal (rule.lhs) has been fully matched over
                // [key.origin, i). Advance every item in column `key.origin` that was waiting
                // on rule.lhs at this point.
                let lhs = rule.lhs;
                let waiting: Vec<ItemKey> = columns[key.origin].order.clone();
                for waiting_key in waiting {
                    let waiting_rule = &grammar.rules()[waiting_key.rule];
                    if waiting_rule.rhs.get(waiting_key.dot) == Some(&Symbol::NonTerminal(lhs)) {
                        let advanced = ItemKey {
                            rule: waiting_key.rule,
                            dot: waiting_key.dot + 1,
                            origin: waiting_key.origin,
                        };
                        let idx = columns[i].add(advanced);
                        columns[i].push_backpointer(
                            idx,
                            Backpointer::Complete {
                                child_rule: key.rule,
                                child_origin: key.origin,
                            },
                        );
                    }
                }
            }
            cursor += 1;
        }
    }

    let mut memo: HashMap<(usize, usize, usize, usize), Vec<Vec<ParseTree>>> = HashMap::new();
    let mut trees = Vec::new();
    for rule_idx in grammar.rules_for(grammar.start()) {
        let rule_len = grammar.rules()[rule_idx].rhs.len();
        let key = ItemKey {
            rule: rule_idx,
            dot: rule_len,
            origin: 0,
        };
        if columns[n].index.contains_key(&key) {
            for children in item_derivations(grammar, &columns, tokens, n, rule_idx, rule_len, 0, &mut memo)
            {
                trees.push(ParseTree::Node {
                    label: grammar.rules()[rule_idx].lhs,
                    children,
                });
            }
        }
    }
    trees
}

/// All ways the first `dot` symbols of `rule` could have matched `tokens[origin..col)`,
/// returned as the list of possible left-to-right child sequences, in the parser's
/// deterministic enumeration order.
fn item_derivations(
    grammar: &Grammar,
    columns: &[Column],
    tokens: &[Token],
    col: usize,
    rule: usize,
    dot: usize,
    origin: usize,
    memo: &mut HashMap<(usize, usize, usize, usize), Vec<Vec<ParseTree>>>,
) -> Vec<Vec<ParseTree>> {
    if dot == 0 {
        return vec![Vec::new()];
    }
    let memo_key = (col, rule, dot, origin);
    if let Some(cached) = memo.get(&memo_key) {
        return cached.clone();
    }

    let key = ItemKey { rule, dot, origin };
    let idx = match columns[col].index.get(&key) {
        Some(&idx) => idx,
        None => return Vec::new(),
    };

    let mut results = Vec::new();
    for bp in &columns[col].backpointers[idx] {
        match *bp {
            Backpointer::Scan => {
                let prefixes =
                    item_derivations(grammar, columns, tokens, col - 1, rule, dot - 1, origin, memo);
                let leaf = ParseTree::Leaf { position: col - 1 };
                for prefix in prefixes {
                    let mut combined = prefix;
                    combined.push(leaf.clone());
                    results.push(combined);
                }
            }
            Backpointer::Complete {
                child_rule,
                child_origin,
            } => {
                let prefixes = item_derivations(
                    grammar,
                    columns,
                    tokens,
                    child_origin,
                    rule,
                    dot - 1,
                    origin,
                    memo,
                );
                let child_rule_len = grammar.rules()[child_rule].rhs.len();
                let child_trees = completed_trees(
                    grammar,
                    columns,
                    tokens,
                    col,
                    child_rule,
                    child_rule_len,
                    child_origin,
                    memo,
                );
                for prefix in &prefixes {
                    for child_tree in &child_trees {
                        let mut combined = prefix.clone();
                        combined.push(child_tree.clone());
                        results.push(combined);
                    }
                }
            }
        }
    }

    memo.insert(memo_key, results.clone());
    results
}

fn completed_trees(
    grammar: &Grammar,
    columns: &[Column],
    tokens: &[Token],
    col: usize,
    rule: usize,
    rule_len: usize,
    origin: usize,
    memo: &mut HashMap<(usize, usize, usize, usize), Vec<Vec<ParseTree>>>,
) -> Vec<ParseTree> {
    item_derivations(grammar, columns, tokens, col, rule, rule_len, origin, memo)
        .into_iter()
        .map(|children| ParseTree::Node {
            label: grammar.rules()[rule].lhs,
            children,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse_line(line: &str) -> Vec<ParseTree> {
        let grammar = Grammar::new();
        let tokens = tokenize(line).expect("line should tokenize");
        parse(&grammar, &tokens)
    }

    #[test]
    fn parses_a_simple_address() {
        let trees = parse_line("Sarmiento N° 1100");
        assert!(!trees.is_empty());
        assert!(trees.iter().any(|t| t.find(NonTerminal::Simple).is_some()));
    }

    #[test]
    fn parses_an_intersection() {
        let trees = parse_line("Tucuman y 9 de Julio");
        assert!(trees.iter().any(|t| t.find(NonTerminal::Intersection).is_some()));
    }

    #[test]
    fn bare_single_word_has_no_derivation() {
        let trees = parse_line("qwerty");
        assert!(trees.is_empty());
    }

    #[test]
    fn leaves_reference_strictly_increasing_positions() {
        let trees = parse_line("Av. Libertador N 1331 2ndo A e/ 25 de Mayo y Bartolome Mitre");
        for tree in &trees {
            let positions = tree.positions();
            for window in positions.windows(2) {
                assert!(window[0] < window[1]);
            }
        }
    }
}
