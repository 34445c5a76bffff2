//! The `grammar` module holds the fixed context-free grammar the [`crate::chart`] parser
//! recognizes against. Productions are expressed over [`crate::tokenizer::TokenCategory`]
//! terminals only — never surface text — which is exactly what lets a winning parse tree be
//! cached and replayed against any other input sharing the same category signature.
//!
//! The grammar is deliberately loose: it admits every syntactically plausible reading of an
//! address line, including genuinely ambiguous ones (a bare `LETTER` as both a floor shorthand
//! and a street-name token). `y`/`e` (`AND_WORD`) is never admitted as a name word in its own
//! right, only as a connector between two other street-name parts or between two streets — a
//! street name cannot begin, end, or consist solely of a connector.
//! Picking the right reading among several is the [`crate::disambiguator`]'s job, not the
//! grammar's — a grammar that tried to resolve ambiguity itself would need lookahead it
//! structurally cannot have at the category level.
use crate::tokenizer::TokenCategory;

/// A nonterminal in the grammar. Matches the vocabulary used to describe this grammar
/// elsewhere in the crate: `street`, `named_street`, `floor_part` and so on, just spelled as
/// Rust identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NonTerminal {
    Address,
    Simple,
    Intersection,
    Between,
    Street,
    NamedStreet,
    TypedNamedStreet,
    UnnamedStreet,
    StreetWithNumber,
    StreetWithoutNumber,
    DoorNumber,
    DoorUnit,
    DoorValue,
    Floor,
    FloorLong,
    FloorShort,
    FloorPart,
    FloorPartSeq,
    StreetNameFillerPart,
    StreetNameAnchorPart,
    StreetNamePartSeqPrefix,
    StreetNamePartSeq,
    Location,
    LocationPart,
    LocationPartSeq,
}

/// One symbol on the right-hand side of a [`GrammarRule`]: either a lexical terminal or
/// another nonterminal to expand further.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Symbol {
    /// A terminal, matched directly against a token's category.
    Terminal(TokenCategory),
    /// A nonterminal, expanded by further rules.
    NonTerminal(NonTerminal),
}

/// A single production `lhs -> rhs`. `rhs` is never empty — the grammar has no epsilon rules,
/// which simplifies the chart parser (no nullable-symbol closure is needed).
#[derive(Clone, Debug, derive_new::new)]
pub struct GrammarRule {
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
}

/// The complete, fixed rule set and start symbol. Built once via [`Grammar::new`] and never
/// mutated afterward — there is no global mutable grammar state anywhere in this crate.
#[derive(Clone, Debug)]
pub struct Grammar {
    rules: Vec<GrammarRule>,
    start: NonTerminal,
}

fn t(cat: TokenCategory) -> Symbol {
    Symbol::Terminal(cat)
}

fn nt(n: NonTerminal) -> Symbol {
    Symbol::NonTerminal(n)
}

impl Grammar {
    /// Builds the fixed Argentine address grammar.
    pub fn new() -> Self {
        use NonTerminal::*;
        use TokenCategory as Cat;

        let rules = vec![
            // address -> between | intersection | simple
            GrammarRule::new(Address, vec![nt(Between)]),
            GrammarRule::new(Address, vec![nt(Intersection)]),
            GrammarRule::new(Address, vec![nt(Simple)]),
            // simple = a single street, optional door number, optional trailing location.
            GrammarRule::new(Simple, vec![nt(StreetWithNumber), nt(Location)]),
            GrammarRule::new(Simple, vec![nt(StreetWithNumber)]),
            GrammarRule::new(Simple, vec![nt(StreetWithoutNumber), nt(Location)]),
            GrammarRule::new(Simple, vec![nt(StreetWithoutNumber)]),
            // intersection = two streets joined by a separator; at most one carries a number.
            GrammarRule::new(Intersection, vec![nt(Street), t(Cat::IsctSep), nt(Street)]),
            GrammarRule::new(Intersection, vec![nt(Street), t(Cat::AndWord), nt(Street)]),
            GrammarRule::new(
                Intersection,
                vec![nt(StreetWithNumber), t(Cat::IsctSep), nt(Street)],
            ),
            GrammarRule::new(
                Intersection,
                vec![nt(Street), t(Cat::IsctSep), nt(StreetWithNumber)],
            ),
            GrammarRule::new(
                Intersection,
                vec![nt(StreetWithNumber), t(Cat::AndWord), nt(Street)],
            ),
            GrammarRule::new(
                Intersection,
                vec![nt(Street), t(Cat::AndWord), nt(StreetWithNumber)],
            ),
            // between = one street, a between-separator, two more streets joined by `and`;
            // at most one of the three carries a door number.
            GrammarRule::new(
                Between,
                vec![
                    nt(StreetWithNumber),
                    t(Cat::BtwnSep),
                    nt(Street),
                    t(Cat::AndWord),
                    nt(Street),
                ],
            ),
            GrammarRule::new(
                Between,
                vec![
                    nt(Street),
                    t(Cat::BtwnSep),
                    nt(StreetWithNumber),
                    t(Cat::AndWord),
                    nt(Street),
                ],
            ),
            GrammarRule::new(
                Between,
                vec![
                    nt(Street),
                    t(Cat::BtwnSep),
                    nt(Street),
                    t(Cat::AndWord),
                    nt(StreetWithNumber),
                ],
            ),
            GrammarRule::new(
                Between,
                vec![nt(Street), t(Cat::BtwnSep), nt(Street), t(Cat::AndWord), nt(Street)],
            ),
            // street = named_street | unnamed_street, either bare or type-marked.
            GrammarRule::new(Street, vec![nt(NamedStreet)]),
            GrammarRule::new(Street, vec![nt(TypedNamedStreet)]),
            GrammarRule::new(Street, vec![nt(UnnamedStreet)]),
            // street_with_number = street, a door number, an optional floor.
            GrammarRule::new(StreetWithNumber, vec![nt(Street), nt(DoorNumber), nt(Floor)]),
            GrammarRule::new(StreetWithNumber, vec![nt(Street), nt(DoorNumber)]),
            // street_without_number: a bare name alone is too weak on its own (it would accept
            // any plain word as an address); type marker or route numbering is required here.
            // Bare named streets remain valid as intersection/between components, where two or
            // three of them together are already enough evidence.
            GrammarRule::new(StreetWithoutNumber, vec![nt(TypedNamedStreet)]),
            GrammarRule::new(StreetWithoutNumber, vec![nt(UnnamedStreet)]),
            // named_street: one or more name tokens, optionally flanked by a street-type word.
            GrammarRule::new(NamedStreet, vec![nt(StreetNamePartSeq)]),
            GrammarRule::new(TypedNamedStreet, vec![t(Cat::StreetTypeS), nt(StreetNamePartSeq)]),
            GrammarRule::new(TypedNamedStreet, vec![t(Cat::StreetTypeL), nt(StreetNamePartSeq)]),
            GrammarRule::new(TypedNamedStreet, vec![nt(StreetNamePartSeq), t(Cat::StreetTypeS)]),
            GrammarRule::new(TypedNamedStreet, vec![nt(StreetNamePartSeq), t(Cat::StreetTypeL)]),
            GrammarRule::new(TypedNamedStreet, vec![t(Cat::Route), nt(StreetNamePartSeq)]),
            // street_name_part_any_recursive. A street name is a run of filler parts (numbers,
            // "de", "entre", the bare "n") and anchor parts (a real word or single letter), with
            // `AND_WORD` admitted only as an internal connector between two parts — never as a
            // part in its own right. `StreetNamePartSeqPrefix` accumulates filler with no anchor
            // yet; `StreetNamePartSeq` requires at least one anchor part to have been seen, so a
            // street name can never be purely numeric (`"120"`) and can never end on a dangling
            // connector (`"Tucuman y"`), which would otherwise manufacture a spurious door
            // number out of whatever number happens to follow the connector.
            GrammarRule::new(StreetNameFillerPart, vec![t(Cat::Num)]),
            GrammarRule::new(StreetNameFillerPart, vec![t(Cat::Of)]),
            GrammarRule::new(StreetNameFillerPart, vec![t(Cat::Between)]),
            GrammarRule::new(StreetNameFillerPart, vec![t(Cat::N)]),
            GrammarRule::new(StreetNameAnchorPart, vec![t(Cat::Word)]),
            GrammarRule::new(StreetNameAnchorPart, vec![t(Cat::Letter)]),
            GrammarRule::new(StreetNamePartSeqPrefix, vec![nt(StreetNameFillerPart)]),
            GrammarRule::new(
                StreetNamePartSeqPrefix,
                vec![nt(StreetNamePartSeqPrefix), nt(StreetNameFillerPart)],
            ),
            GrammarRule::new(
                StreetNamePartSeqPrefix,
                vec![nt(StreetNamePartSeqPrefix), t(Cat::AndWord), nt(StreetNameFillerPart)],
            ),
            GrammarRule::new(StreetNamePartSeq, vec![nt(StreetNameAnchorPart)]),
            GrammarRule::new(
                StreetNamePartSeq,
                vec![nt(StreetNamePartSeqPrefix), nt(StreetNameAnchorPart)],
            ),
            GrammarRule::new(
                StreetNamePartSeq,
                vec![nt(StreetNamePartSeqPrefix), t(Cat::AndWord), nt(StreetNameAnchorPart)],
            ),
            GrammarRule::new(
                StreetNamePartSeq,
                vec![nt(StreetNamePartSeq), nt(StreetNameFillerPart)],
            ),
            GrammarRule::new(
                StreetNamePartSeq,
                vec![nt(StreetNamePartSeq), nt(StreetNameAnchorPart)],
            ),
            GrammarRule::new(
                StreetNamePartSeq,
                vec![nt(StreetNamePartSeq), t(Cat::AndWord), nt(StreetNameFillerPart)],
            ),
            GrammarRule::new(
                StreetNamePartSeq,
                vec![nt(StreetNamePartSeq), t(Cat::AndWord), nt(StreetNameAnchorPart)],
            ),
            // unnamed_street: ROUTE NUM, ROUTE <name> NUM, <name> ROUTE NUM, a street-type word
            // directly numbered, or an explicit missing-name marker.
            GrammarRule::new(UnnamedStreet, vec![t(Cat::Route), t(Cat::Num)]),
            GrammarRule::new(
                UnnamedStreet,
                vec![t(Cat::Route), nt(StreetNamePartSeq), t(Cat::Num)],
            ),
            GrammarRule::new(
                UnnamedStreet,
                vec![nt(StreetNamePartSeq), t(Cat::Route), t(Cat::Num)],
            ),
            GrammarRule::new(UnnamedStreet, vec![t(Cat::StreetTypeS), t(Cat::Num)]),
            GrammarRule::new(UnnamedStreet, vec![t(Cat::StreetTypeL), t(Cat::Num)]),
            GrammarRule::new(UnnamedStreet, vec![t(Cat::MissingName)]),
            // door_number = [door_unit] door_value
            GrammarRule::new(DoorNumber, vec![nt(DoorUnit), nt(DoorValue)]),
            GrammarRule::new(DoorNumber, vec![nt(DoorValue)]),
            GrammarRule::new(DoorUnit, vec![t(Cat::N)]),
            GrammarRule::new(DoorUnit, vec![t(Cat::NumLabelS)]),
            GrammarRule::new(DoorUnit, vec![t(Cat::NumLabelL)]),
            GrammarRule::new(DoorUnit, vec![t(Cat::Km)]),
            GrammarRule::new(DoorValue, vec![t(Cat::Num)]),
            GrammarRule::new(DoorValue, vec![t(Cat::Decimal)]),
            GrammarRule::new(DoorValue, vec![t(Cat::NumRange)]),
            GrammarRule::new(DoorValue, vec![t(Cat::Num), t(Cat::NumRange)]),
            GrammarRule::new(DoorValue, vec![t(Cat::MissingNum)]),
            GrammarRule::new(DoorValue, vec![t(Cat::SN)]),
            // floor = floor_long | floor_short
            GrammarRule::new(Floor, vec![nt(FloorLong)]),
            GrammarRule::new(Floor, vec![nt(FloorShort)]),
            GrammarRule::new(FloorShort, vec![t(Cat::Groundl)]),
            GrammarRule::new(FloorShort, vec![t(Cat::NumsLetter)]),
            GrammarRule::new(FloorLong, vec![nt(FloorPartSeq)]),
            // floor_part_recursive
            GrammarRule::new(FloorPartSeq, vec![nt(FloorPartSeq), nt(FloorPart)]),
            GrammarRule::new(FloorPartSeq, vec![nt(FloorPart)]),
            GrammarRule::new(FloorPart, vec![t(Cat::Floor)]),
            GrammarRule::new(FloorPart, vec![t(Cat::Num)]),
            GrammarRule::new(FloorPart, vec![t(Cat::Ordinal)]),
            GrammarRule::new(FloorPart, vec![t(Cat::Groundl)]),
            GrammarRule::new(FloorPart, vec![t(Cat::DoorType)]),
            GrammarRule::new(FloorPart, vec![t(Cat::Letter)]),
            // location: a free trailing phrase, walked by the projector but discarded.
            // location_part_recursive
            GrammarRule::new(LocationPartSeq, vec![nt(LocationPartSeq), nt(LocationPart)]),
            GrammarRule::new(LocationPartSeq, vec![nt(LocationPart)]),
            GrammarRule::new(LocationPart, vec![t(Cat::Word)]),
            GrammarRule::new(LocationPart, vec![t(Cat::Of)]),
            GrammarRule::new(LocationPart, vec![t(Cat::Between)]),
            GrammarRule::new(Location, vec![nt(LocationPartSeq)]),
        ];

        Self {
            rules,
            start: Address,
        }
    }

    /// The start symbol (`address`).
    pub fn start(&self) -> NonTerminal {
        self.start
    }

    /// All rules, in declaration order — the order in which [`crate::chart`] tries them
    /// during prediction, which is what makes parse-tree enumeration order reproducible.
    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    /// Indices (into [`Grammar::rules`]) of every rule whose left-hand side is `lhs`, in
    /// declaration order.
    pub fn rules_for(&self, lhs: NonTerminal) -> impl Iterator<Item = usize> + '_ {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.lhs == lhs)
            .map(|(idx, _)| idx)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}
