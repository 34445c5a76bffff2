//! The `address` module is the public facade over the pipeline: normalize, tokenize, parse,
//! disambiguate, project, with an optional skeleton cache in front of the expensive middle
//! stages. [`AddressParser::parse`] is the one operation this crate exists to provide.
use crate::cache::{CachedOutcome, ParseCache};
use crate::chart;
use crate::disambiguator;
use crate::grammar::Grammar;
use crate::normalizer;
use crate::projector;
use crate::tokenizer::{self, TokenCategory};

/// The three shapes a recognized address line can take. `None` on [`AddressResult::kind`]
/// stands in for the wire contract's `null`, reported whenever no winning derivation exists.
#[allow(missing_docs)]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Simple,
    Intersection,
    Between,
}

/// A door number: an optional unit label (`"N°"`, `"Nro"`, `"Km"`, the bare letter `"N"`) and
/// the value itself (a plain number, a decimal, a range, or an explicit missing-number marker
/// like `"s/n"`).
#[derive(
    Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_getters::Getters,
)]
pub struct DoorNumber {
    pub unit: Option<String>,
    pub value: String,
}

/// The structured result of parsing one address line. Field names match the documented wire
/// contract exactly, so a caller's `serde_json` round-trip is stable.
#[derive(
    Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize, derive_getters::Getters,
)]
pub struct AddressResult {
    pub kind: Option<AddressKind>,
    pub street_names: Vec<String>,
    pub door_number: Option<DoorNumber>,
    pub floor: Option<String>,
}

impl AddressResult {
    /// The result reported for any of the four causes of `kind: null`: a fragment the
    /// tokenizer could not classify, a token sequence the grammar admits no derivation for, an
    /// irresolvable tie among equally-ranked derivations, or an empty/whitespace-only input.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// The pipeline facade. Holds the grammar (built once, read-only) and an optional skeleton
/// cache keyed on token-category signature.
pub struct AddressParser {
    grammar: Grammar,
    cache: Option<Box<dyn ParseCache>>,
}

impl AddressParser {
    /// Builds a parser with no cache — every call fully re-parses.
    pub fn new() -> Self {
        Self {
            grammar: Grammar::new(),
            cache: None,
        }
    }

    /// Builds a parser backed by `cache`. Any [`ParseCache`] implementation works, including a
    /// caller-supplied bounded or thread-safe one.
    pub fn with_cache(cache: impl ParseCache + 'static) -> Self {
        Self {
            grammar: Grammar::new(),
            cache: Some(Box::new(cache)),
        }
    }

    /// Extracts structured components from one free-form address line. `&mut self` because a
    /// configured cache may be written to on a miss. Never returns an error — a malformed,
    /// empty, or irresolvably ambiguous line reports [`AddressResult::unknown`].
    #[tracing::instrument(skip(self))]
    pub fn parse(&mut self, address_line: &str) -> AddressResult {
        let normalized = normalizer::normalize(address_line);
        if normalized.is_empty() {
            tracing::trace!("empty input after normalization");
            return AddressResult::unknown();
        }

        let tokens = match tokenizer::tokenize(&normalized) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::trace!(%err, "tokenization failed");
                return AddressResult::unknown();
            }
        };
        let categories: Vec<TokenCategory> = tokenizer::categories(&tokens);

        if let Some(cache) = &self.cache {
            if let Some(outcome) = cache.get(&categories) {
                tracing::trace!("cache hit for category signature");
                return match outcome {
                    CachedOutcome::Tree(skeleton) => projector::project(&skeleton, &tokens),
                    CachedOutcome::Unknown => AddressResult::unknown(),
                };
            }
        }

        let trees = chart::parse(&self.grammar, &tokens);
        let winner = disambiguator::disambiguate(&trees);
        let result = match winner {
            Some(tree) => projector::project(tree, &tokens),
            None => AddressResult::unknown(),
        };

        if let Some(cache) = &mut self.cache {
            let outcome = match winner {
                Some(tree) => CachedOutcome::Tree(tree.clone()),
                None => CachedOutcome::Unknown,
            };
            cache.put(categories, outcome);
        }

        result
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryParseCache;

    #[test]
    fn simple_with_door_number() {
        let mut parser = AddressParser::new();
        let result = parser.parse("Sarmiento N° 1100");
        assert_eq!(result.kind, Some(AddressKind::Simple));
        assert_eq!(result.street_names, vec!["Sarmiento".to_string()]);
        assert_eq!(result.door_number.unwrap().value, "1100");
    }

    #[test]
    fn unknown_for_unparseable_input() {
        let mut parser = AddressParser::new();
        assert_eq!(parser.parse("qwerty"), AddressResult::unknown());
    }

    #[test]
    fn empty_input_is_unknown() {
        let mut parser = AddressParser::new();
        assert_eq!(parser.parse(""), AddressResult::unknown());
        assert_eq!(parser.parse("   "), AddressResult::unknown());
    }

    #[test]
    fn repeated_parses_are_stable() {
        let mut parser = AddressParser::new();
        let first = parser.parse("Cordoba e Hipolito Yrigoyen");
        let second = parser.parse("Cordoba e Hipolito Yrigoyen");
        assert_eq!(first, second);
    }

    #[test]
    fn cache_backed_parser_matches_uncached() {
        let mut cached = AddressParser::with_cache(MemoryParseCache::new());
        let mut uncached = AddressParser::new();
        for line in ["Sarmiento N° 1100", "Sarmiento N° 1100", "Mitre 450"] {
            assert_eq!(cached.parse(line), uncached.parse(line));
        }
    }
}
