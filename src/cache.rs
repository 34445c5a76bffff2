//! The `cache` module lets an [`crate::address::AddressParser`] skip re-parsing a line whose
//! token-category signature it has already seen. The grammar never looks at surface text, so
//! two address lines that tokenize to the same category sequence — `"Mitre 450"` and
//! `"Sarmiento 900"` both being `WORD NUM` — always parse to structurally identical trees. What
//! is cached is the tree *skeleton* (labels and leaf positions), never the projected result, so
//! a cache hit still reprojects against the surface tokens of the actual input.
use std::collections::HashMap;

use crate::chart::ParseTree;
use crate::tokenizer::TokenCategory;

/// A cached tree skeleton is exactly a [`ParseTree`] — it already carries only nonterminal
/// labels and leaf positions, never surface text, so it needs no separate representation.
pub type TreeSkeleton = ParseTree;

/// What a cache entry records for a given category signature: either a winning skeleton, or
/// the fact that this signature has no valid derivation at all. Caching the negative result
/// matters as much as the positive one — both save a full re-parse.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CachedOutcome {
    /// The winning tree skeleton for this category signature.
    Tree(TreeSkeleton),
    /// This category signature has no valid derivation; `kind: null` without re-parsing.
    Unknown,
}

/// A key-value container mapping a token-category signature to its cached outcome. Any type
/// implementing this trait works with [`crate::address::AddressParser::with_cache`] — an LRU
/// cache, a sharded cache, or (as shipped here) a plain in-memory map.
pub trait ParseCache {
    /// Looks up a previously cached outcome for `categories`. `None` means this signature has
    /// never been seen, which is distinct from `Some(CachedOutcome::Unknown)` (seen, and known
    /// to have no derivation).
    fn get(&self, categories: &[TokenCategory]) -> Option<CachedOutcome>;

    /// Records the outcome for `categories`, overwriting any previous entry.
    fn put(&mut self, categories: Vec<TokenCategory>, outcome: CachedOutcome);
}

/// The default, in-memory [`ParseCache`] implementation: an unbounded [`HashMap`]. Good enough
/// for a single REPL session or a batch run; a caller processing an unbounded, unfamiliar
/// stream of addresses may prefer to supply a bounded cache instead.
#[derive(Clone, Debug, Default)]
pub struct MemoryParseCache {
    entries: HashMap<Vec<TokenCategory>, CachedOutcome>,
}

impl MemoryParseCache {
    /// Builds an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct category signatures currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A snapshot of the underlying entries, for persistence via [`crate::utils::save_cache`].
    pub fn entries(&self) -> &HashMap<Vec<TokenCategory>, CachedOutcome> {
        &self.entries
    }

    /// Replaces the underlying entries wholesale, as when restoring a persisted cache via
    /// [`crate::utils::load_cache`].
    pub fn restore(entries: HashMap<Vec<TokenCategory>, CachedOutcome>) -> Self {
        Self { entries }
    }
}

impl ParseCache for MemoryParseCache {
    fn get(&self, categories: &[TokenCategory]) -> Option<CachedOutcome> {
        self.entries.get(categories).cloned()
    }

    fn put(&mut self, categories: Vec<TokenCategory>, outcome: CachedOutcome) {
        self.entries.insert(categories, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart;
    use crate::disambiguator::disambiguate;
    use crate::grammar::Grammar;
    use crate::tokenizer::{categories, tokenize};

    #[test]
    fn miss_then_hit_round_trips_skeleton() {
        let mut cache = MemoryParseCache::new();
        let grammar = Grammar::new();
        let tokens = tokenize("Mitre 450").unwrap();
        let cats = categories(&tokens);
        assert!(cache.get(&cats).is_none());

        let trees = chart::parse(&grammar, &tokens);
        let winner = disambiguate(&trees).cloned().unwrap();
        cache.put(cats.clone(), CachedOutcome::Tree(winner.clone()));

        assert_eq!(cache.get(&cats), Some(CachedOutcome::Tree(winner)));
    }

    #[test]
    fn unknown_outcomes_are_cached_too() {
        let mut cache = MemoryParseCache::new();
        let tokens = tokenize("qwerty").unwrap();
        let cats = categories(&tokens);
        cache.put(cats.clone(), CachedOutcome::Unknown);
        assert_eq!(cache.get(&cats), Some(CachedOutcome::Unknown));
    }

    #[test]
    fn a_skeleton_reprojects_onto_a_different_but_equivalent_input() {
        let grammar = Grammar::new();
        let tokens_a = tokenize("Mitre 450").unwrap();
        let tokens_b = tokenize("Rosario 900").unwrap();
        assert_eq!(categories(&tokens_a), categories(&tokens_b));

        let trees = chart::parse(&grammar, &tokens_a);
        let skeleton = disambiguate(&trees).unwrap();
        let projected = crate::projector::project(skeleton, &tokens_b);
        assert_eq!(projected.street_names, vec!["Rosario".to_string()]);
    }
}
