//! The `tokenizer` module splits a normalized address line on whitespace and assigns each
//! resulting fragment a single [`TokenCategory`], trying an ordered list of matchers until one
//! succeeds. A fragment matching none of them fails the whole tokenization — the caller (the
//! [`crate::address::AddressParser`] facade) turns that into `kind: null`, never an exception.
use nom::character::complete::digit1;
use nom::combinator::all_consuming;
use once_cell::sync::Lazy;
use regex::Regex;

/// The `TokenCategory` enum represents the fixed set of lexical classes the tokenizer assigns to
/// address fragments. These are the terminals of the [`crate::grammar::Grammar`] — the grammar
/// never looks at surface strings, only at categories, which is what lets the [`crate::cache`]
/// reuse a winning parse tree skeleton across inputs that share a category signature.
#[allow(missing_docs)]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum TokenCategory {
    Word,
    Num,
    Decimal,
    NumRange,
    Letter,
    NumsLetter,
    Ordinal,
    Floor,
    Groundl,
    DoorType,
    Km,
    N,
    NumLabelS,
    NumLabelL,
    StreetTypeS,
    StreetTypeL,
    Route,
    MissingName,
    MissingNum,
    SN,
    AndWord,
    AndNum,
    IsctSep,
    BtwnSep,
    Between,
    Of,
}

/// A single lexical unit: the literal surface text it was read from, the category assigned to
/// it, and its zero-based position in the token sequence. [`crate::chart`] leaves carry
/// positions rather than surface text so the [`crate::projector`] can slice surface text back
/// out of whichever input produced a given tree.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_getters::Getters)]
pub struct Token {
    surface: String,
    category: TokenCategory,
    position: usize,
}

impl Token {
    fn new(surface: &str, category: TokenCategory, position: usize) -> Self {
        Self {
            surface: surface.to_string(),
            category,
            position,
        }
    }
}

/// Raised when a whitespace-delimited fragment cannot be classified into any
/// [`TokenCategory`]. Caught by the facade and turned into `kind: null`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("fragment `{0}` did not match any lexical category")]
pub struct TokenizeError(pub String);

static NUM_LABEL_S_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^n[°º*]\.?$").unwrap());
static NUM_LABEL_L_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(nro\.?|numero|número)$").unwrap());
static ROUTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(ruta|rn|rp)$").unwrap());
static STREET_TYPE_S_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(av|bv|psje|pje|cno)\.?$").unwrap());
static STREET_TYPE_L_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(avenida|bulevar|boulevard|calle|pasaje|diagonal|costanera|camino)$")
        .unwrap()
});
static DOOR_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(dpto|depto|unidad|uf)\.?$").unwrap());
static FLOOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^piso\.?$").unwrap());
static GROUNDL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^p\.?b\.?$").unwrap());
static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{1,2}(ro|do|er|to|mo|ndo|era|ero|°|º)\.?$").unwrap());
static NUMS_LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}[A-Za-z]$").unwrap());
static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+$").unwrap());
static NUM_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[/-]\d+$").unwrap());
static KM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^km\.?$").unwrap());
static MISSING_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^s/nombre$").unwrap());
static S_N_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^s/n$").unwrap());
static MISSING_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^s\.?n\.?$").unwrap());
static ISCT_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(esq\.?|esquina|/)$").unwrap());
// `\p{L}` rather than nom's ASCII-only `alpha1`: Argentine street names are full of accented
// Latin letters (Córdoba, Bartolomé, sÃnta), which the spec requires tolerated verbatim.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}'’]+$").unwrap());

fn is_pure_digits(fragment: &str) -> bool {
    all_consuming(digit1::<&str, nom::error::Error<&str>>)(fragment).is_ok()
}

fn is_pure_alpha(fragment: &str) -> bool {
    WORD_RE.is_match(fragment)
}

/// Whether `fragment` (trailing dot included) already matches one of the abbreviation
/// categories that legitimately carry a period (`Av.`, `Nro.`, `Dpto.`, `Piso.`, `P.B.`). Used
/// by [`crate::normalizer`] to tell the abbreviation's own period apart from stray end-of-line
/// punctuation, which should be stripped instead.
pub(crate) fn is_dotted_abbreviation(fragment: &str) -> bool {
    fragment.ends_with('.')
        && (STREET_TYPE_S_RE.is_match(fragment)
            || NUM_LABEL_S_RE.is_match(fragment)
            || NUM_LABEL_L_RE.is_match(fragment)
            || DOOR_TYPE_RE.is_match(fragment)
            || FLOOR_RE.is_match(fragment)
            || GROUNDL_RE.is_match(fragment)
            || KM_RE.is_match(fragment))
}

/// Whether `fragment` is, as a whole, an ordinal marker (`2ndo`, `1ro`, `3er`, `4°`) rather than
/// a digit run glued to an unrelated trailing word. Used by [`crate::normalizer`] so its generic
/// digit-letter un-gluing rule doesn't tear an ordinal's own suffix apart (`2ndo` must stay
/// `2ndo`, not become `2` + `ndo`).
pub(crate) fn is_ordinal(fragment: &str) -> bool {
    ORDINAL_RE.is_match(fragment)
}

/// Classifies a single whitespace-delimited fragment into a [`TokenCategory`], given the
/// category assigned to the immediately preceding token (if any). The lookbehind is needed
/// solely to resolve the literal word `entre`: isolated, it is the [`TokenCategory::BtwnSep`]
/// that opens a `between` clause; immediately following an ongoing street name it is retained
/// as a name-internal word, [`TokenCategory::Between`] (see `DESIGN.md`, open question ii).
/// The abbreviated separator form `e/` has no such duality — no street is named "E/" — so it
/// is always [`TokenCategory::BtwnSep`] regardless of what precedes it.
fn classify(fragment: &str, previous: Option<TokenCategory>) -> Option<TokenCategory> {
    use TokenCategory::*;
    let lower = fragment.to_lowercase();

    if MISSING_NAME_RE.is_match(fragment) {
        return Some(MissingName);
    }
    if S_N_RE.is_match(fragment) {
        return Some(SN);
    }
    if MISSING_NUM_RE.is_match(fragment) {
        return Some(MissingNum);
    }
    if fragment == "&" {
        return Some(AndNum);
    }
    if KM_RE.is_match(fragment) {
        return Some(Km);
    }
    if NUM_LABEL_S_RE.is_match(fragment) {
        return Some(NumLabelS);
    }
    if NUM_LABEL_L_RE.is_match(fragment) {
        return Some(NumLabelL);
    }
    if ROUTE_RE.is_match(fragment) {
        return Some(Route);
    }
    if STREET_TYPE_S_RE.is_match(fragment) {
        return Some(StreetTypeS);
    }
    if STREET_TYPE_L_RE.is_match(fragment) {
        return Some(StreetTypeL);
    }
    if DOOR_TYPE_RE.is_match(fragment) {
        return Some(DoorType);
    }
    if FLOOR_RE.is_match(fragment) {
        return Some(Floor);
    }
    if GROUNDL_RE.is_match(fragment) {
        return Some(Groundl);
    }
    if ORDINAL_RE.is_match(fragment) {
        return Some(Ordinal);
    }
    if NUMS_LETTER_RE.is_match(fragment) {
        return Some(NumsLetter);
    }
    if DECIMAL_RE.is_match(fragment) {
        return Some(Decimal);
    }
    if NUM_RANGE_RE.is_match(fragment) {
        return Some(NumRange);
    }
    if is_pure_digits(fragment) {
        return Some(Num);
    }
    if ISCT_SEP_RE.is_match(fragment) {
        return Some(IsctSep);
    }
    if lower == "entre" {
        return match previous {
            Some(Word) | Some(StreetTypeS) | Some(StreetTypeL) | Some(Letter) => Some(Between),
            _ => Some(BtwnSep),
        };
    }
    if lower == "e/" {
        return Some(BtwnSep);
    }
    if lower == "y" || lower == "e" {
        return Some(AndWord);
    }
    if lower == "de" {
        return Some(Of);
    }
    if lower == "n" {
        return Some(N);
    }
    if is_pure_alpha(fragment) {
        if fragment.chars().count() == 1 {
            return Some(Letter);
        }
        return Some(Word);
    }
    None
}

/// Splits `normalized` on whitespace and classifies every fragment, returning the ordered token
/// sequence. Returns [`TokenizeError`] naming the first fragment that matched no category; per
/// spec this is one of the four causes of `kind: null`.
pub fn tokenize(normalized: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut previous: Option<TokenCategory> = None;
    for (position, fragment) in normalized.split_whitespace().enumerate() {
        let category = classify(fragment, previous)
            .ok_or_else(|| TokenizeError(fragment.to_string()))?;
        tracing::trace!(fragment, position, %category, "tokenized fragment");
        tokens.push(Token::new(fragment, category, position));
        previous = Some(category);
    }
    Ok(tokens)
}

/// Extracts just the category sequence from a token sequence — the cache key and the grammar's
/// terminal input.
pub fn categories(tokens: &[Token]) -> Vec<TokenCategory> {
    tokens.iter().map(|t| *t.category()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plain_street_number() {
        let tokens = tokenize("Sarmiento N° 1100").unwrap();
        let cats: Vec<_> = categories(&tokens);
        assert_eq!(
            cats,
            vec![TokenCategory::Word, TokenCategory::NumLabelS, TokenCategory::Num]
        );
    }

    #[test]
    fn classifies_nums_letter_floor() {
        let tokens = tokenize("2ndo A").unwrap();
        let cats = categories(&tokens);
        assert_eq!(cats, vec![TokenCategory::Ordinal, TokenCategory::Letter]);
    }

    #[test]
    fn classifies_nums_letter_glued() {
        let tokens = tokenize("12C").unwrap();
        assert_eq!(categories(&tokens), vec![TokenCategory::NumsLetter]);
    }

    #[test]
    fn classifies_missing_number_marker() {
        let tokens = tokenize("s/n").unwrap();
        assert_eq!(categories(&tokens), vec![TokenCategory::SN]);
    }

    #[test]
    fn entre_isolated_is_separator() {
        let tokens = tokenize("entre Mitre").unwrap();
        assert_eq!(
            categories(&tokens),
            vec![TokenCategory::BtwnSep, TokenCategory::Word]
        );
    }

    #[test]
    fn entre_embedded_in_name_is_retained() {
        let tokens = tokenize("Entre Rios").unwrap();
        // First token is isolated (no predecessor), so it still reads as a separator;
        // the retained-word reading only triggers once a name word precedes it.
        let tokens2 = tokenize("Avenida Entre Rios").unwrap();
        assert_eq!(tokens[0].category(), &TokenCategory::BtwnSep);
        assert_eq!(tokens2[1].category(), &TokenCategory::Between);
    }

    #[test]
    fn unclassifiable_fragment_errors() {
        assert!(tokenize("qwerty#$%").is_err());
    }

    #[test]
    fn and_word_is_ambiguous_by_design() {
        let tokens = tokenize("Tucuman y 9 de Julio").unwrap();
        assert_eq!(tokens[1].category(), &TokenCategory::AndWord);
    }

    #[test]
    fn abbreviated_btwn_sep_is_never_retained_even_after_a_letter() {
        // Unlike "entre", "e/" has no name-internal reading, even following a Letter token
        // (e.g. the floor-door letter "A" in "2ndo A e/25 de Mayo y Bartolome Mitre"). The
        // tokenizer alone can't split the glued "e/25"; only the normalizer does that.
        let normalized = crate::normalizer::normalize("A e/25");
        let tokens = tokenize(&normalized).unwrap();
        assert_eq!(tokens[0].category(), &TokenCategory::Letter);
        assert_eq!(tokens[1].category(), &TokenCategory::BtwnSep);
    }
}
