//! The `normalizer` module rewrites a raw address line into the whitespace-delimited surface
//! the [`crate::tokenizer`] expects: one space between fragments, stray punctuation gone, and
//! digit/letter runs split apart wherever they were typed glued together. It never fails — at
//! worst it hands back the trimmed input unchanged — and it never invents characters: every
//! byte of the output already existed in the input, just possibly with a space inserted next
//! to it.
use once_cell::sync::Lazy;
use regex::Regex;

/// Known short street-type/number-indicator tokens that may appear glued to a following digit
/// run (`Av1200` -> `Av 1200`, `N1331` -> `N 1331`).
static ABBREV_DIGIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(av|bv|psje|pje|cno|ruta|rn|rp|nro|km|n)(\.?)(\d+)$").unwrap()
});

/// An ordinal marker (`2ndo`, `1ro`, `3er`) with a single letter glued directly after it
/// (`2ndoB` -> `2ndo B`) — almost always a floor-plus-unit reading.
static ORDINAL_LETTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2}(?:ro|do|er|to|mo|ndo|era|ero|°|º))\.?([\p{L}])$").unwrap()
});

/// A bare digit run glued to a letter run, outside the two special cases above. The
/// `NUMS_LETTER` exception (one or two digits followed by exactly one letter, e.g. `12C`) is
/// left untouched here: splitting it would destroy the glued floor/door shorthand the
/// tokenizer's `NUMS_LETTER` category exists to recognize.
static DIGIT_LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(\p{L}+)$").unwrap());

/// The separator `e/`, glued without a space to whatever follows it (`e/25` -> `e/ 25`). Its
/// full-word form `entre` is never glued this way and needs no such rule.
fn split_leading_btwn_sep(fragment: &str) -> Option<(String, String)> {
    if fragment.len() > 2 && fragment.is_char_boundary(2) {
        let (head, rest) = fragment.split_at(2);
        if head.eq_ignore_ascii_case("e/") && !rest.is_empty() {
            return Some((head.to_string(), rest.to_string()));
        }
    }
    None
}

/// Splits one whitespace-delimited fragment of the raw input into one or more output
/// fragments, stripping stray punctuation and un-gluing digit/letter runs along the way.
/// Returns an empty vector when the fragment was pure punctuation and disappears entirely.
fn split_fragment(fragment: &str) -> Vec<String> {
    let cleaned: String = fragment.chars().filter(|c| *c != ',' && *c != ';').collect();
    // A trailing dot is only stripped when it's stray end-of-line punctuation. An abbreviation
    // like `Av.` or `Nro.` keeps its own period — stripping it would make the projector emit
    // `Av` where the input (and the documented wire contract) says `Av.`.
    let cleaned = if crate::tokenizer::is_dotted_abbreviation(&cleaned) {
        cleaned
    } else {
        cleaned.strip_suffix('.').unwrap_or(&cleaned).to_string()
    };
    if cleaned.is_empty() {
        return Vec::new();
    }

    if let Some((sep, rest)) = split_leading_btwn_sep(&cleaned) {
        let mut out = vec![sep];
        out.extend(split_fragment(&rest));
        return out;
    }

    if let Some(caps) = ABBREV_DIGIT_RE.captures(&cleaned) {
        return vec![caps[1].to_string(), caps[3].to_string()];
    }

    if let Some(caps) = ORDINAL_LETTER_RE.captures(&cleaned) {
        return vec![caps[1].to_string(), caps[2].to_string()];
    }

    // An ordinal marker standing alone (`2ndo`, `3er`, `4°`) is one token, not a digit run glued
    // to a trailing word — leave it untouched rather than letting the generic rule below tear
    // its own suffix off.
    if crate::tokenizer::is_ordinal(&cleaned) {
        return vec![cleaned];
    }

    if let Some(caps) = DIGIT_LETTER_RE.captures(&cleaned) {
        let digits = &caps[1];
        let letters = &caps[2];
        if digits.chars().count() <= 2 && letters.chars().count() == 1 {
            return vec![cleaned];
        }
        return vec![digits.to_string(), letters.to_string()];
    }

    vec![cleaned]
}

/// Rewrites a raw address line into normalized, whitespace-delimited form. Never fails.
pub fn normalize(raw: &str) -> String {
    let fragments: Vec<String> = raw
        .split_whitespace()
        .flat_map(split_fragment)
        .filter(|f| !f.is_empty())
        .collect();
    let joined = fragments.join(" ");
    tracing::trace!(raw, normalized = %joined, "normalized address line");
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("  Sarmiento   1100  "), "Sarmiento 1100");
    }

    #[test]
    fn strips_commas_and_semicolons() {
        assert_eq!(normalize("Mitre, 450;"), "Mitre 450");
    }

    #[test]
    fn preserves_dot_on_a_known_abbreviation() {
        assert_eq!(normalize("Av. Libertador"), "Av. Libertador");
        assert_eq!(normalize("Nro. 450"), "Nro. 450");
    }

    #[test]
    fn strips_stray_trailing_dot_on_an_ordinary_word() {
        assert_eq!(normalize("Mitre."), "Mitre");
    }

    #[test]
    fn splits_letter_indicator_glued_to_digits() {
        assert_eq!(normalize("N1331"), "N 1331");
        assert_eq!(normalize("Av1200"), "Av 1200");
    }

    #[test]
    fn splits_ordinal_glued_to_trailing_letter() {
        assert_eq!(normalize("2ndoB"), "2ndo B");
    }

    #[test]
    fn leaves_a_standalone_ordinal_marker_intact() {
        assert_eq!(normalize("2ndo"), "2ndo");
        assert_eq!(normalize("2ndo A"), "2ndo A");
        assert_eq!(normalize("3er"), "3er");
    }

    #[test]
    fn splits_btwn_sep_glued_to_following_name() {
        assert_eq!(normalize("e/25 de Mayo"), "e/ 25 de Mayo");
    }

    #[test]
    fn keeps_nums_letter_exception_glued() {
        assert_eq!(normalize("12C"), "12C");
        assert_eq!(normalize("2B"), "2B");
    }

    #[test]
    fn splits_generic_long_digit_letter_glue() {
        assert_eq!(normalize("1234abcd"), "1234 abcd");
    }

    #[test]
    fn leaves_s_n_marker_glued() {
        assert_eq!(normalize("s/n"), "s/n");
    }

    #[test]
    fn never_fails_on_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
