//! Morphology-aware compression: classifying dictionary words as root or
//! derived forms for the `/s /v /w /x` save encoding (§4.3).
//!
//! Classification distinguishes "not found" from "not even askable"
//! (empty or overlong candidate) so that a malformed derived form never
//! masquerades as a genuine absence. Recursion is bounded at depth 3:
//! coverage checks only ever recurse on a strictly shorter candidate.

use crate::common::{YIsVowel, MAXLEN};
use crate::dictionary::store::{Dictionary, FindControl};

/// A word's role with respect to the morphological compression scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No derived forms; saved as-is.
    Normal,
    /// Root of a `word/ws` pair, saved as `word/s`.
    Plural,
    /// Root of a `word/words/worded/wording` family, saved as `word/v`.
    Verb,
    /// Root of a `worde/wordes/worded/wording` family (stem saved as
    /// `stem/w`).
    VerbE,
    /// Root of a doubled-consonant `word/words/wordded/wordding` family,
    /// saved as `word/x`.
    VerbB,
    /// Produced by a strictly shorter root; must not be emitted on save.
    Covered,
}

/// Whether a candidate string is present in the dictionary, absent, or
/// cannot even be asked about (empty, or too long to be a word).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Found,
    NotFound,
    Error,
}

fn presence(dict: &Dictionary, candidate: &str, y_is_vowel: YIsVowel) -> Presence {
    if candidate.is_empty() || candidate.len() >= MAXLEN {
        return Presence::Error;
    }
    match dict.find(candidate, y_is_vowel, |_| FindControl::Stop) {
        Ok(n) if n > 0 => Presence::Found,
        Ok(_) => Presence::NotFound,
        Err(_) => Presence::Error,
    }
}

/// Classifies `word` per §4.3. `word` need not itself be a dictionary
/// member (the recursive coverage check classifies ever-shorter roots).
pub fn classify(dict: &Dictionary, word: &str, y_is_vowel: YIsVowel) -> Classification {
    let k = word.len();
    let bytes = word.as_bytes();

    let ends_with_s = k >= 4 && bytes[k - 1] == b's';
    let ends_with_es = k >= 4 && &word[k - 2..] == "es";
    let ends_with_ed = k >= 5 && &word[k - 2..] == "ed";
    let ends_with_ing = k >= 6 && &word[k - 3..] == "ing";
    let ends_with_e = k >= 3 && bytes[k - 1] == b'e';

    if ends_with_s || ends_with_es {
        let root = &word[..k - 1];
        if presence(dict, root, y_is_vowel) == Presence::Found {
            let rc = classify(dict, root, y_is_vowel);
            if matches!(
                rc,
                Classification::Verb
                    | Classification::VerbE
                    | Classification::VerbB
                    | Classification::Plural
            ) {
                return Classification::Covered;
            }
        }
    } else if ends_with_ed {
        let root = &word[..k - 2];
        if presence(dict, root, y_is_vowel) == Presence::Found
            && classify(dict, root, y_is_vowel) == Classification::Verb
        {
            return Classification::Covered;
        }
        let root_e = format!("{root}e");
        if presence(dict, &root_e, y_is_vowel) == Presence::Found
            && classify(dict, &root_e, y_is_vowel) == Classification::VerbE
        {
            return Classification::Covered;
        }
        if k >= 4 && bytes[k - 4] == bytes[k - 3] {
            let root_b = &word[..k - 3];
            if presence(dict, root_b, y_is_vowel) == Presence::Found
                && classify(dict, root_b, y_is_vowel) == Classification::VerbB
            {
                return Classification::Covered;
            }
        }
    } else if ends_with_ing {
        let root = &word[..k - 3];
        if presence(dict, root, y_is_vowel) == Presence::Found
            && classify(dict, root, y_is_vowel) == Classification::Verb
        {
            return Classification::Covered;
        }
        let root_e = format!("{root}e");
        if presence(dict, &root_e, y_is_vowel) == Presence::Found
            && classify(dict, &root_e, y_is_vowel) == Classification::VerbE
        {
            return Classification::Covered;
        }
        if k >= 5 && bytes[k - 5] == bytes[k - 4] {
            let root_b = &word[..k - 4];
            if presence(dict, root_b, y_is_vowel) == Presence::Found
                && classify(dict, root_b, y_is_vowel) == Classification::VerbB
            {
                return Classification::Covered;
            }
        }
    }

    // Not covered by any shorter root. Is this word itself a root?
    if ends_with_e {
        let stem = &word[..k - 1];
        let es = format!("{stem}es");
        if presence(dict, &es, y_is_vowel) != Presence::Found {
            return Classification::Normal;
        }
        let ing = format!("{stem}ing");
        if presence(dict, &ing, y_is_vowel) == Presence::NotFound {
            return Classification::Plural;
        }
        let ed = format!("{stem}ed");
        if presence(dict, &ed, y_is_vowel) == Presence::NotFound {
            return Classification::Plural;
        }
        Classification::VerbE
    } else {
        let s = format!("{word}s");
        if presence(dict, &s, y_is_vowel) != Presence::Found {
            return Classification::Normal;
        }
        let ing = format!("{word}ing");
        let has_taping = presence(dict, &ing, y_is_vowel);
        if has_taping == Presence::NotFound {
            return look_for_tapping(dict, word, y_is_vowel);
        }
        let ed = format!("{word}ed");
        let has_taped = presence(dict, &ed, y_is_vowel);
        if has_taped == Presence::NotFound {
            return look_for_tapping(dict, word, y_is_vowel);
        }
        if has_taped == Presence::Found || has_taping == Presence::Found {
            Classification::Verb
        } else {
            Classification::Plural
        }
    }
}

fn look_for_tapping(dict: &Dictionary, word: &str, y_is_vowel: YIsVowel) -> Classification {
    let last = *word.as_bytes().last().unwrap() as char;
    let tapping = format!("{word}{last}ing");
    if presence(dict, &tapping, y_is_vowel) == Presence::NotFound {
        return Classification::Plural;
    }
    let tapped = format!("{word}{last}ed");
    if presence(dict, &tapped, y_is_vowel) != Presence::Found {
        return Classification::Plural;
    }
    Classification::VerbB
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict_with(words: &[&str]) -> Dictionary {
        let mut d = Dictionary::new();
        for w in words {
            d.add(w, None).unwrap();
        }
        d.sort();
        d
    }

    #[test]
    fn doubled_consonant_verb() {
        let d = dict_with(&["tap", "taps", "tapped", "tapping"]);
        assert_eq!(classify(&d, "tap", YIsVowel::Always), Classification::VerbB);
        assert_eq!(classify(&d, "taps", YIsVowel::Always), Classification::Covered);
        assert_eq!(classify(&d, "tapped", YIsVowel::Always), Classification::Covered);
        assert_eq!(classify(&d, "tapping", YIsVowel::Always), Classification::Covered);
    }

    #[test]
    fn plain_verb_family() {
        let d = dict_with(&["walk", "walks", "walked", "walking"]);
        assert_eq!(classify(&d, "walk", YIsVowel::Always), Classification::Verb);
        assert_eq!(classify(&d, "walks", YIsVowel::Always), Classification::Covered);
    }

    #[test]
    fn verb_e_family() {
        let d = dict_with(&["bake", "bakes", "baked", "baking"]);
        assert_eq!(classify(&d, "bake", YIsVowel::Always), Classification::VerbE);
        assert_eq!(classify(&d, "baked", YIsVowel::Always), Classification::Covered);
    }

    #[test]
    fn plural_only() {
        let d = dict_with(&["cat", "cats"]);
        assert_eq!(classify(&d, "cat", YIsVowel::Always), Classification::Plural);
        assert_eq!(classify(&d, "cats", YIsVowel::Always), Classification::Covered);
    }

    #[test]
    fn normal_with_no_derived_forms() {
        let d = dict_with(&["whoever"]);
        assert_eq!(classify(&d, "whoever", YIsVowel::Always), Classification::Normal);
    }

    #[test]
    fn princes_does_not_cover_princess() {
        // "princes" is itself Covered (derived from "prince"), not a root
        // Plural/Verb form, so its coverage check must not mark "princess"
        // as Covered even though "princess"[..-1] == "princes" exists.
        let d = dict_with(&["prince", "princes", "princess"]);
        assert_eq!(classify(&d, "princes", YIsVowel::Always), Classification::Covered);
        assert_eq!(classify(&d, "princess", YIsVowel::Always), Classification::Normal);
    }
}
