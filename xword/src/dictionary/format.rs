//! Plain and morphologically-compressed dictionary file I/O (§4.3, §6.1).

use std::io::{BufRead, Write};

use crate::common::{YIsVowel, MAXLEN};
use crate::dictionary::morphology::{classify, Classification};
use crate::dictionary::store::Dictionary;
use crate::errors::{Result, XwordError};

/// Expands a `stem/S` record into its full paradigm, per §6.1. Products
/// longer than `MAXLEN - 1` are silently discarded. Unknown suffix letters
/// yield an empty vector (the whole record is ignored).
fn expand_suffix(stem: &str, suffix: u8) -> Vec<String> {
    let mut forms = match suffix.to_ascii_lowercase() {
        b's' => vec![stem.to_string(), format!("{stem}s")],
        b'v' => vec![
            stem.to_string(),
            format!("{stem}s"),
            format!("{stem}ed"),
            format!("{stem}ing"),
        ],
        b'w' => vec![
            format!("{stem}e"),
            format!("{stem}es"),
            format!("{stem}ed"),
            format!("{stem}ing"),
        ],
        b'x' => {
            let last = stem.bytes().last();
            match last {
                Some(c) => vec![
                    stem.to_string(),
                    format!("{stem}s"),
                    format!("{stem}{}ed", c as char),
                    format!("{stem}{}ing", c as char),
                ],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    };
    forms.retain(|w| w.len() < MAXLEN);
    forms
}

impl Dictionary {
    /// Loads a dictionary from the plain/compressed text format of §6.1.
    ///
    /// Words of invalid length are silently dropped. Leaves the dictionary
    /// sorted on return. A final line with no terminating newline is
    /// reported as [`XwordError::Corrupt`].
    pub fn load<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut dict = Self::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }
            if buf.last() != Some(&b'\n') {
                return Err(XwordError::corrupt(
                    "reader",
                    "dictionary file truncated: final line has no terminating newline",
                ));
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }
            match line.rsplit_once('/') {
                Some((stem, suffix)) if suffix.len() == 1 => {
                    for form in expand_suffix(stem, suffix.as_bytes()[0]) {
                        let _ = dict.add(&form, None);
                    }
                }
                _ => {
                    let _ = dict.add(line, None);
                }
            }
        }
        dict.sort();
        Ok(dict)
    }

    /// Saves every word, one per line, in ascending bucket order.
    pub fn save_plain<W: Write>(&self, mut writer: W) -> Result<()> {
        for word in self.iter() {
            writeln!(writer, "{word}")?;
        }
        Ok(())
    }

    /// Saves using the morphological compression scheme of §4.3.
    ///
    /// Returns the number of words whose classification was ambiguous (a
    /// word that classifies as `Verb` while also being reachable as the
    /// root of a sibling `VerbE` family) and was conservatively degraded to
    /// [`Classification::Plural`] rather than silently picking one.
    /// Requires the dictionary to already be sorted; an unsorted dictionary
    /// still classifies correctly but does so via a linear scan per lookup.
    pub fn save_compressed<W: Write>(&self, mut writer: W, y_is_vowel: YIsVowel) -> Result<usize> {
        debug_assert!(self.is_sorted(), "save_compressed requires a sorted dictionary");
        let mut conflicts = 0;
        for word in self.iter() {
            let primary = classify(self, word, y_is_vowel);
            let resolved = if Self::is_ambiguous(self, word, y_is_vowel, primary) {
                conflicts += 1;
                Classification::Plural
            } else {
                primary
            };
            match resolved {
                Classification::Normal => writeln!(writer, "{word}")?,
                Classification::Verb => writeln!(writer, "{word}/v")?,
                Classification::VerbE => writeln!(writer, "{}/w", &word[..word.len() - 1])?,
                Classification::VerbB => writeln!(writer, "{word}/x")?,
                Classification::Plural => writeln!(writer, "{word}/s")?,
                Classification::Covered => {}
            }
        }
        Ok(conflicts)
    }

    /// Detects the `car`/`care` style ambiguity: whether `word` would also
    /// be reachable as the `e`-suffixed root of a sibling classified as
    /// `VerbE`, when `word` itself classifies as `Verb`. Classification
    /// itself does not change; only the save encoding is affected.
    fn is_ambiguous(dict: &Dictionary, word: &str, y_is_vowel: YIsVowel, primary: Classification) -> bool {
        if primary != Classification::Verb {
            return false;
        }
        let sibling = format!("{word}e");
        if dict.find(&sibling, y_is_vowel, |_| crate::dictionary::store::FindControl::Stop).unwrap_or(0) == 0 {
            return false;
        }
        classify(dict, &sibling, y_is_vowel) == Classification::VerbE
    }
}
