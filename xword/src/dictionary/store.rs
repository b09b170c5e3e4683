//! Length-bucketed word store with wildcard search.

use crate::common::{is_consonant, is_vowel, is_purely_alphabetic, YIsVowel, MAXLEN, MINLEN};
use crate::dictionary::word::Word;
use crate::errors::{Result, XwordError};
use crate::pattern;

/// What a [`Dictionary::find`] / [`Dictionary::find_scrabble`] callback asks
/// the iteration to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindControl {
    /// Keep enumerating matches.
    Continue,
    /// Stop enumerating after this match.
    Stop,
}

/// A length-bucketed dictionary of [`Word`]s.
///
/// Bucket `k` (for `MINLEN <= k < MAXLEN`) holds only words of length `k`.
/// The `sorted` flag is `true` exactly when no mutation has occurred since
/// the most recent [`Dictionary::sort`].
#[derive(Debug, Clone)]
pub struct Dictionary {
    buckets: Vec<Vec<Word>>,
    sorted: bool,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Creates an empty, sorted dictionary.
    pub fn new() -> Self {
        Self {
            buckets: (0..MAXLEN).map(|_| Vec::new()).collect(),
            sorted: true,
        }
    }

    /// Returns whether every bucket is currently sorted and deduplicated.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Returns the words of length exactly `k`, or `&[]` if `k` is out of
    /// the valid bucket range.
    pub fn bucket(&self, k: usize) -> &[Word] {
        self.buckets.get(k).map_or(&[], Vec::as_slice)
    }

    /// Returns the total number of words across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns whether the dictionary contains no words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every word, ascending bucket length, insertion order within
    /// a bucket (lexicographic if [`Dictionary::is_sorted`]).
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.buckets.iter().flat_map(|b| b.iter())
    }

    /// Appends `word` to its bucket.
    ///
    /// If `k` is `None`, the bucket is derived from `word.len()`. Fails with
    /// [`XwordError::TooShortOrLong`] if the resolved bucket is outside
    /// `MINLEN..MAXLEN`. Does not deduplicate eagerly; clears `sorted`.
    pub fn add(&mut self, word: &str, k: Option<usize>) -> Result<()> {
        let k = k.unwrap_or_else(|| word.len());
        if k < MINLEN || k >= MAXLEN {
            return Err(XwordError::too_short_or_long(
                "word",
                format!("length {k} outside {MINLEN}..{MAXLEN}"),
            ));
        }
        let word = Word::new(word)?;
        self.buckets[k].push(word);
        self.sorted = false;
        Ok(())
    }

    /// Removes every bucket entry equal to `word`. Returns the count
    /// removed.
    pub fn remove_exact(&mut self, word: &str, k: Option<usize>) -> Result<usize> {
        let k = k.unwrap_or_else(|| word.len());
        if k < MINLEN || k >= MAXLEN {
            return Err(XwordError::too_short_or_long(
                "word",
                format!("length {k} outside {MINLEN}..{MAXLEN}"),
            ));
        }
        let bucket = &mut self.buckets[k];
        let before = bucket.len();
        // Swap-remove: order is not preserved.
        let mut i = 0;
        while i < bucket.len() {
            if bucket[i].as_str() == word {
                bucket.swap_remove(i);
                self.sorted = false;
            } else {
                i += 1;
            }
        }
        Ok(before - bucket.len())
    }

    /// Removes every bucket entry matching `pattern`.
    ///
    /// If `k` is `Some` and `pattern` has no `*`, only bucket `k` is
    /// scanned; otherwise every bucket of length at least `pattern`'s
    /// literal-character count is scanned. Returns the count removed.
    pub fn remove_match(
        &mut self,
        pattern_str: &str,
        k: Option<usize>,
        y_is_vowel: YIsVowel,
    ) -> Result<usize> {
        if !pattern_str.contains('*') {
            let k = k.unwrap_or_else(|| pattern_str.len());
            if k < MINLEN || k >= MAXLEN {
                return Err(XwordError::too_short_or_long(
                    "pattern",
                    format!("length {k} outside {MINLEN}..{MAXLEN}"),
                ));
            }
            return Ok(Self::remove_matching_in_bucket(
                &mut self.buckets[k],
                pattern_str,
                y_is_vowel,
                &mut self.sorted,
            ));
        }
        let literal_len = pattern_str.chars().filter(|&c| c != '*').count();
        let mut count = 0;
        for k in literal_len..MAXLEN {
            count += Self::remove_matching_in_bucket(
                &mut self.buckets[k],
                pattern_str,
                y_is_vowel,
                &mut self.sorted,
            );
        }
        Ok(count)
    }

    fn remove_matching_in_bucket(
        bucket: &mut Vec<Word>,
        pattern_str: &str,
        y_is_vowel: YIsVowel,
        sorted: &mut bool,
    ) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < bucket.len() {
            if pattern::matches(bucket[i].as_str(), pattern_str, y_is_vowel) {
                bucket.swap_remove(i);
                *sorted = false;
                count += 1;
            } else {
                i += 1;
            }
        }
        count
    }

    /// Lexicographically sorts each bucket, drops duplicates, and sets
    /// `sorted = true`.
    pub fn sort(&mut self) {
        for bucket in &mut self.buckets {
            bucket.sort();
            bucket.dedup();
        }
        self.sorted = true;
    }

    /// Enumerates words matching `pattern`, invoking `callback` for each.
    ///
    /// For a `*`-free pattern, only the bucket of length `pattern.len()` is
    /// searched. If the dictionary [`Dictionary::is_sorted`] and the
    /// pattern is purely alphabetic, a bisecting search is used (at most
    /// one hit). Otherwise the bucket (or, for a starred pattern, every
    /// bucket of sufficient length) is scanned linearly. `callback`
    /// returning [`FindControl::Stop`] ends iteration early. Returns the
    /// number of matches emitted.
    pub fn find(
        &self,
        pattern_str: &str,
        y_is_vowel: YIsVowel,
        mut callback: impl FnMut(&str) -> FindControl,
    ) -> Result<usize> {
        if !pattern_str.contains('*') {
            let len = pattern_str.len();
            if len == 0 || len >= MAXLEN {
                return Err(XwordError::too_short_or_long(
                    "pattern",
                    format!("length {len} outside 1..{MAXLEN}"),
                ));
            }
            let bucket = self.bucket(len);

            if self.sorted && is_purely_alphabetic(pattern_str) {
                return Ok(match bucket.binary_search_by(|w| w.as_str().cmp(pattern_str)) {
                    Ok(i) => {
                        callback(bucket[i].as_str());
                        1
                    }
                    Err(_) => 0,
                });
            }

            let mut count = 0;
            for w in bucket {
                if pattern::matches_simple(w.as_str(), pattern_str, y_is_vowel) {
                    count += 1;
                    if callback(w.as_str()) == FindControl::Stop {
                        break;
                    }
                }
            }
            return Ok(count);
        }

        let literal_len = pattern_str.chars().filter(|&c| c != '*').count();
        let mut count = 0;
        'outer: for k in literal_len..MAXLEN {
            for w in self.bucket(k) {
                if pattern::matches(w.as_str(), pattern_str, y_is_vowel) {
                    count += 1;
                    if callback(w.as_str()) == FindControl::Stop {
                        break 'outer;
                    }
                }
            }
        }
        Ok(count)
    }

    /// Enumerates every dictionary word whose letter-multiset fits the
    /// `rack` multiset, with per-letter usage allowed to overflow into a
    /// vowel slack (a `'0'` tile in `rack`), a consonant slack (a `'1'`
    /// tile), or a wildcard slack (a `'?'` tile). The word must contain
    /// each `mustuse` letter at least as many times as it appears in
    /// `mustuse`. Candidate lengths range over
    /// `max(mustuse.len(), 2) <= L < min(rack.len()+1, MAXLEN)`.
    ///
    /// Spillover order is letter slot first, then vowel slack, then
    /// consonant slack, then wildcard slack — applied greedily, so it is
    /// not guaranteed to find every fit when a letter could instead have
    /// been drawn from slack to free up a slot for a rarer letter.
    pub fn find_scrabble(
        &self,
        rack: &str,
        mustuse: &str,
        y_is_vowel: YIsVowel,
        mut callback: impl FnMut(&str) -> FindControl,
    ) -> usize {
        let mut rack_letters = [0u32; 26];
        let mut vowel_slack = 0u32;
        let mut consonant_slack = 0u32;
        let mut wildcard_slack = 0u32;
        for b in rack.bytes() {
            match b {
                b'0' => vowel_slack += 1,
                b'1' => consonant_slack += 1,
                b'?' => wildcard_slack += 1,
                b'a'..=b'z' => rack_letters[(b - b'a') as usize] += 1,
                _ => {}
            }
        }

        let mut mustuse_counts = [0u32; 26];
        for b in mustuse.bytes() {
            if b.is_ascii_lowercase() {
                mustuse_counts[(b - b'a') as usize] += 1;
            }
        }

        let lo = mustuse.len().max(2);
        let hi = (rack.len() + 1).min(MAXLEN);
        let mut count = 0;

        for l in lo..hi {
            'word: for w in self.bucket(l) {
                let mut word_counts = [0u32; 26];
                for b in w.as_bytes() {
                    word_counts[(b - b'a') as usize] += 1;
                }
                for i in 0..26 {
                    if word_counts[i] < mustuse_counts[i] {
                        continue 'word;
                    }
                }

                let mut letters = rack_letters;
                let mut vowels = vowel_slack;
                let mut consonants = consonant_slack;
                let mut wildcards = wildcard_slack;
                for b in w.as_bytes() {
                    let idx = (b - b'a') as usize;
                    if letters[idx] > 0 {
                        letters[idx] -= 1;
                    } else if is_vowel(*b, y_is_vowel) && vowels > 0 {
                        vowels -= 1;
                    } else if is_consonant(*b, y_is_vowel) && consonants > 0 {
                        consonants -= 1;
                    } else if wildcards > 0 {
                        wildcards -= 1;
                    } else {
                        continue 'word;
                    }
                }

                count += 1;
                if callback(w.as_str()) == FindControl::Stop {
                    return count;
                }
            }
        }
        count
    }
}
