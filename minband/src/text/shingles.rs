use std::borrow::Cow;
use std::collections::VecDeque;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{LshError, Result};
use crate::text::stop_words::{EnglishStopWords, StopWords};

/// Number of words in a stop-word shingle.
pub const STOP_WORD_SHINGLE_LEN: usize = 3;

/// How raw text is turned into shingles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ShingleMode {
    /// Word triples opened by a stop word, see [`shingle`].
    StopWords,
    /// Character windows of length `k`, see [`k_shingle`].
    Chars { k: usize },
}

impl Default for ShingleMode {
    fn default() -> Self {
        ShingleMode::StopWords
    }
}

impl ShingleMode {
    pub fn validate(&self) -> Result<()> {
        match *self {
            ShingleMode::Chars { k: 0 } => Err(LshError::InvalidShingleSize { k: 0 }),
            _ => Ok(()),
        }
    }

    pub fn shingle<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>> {
        match *self {
            ShingleMode::StopWords => Ok(shingle(lines)),
            ShingleMode::Chars { k } => k_shingle(lines, k),
        }
    }
}

/// Accumulators for overlapping windows of a fixed width.
///
/// A window is opened into a free slot (or a new one) and stays in `active`
/// until it holds `width` items; it is then emitted, cleared and its slot
/// goes back to `free`. `active` keeps windows in opening order, so the
/// oldest window is always emitted first.
struct WindowArena<T> {
    slots: Vec<Vec<T>>,
    free: Vec<usize>,
    active: VecDeque<usize>,
    width: usize,
}

impl<T: Clone> WindowArena<T> {
    fn new(width: usize) -> Self {
        WindowArena {
            slots: Vec::new(),
            free: Vec::new(),
            active: VecDeque::new(),
            width,
        }
    }

    fn open(&mut self) {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Vec::with_capacity(self.width));
                self.slots.len() - 1
            }
        };
        self.active.push_back(slot);
    }

    /// Appends `item` to every open window and hands each window that
    /// became full to `emit` before closing it.
    fn push<F>(&mut self, item: &T, mut emit: F)
    where
        F: FnMut(&[T]),
    {
        let width = self.width;
        let slots = &mut self.slots;
        let free = &mut self.free;
        self.active.retain(|&slot| {
            let window = &mut slots[slot];
            window.push(item.clone());
            if window.len() < width {
                return true;
            }
            emit(window);
            window.clear();
            free.push(slot);
            false
        });
    }

    #[cfg(test)]
    fn num_active(&self) -> usize {
        self.active.len()
    }
}

/// Ordered shingles with first-occurrence de-duplication.
#[derive(Default)]
struct ShingleSet {
    shingles: Vec<String>,
    seen: AHashSet<String>,
}

impl ShingleSet {
    fn offer(&mut self, shingle: String) {
        if !self.seen.contains(&shingle) {
            self.seen.insert(shingle.clone());
            self.shingles.push(shingle);
        }
    }
}

/// Produces shingles of a stop word followed by the next two words,
/// using the bundled English stop-word list.
///
/// # Examples
///
/// ```
/// use minband::text::shingle;
///
/// let shingles = shingle(&["The cat sat on the mat, quietly."]);
/// assert_eq!(shingles, vec!["The cat sat", "on the mat", "the mat quietly"]);
/// ```
pub fn shingle<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    shingle_with(lines, &EnglishStopWords)
}

/// Same as [`shingle`] with an explicit stop-word oracle.
///
/// Words are whitespace delimited and stripped of punctuation marks. The
/// oracle is asked about the lower-cased word, shingles keep the original
/// case. Each stop word opens a new window; windows still open when the
/// input ends are dropped.
pub fn shingle_with<S, W>(lines: &[S], stop_words: &W) -> Vec<String>
where
    S: AsRef<str>,
    W: StopWords + ?Sized,
{
    let mut windows = WindowArena::new(STOP_WORD_SHINGLE_LEN);
    let mut result = ShingleSet::default();
    for line in lines {
        for word in line.as_ref().split_whitespace() {
            let word = remove_punctuation_marks(word);
            if stop_words.is_stop_word(&to_lowercase(&word)) {
                windows.open();
            }
            windows.push(&word, |window| result.offer(window.join(" ")));
        }
    }
    result.shingles
}

/// Produces character shingles of length `k`.
///
/// Punctuation marks are skipped without advancing any window, so the text
/// on both sides of a removed mark is windowed as if it were adjacent.
/// Windows continue across line boundaries. Length is counted in `char`s.
///
/// # Examples
///
/// ```
/// use minband::text::k_shingle;
///
/// let shingles = k_shingle(&["abab!a"], 3).unwrap();
/// assert_eq!(shingles, vec!["aba", "bab"]);
/// ```
pub fn k_shingle<S: AsRef<str>>(lines: &[S], k: usize) -> Result<Vec<String>> {
    if k == 0 {
        return Err(LshError::InvalidShingleSize { k });
    }
    let mut windows = WindowArena::new(k);
    let mut result = ShingleSet::default();
    for line in lines {
        for c in line.as_ref().chars().filter(|&c| !is_punctuation_mark(c)) {
            windows.open();
            windows.push(&c, |window| result.offer(window.iter().collect()));
        }
    }
    Ok(result.shingles)
}

fn to_lowercase(word: &str) -> Cow<'_, str> {
    if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

#[inline]
pub fn is_punctuation_mark(c: char) -> bool {
    matches!(c, '.' | ',' | ':' | ';' | '?' | '!')
}

pub fn remove_punctuation_marks(s: &str) -> Cow<'_, str> {
    if s.contains(is_punctuation_mark) {
        Cow::Owned(s.chars().filter(|&c| !is_punctuation_mark(c)).collect())
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static A_TEXT: &str = "A spokesperson for the Sudzo Corporation revealed today that studies have shown it is good for people to buy Sudzo products.";
    static DUPED_TEXT: &str = "A spokesperson for the Sudzo Corporation. A spokesperson for the Sudzo Corporation.";

    #[test]
    fn test_is_punctuation_mark() {
        for c in ['.', ',', ':', ';', '?', '!'] {
            assert!(is_punctuation_mark(c));
        }
        for c in [' ', 'a', '1', '#'] {
            assert!(!is_punctuation_mark(c));
        }
    }

    #[test]
    fn test_remove_punctuation_marks() {
        assert_eq!("for people to buy Sudzo products", remove_punctuation_marks("for people to buy Sudzo products."));
        assert_eq!(" for people to buy Sudzo products", remove_punctuation_marks("... for people to buy Sudzo products."));
        assert_eq!("for people to buy Sudzo products", remove_punctuation_marks("...for people to buy Sudzo products."));
        assert_eq!("Hello world", remove_punctuation_marks("Hello, world!"));
        assert!(matches!(remove_punctuation_marks("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_shingle() {
        let shingles = shingle(&[A_TEXT]);
        assert_eq!(
            shingles,
            vec![
                "A spokesperson for",
                "for the Sudzo",
                "the Sudzo Corporation",
                "that studies have",
                "have shown it",
                "shown it is",
                "it is good",
                "is good for",
                "for people to",
                "to buy Sudzo",
            ]
        );
    }

    #[test]
    fn test_shingle_deduplicates() {
        let shingles = shingle(&[DUPED_TEXT]);
        assert_eq!(shingles, vec!["A spokesperson for", "for the Sudzo", "the Sudzo Corporation"]);
    }

    #[test]
    fn test_shingle_windows_span_lines() {
        assert!(shingle(&["Sudzo is", "good"]).is_empty());
        let shingles = shingle(&["Sudzo is", "really good stuff"]);
        assert_eq!(shingles, vec!["is really good", "really good stuff"]);
    }

    #[test]
    fn test_shingle_drops_incomplete_windows() {
        assert!(shingle(&["products for the"]).is_empty());
        assert!(shingle::<&str>(&[]).is_empty());
        assert!(shingle(&["", "   "]).is_empty());
    }

    #[test]
    fn test_shingle_with_custom_oracle() {
        let is_sudzo = |word: &str| word == "sudzo";
        let shingles = shingle_with(&[A_TEXT], &is_sudzo);
        assert_eq!(shingles, vec!["Sudzo Corporation revealed"]);
    }

    #[test]
    fn test_shingle_with_lowercases_oracle_input() {
        let lowercase_only = |word: &str| ["a", "for", "the"].contains(&word);
        let shingles = shingle_with(&["The cat sat for a while"], &lowercase_only);
        assert_eq!(shingles, vec!["The cat sat", "for a while"]);
        assert_eq!(shingles, shingle(&["The cat sat for a while"]));

        let with_umlaut = |word: &str| word == "über";
        assert_eq!(shingle_with(&["Über alles hinweg"], &with_umlaut), vec!["Über alles hinweg"]);
    }

    #[test]
    fn test_k_shingle() {
        let shingles = k_shingle(&[A_TEXT], 9).unwrap();
        assert_eq!(shingles.len(), 115);
        assert_eq!("A spokesp", shingles[0]);
        assert_eq!(" spokespe", shingles[1]);
        assert_eq!("spokesper", shingles[2]);
        assert_eq!("zo produc", shingles[shingles.len() - 3]);
        assert_eq!("o product", shingles[shingles.len() - 2]);
        assert_eq!(" products", shingles[shingles.len() - 1]);
    }

    #[test]
    fn test_k_shingle_deduplicates() {
        let shingles = k_shingle(&[DUPED_TEXT], 9).unwrap();
        assert_eq!(shingles.len(), 41);
        assert_eq!("A spokesp", shingles[0]);
        assert_eq!("on A spok", shingles[shingles.len() - 3]);
        assert_eq!("n A spoke", shingles[shingles.len() - 2]);
        assert_eq!(" A spokes", shingles[shingles.len() - 1]);
    }

    #[test]
    fn test_k_shingle_counts_chars() {
        let shingles = k_shingle(&["héllo"], 2).unwrap();
        assert_eq!(shingles, vec!["hé", "él", "ll", "lo"]);
        assert_eq!(k_shingle(&["ab", "cd"], 3).unwrap(), vec!["abc", "bcd"]);
        assert!(k_shingle(&["ab"], 3).unwrap().is_empty());
    }

    #[test]
    fn test_k_shingle_rejects_zero() {
        assert_eq!(k_shingle(&["abc"], 0), Err(LshError::InvalidShingleSize { k: 0 }));
    }

    #[test]
    fn test_window_arena_reuses_slots() {
        let mut arena = WindowArena::new(2);
        let mut emitted = Vec::new();
        for item in [1, 2, 3, 4] {
            arena.open();
            arena.push(&item, |w| emitted.push(w.to_vec()));
        }
        assert_eq!(emitted, vec![vec![1, 2], vec![2, 3], vec![3, 4]]);
        assert_eq!(arena.num_active(), 1);
        assert!(arena.slots.len() <= 2);
    }

    #[test]
    fn test_shingle_mode() {
        assert_eq!(ShingleMode::default(), ShingleMode::StopWords);
        assert_eq!(ShingleMode::Chars { k: 9 }.shingle(&[A_TEXT]).unwrap().len(), 115);
        assert_eq!(ShingleMode::StopWords.shingle(&[A_TEXT]).unwrap().len(), 10);
        assert!(ShingleMode::Chars { k: 0 }.validate().is_err());
    }
}
