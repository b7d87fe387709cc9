//! Pattern matching: the "omnimatch" aggregator and its constituent
//! matchers.

mod date;
mod dictionary;
mod regex_class;
mod repeat;
mod sequence;
mod spatial;

use std::collections::HashMap;

use crate::frequency_lists::{self, RankedDictionary};

/// A recognized weak substring of the password, tagged by which pattern
/// family matched it. Replaces the dynamically-typed "attribute bag"
/// record of the original implementation with a proper `enum` so that
/// estimators and feedback dispatch on the tag, not on which optional
/// fields happen to be populated.
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub i: usize,
    pub j: usize,
    pub token: String,
    pub guesses: Option<f64>,
    pub guesses_log10: Option<f64>,
    pub pattern: Pattern,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Dictionary(DictionaryMatch),
    Spatial(SpatialMatch),
    Repeat(RepeatMatch),
    Sequence(SequenceMatch),
    Regex(RegexMatch),
    Date(DateMatch),
    Bruteforce,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryMatch {
    pub matched_word: String,
    pub rank: usize,
    pub dictionary_name: String,
    pub l33t: bool,
    pub reversed: bool,
    pub sub: Option<HashMap<char, char>>,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialMatch {
    pub graph: String,
    pub turns: usize,
    pub shifted_count: usize,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatMatch {
    pub base_token: String,
    pub repeat_count: usize,
    pub base_guesses: f64,
    pub base_matches: Vec<Match>,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceName {
    Lower,
    Upper,
    Digits,
    Unicode,
}

impl SequenceName {
    pub fn space(self) -> usize {
        match self {
            SequenceName::Lower => 26,
            SequenceName::Upper => 26,
            SequenceName::Digits => 10,
            SequenceName::Unicode => 26,
        }
    }
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceMatch {
    pub sequence_name: SequenceName,
    pub sequence_space: usize,
    pub ascending: bool,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RegexMatch {
    pub regex_name: String,
    pub regex_match: Vec<String>,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub separator: String,
    pub has_full_year: bool,
}

impl Match {
    fn new(i: usize, j: usize, token: String, pattern: Pattern) -> Self {
        Match {
            i,
            j,
            token,
            guesses: None,
            guesses_log10: None,
            pattern,
        }
    }
}

/// Owns either a reference to a static dictionary or a freshly built one
/// (the `user_inputs` dictionary, scoped to a single `estimate()` call).
enum DictRef {
    Static(&'static RankedDictionary),
    Owned(RankedDictionary),
}

/// The set of ranked dictionaries consulted by the dictionary matcher for
/// one `estimate()` call. Threads the caller-supplied `user_inputs` as
/// explicit, per-call state rather than a process-wide global, so that
/// concurrent calls with different inputs never see each other's words.
pub struct Dictionaries {
    entries: Vec<(&'static str, DictRef)>,
}

impl Dictionaries {
    pub fn new(user_inputs: &[&str]) -> Self {
        let mut entries: Vec<(&'static str, DictRef)> = frequency_lists::DICTIONARIES
            .iter()
            .map(|(&name, &dict)| (name, DictRef::Static(dict)))
            .collect();
        let user_dict: RankedDictionary = user_inputs
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.to_lowercase(), idx + 1))
            .collect();
        entries.push(("user_inputs", DictRef::Owned(user_dict)));
        Dictionaries { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RankedDictionary)> {
        self.entries.iter().map(|(name, d)| {
            (
                *name,
                match d {
                    DictRef::Static(d) => *d,
                    DictRef::Owned(d) => d,
                },
            )
        })
    }
}

/// Runs every matcher over `password`, installing `dicts` as the
/// dictionary/reversed-dictionary/leet source, and returns all matches
/// sorted by `(i, j)`.
pub fn omnimatch(password: &[char], dicts: &Dictionaries) -> Vec<Match> {
    if password.is_empty() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    matches.extend(dictionary::dictionary_match(password, dicts));
    matches.extend(dictionary::reversed_dictionary_match(password, dicts));
    matches.extend(dictionary::l33t_match(password, dicts));
    matches.extend(spatial::spatial_match(password));
    matches.extend(repeat::repeat_match(password));
    matches.extend(sequence::sequence_match(password));
    matches.extend(regex_class::regex_match(password));
    matches.extend(date::date_match(password));
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn every_match_token_matches_its_span() {
        let password = chars("correcthorsebatterystaple2016");
        let dicts = Dictionaries::new(&[]);
        for m in omnimatch(&password, &dicts) {
            let expected: String = password[m.i..=m.j].iter().collect();
            assert_eq!(m.token, expected, "token mismatch for {:?}", m.pattern);
            assert!(m.i <= m.j);
        }
    }

    #[test]
    fn empty_password_has_no_matches() {
        let dicts = Dictionaries::new(&[]);
        assert!(omnimatch(&[], &dicts).is_empty());
    }

    #[test]
    fn results_are_sorted_by_i_then_j() {
        let password = chars("qwerty12345");
        let dicts = Dictionaries::new(&[]);
        let matches = omnimatch(&password, &dicts);
        for w in matches.windows(2) {
            assert!((w[0].i, w[0].j) <= (w[1].i, w[1].j));
        }
    }
}
