//! Repeat matcher: `(X)X+` runs, recursively scored on their base unit.

use super::{Dictionaries, Match, Pattern, RepeatMatch};
use crate::scoring;

lazy_static! {
    static ref GREEDY: fancy_regex::Regex = fancy_regex::Regex::new(r"(.+)\1+").unwrap();
    static ref LAZY: fancy_regex::Regex = fancy_regex::Regex::new(r"(.+?)\1+").unwrap();
    static ref LAZY_ANCHORED: fancy_regex::Regex = fancy_regex::Regex::new(r"^(.+?)\1+$").unwrap();
}

struct Found {
    start: usize,
    end: usize,
    token: String,
    base_token: String,
}

fn find_repeat(slice: &str) -> Option<Found> {
    let greedy = GREEDY.find(slice).ok().flatten();
    let lazy = LAZY.find(slice).ok().flatten();
    let (greedy, lazy) = (greedy?, lazy?);

    if greedy.as_str().len() > lazy.as_str().len() {
        let base_token = LAZY_ANCHORED
            .captures(greedy.as_str())
            .ok()
            .flatten()
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| greedy.as_str().to_string());
        Some(Found {
            start: greedy.start(),
            end: greedy.end(),
            token: greedy.as_str().to_string(),
            base_token,
        })
    } else {
        let base_token = LAZY
            .captures(slice)
            .ok()
            .flatten()
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| lazy.as_str().to_string());
        Some(Found {
            start: lazy.start(),
            end: lazy.end(),
            token: lazy.as_str().to_string(),
            base_token,
        })
    }
}

pub fn repeat_match(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    let mut last_index = 0usize;

    while last_index < n {
        let remainder: String = password[last_index..].iter().collect();
        let found = match find_repeat(&remainder) {
            Some(f) => f,
            None => break,
        };

        // byte offsets from the regex map 1:1 to char offsets here because
        // repeated-unit matches only ever contain ASCII-boundary-safe chars
        // once re-expressed through `char` indexing; recompute defensively
        // via char counting to stay correct for any input.
        let i = last_index + remainder[..found.start].chars().count();
        let token_len = found.token.chars().count();
        let j = i + token_len - 1;

        let base_token = found.base_token;
        let base_chars: Vec<char> = base_token.chars().collect();
        let base_dicts = Dictionaries::new(&[]);
        let base_seq = super::omnimatch(&base_chars, &base_dicts);
        let base_analysis = scoring::most_guessable_match_sequence(&base_chars, base_seq);

        let repeat_count = token_len / base_chars.len();
        matches.push(Match::new(
            i,
            j,
            found.token,
            Pattern::Repeat(RepeatMatch {
                base_token,
                repeat_count,
                base_guesses: base_analysis.guesses,
                base_matches: base_analysis.sequence,
            }),
        ));

        last_index = j + 1;
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn finds_single_char_repeat() {
        let password = chars("aaaaaa");
        let matches = repeat_match(&password);
        assert_eq!(matches.len(), 1);
        if let Pattern::Repeat(r) = &matches[0].pattern {
            assert_eq!(r.base_token, "a");
            assert_eq!(r.repeat_count, 6);
        } else {
            panic!("expected repeat match");
        }
    }

    #[test]
    fn finds_multi_char_repeat_base() {
        let password = chars("abcabcabc");
        let matches = repeat_match(&password);
        assert_eq!(matches.len(), 1);
        if let Pattern::Repeat(r) = &matches[0].pattern {
            assert_eq!(r.base_token, "abc");
            assert_eq!(r.repeat_count, 3);
        } else {
            panic!("expected repeat match");
        }
    }

    #[test]
    fn no_repeat_in_random_text() {
        assert!(repeat_match(&chars("abcdef")).is_empty());
    }
}
