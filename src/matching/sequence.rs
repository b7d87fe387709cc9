//! Sequence matcher: runs of constant codepoint delta, e.g. "abcd" or
//! "9753".

use itertools::Itertools;

use super::{Match, Pattern, SequenceMatch, SequenceName};

const MAX_DELTA: i32 = 5;

pub fn sequence_match(password: &[char]) -> Vec<Match> {
    let n = password.len();
    if n == 1 {
        return Vec::new();
    }
    let mut matches = Vec::new();
    if n == 0 {
        return matches;
    }

    let deltas: Vec<i32> = password
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| b as i32 - a as i32)
        .collect();

    let mut i = 0usize;
    let mut last_delta: Option<i32> = None;

    let mut emit = |i: usize, j: usize, delta: i32, matches: &mut Vec<Match>| {
        if j <= i {
            return;
        }
        if j - i > 1 || delta.abs() == 1 {
            if delta != 0 && delta.abs() <= MAX_DELTA {
                let token: String = password[i..=j].iter().collect();
                let sequence_name = classify(&token);
                let sequence_space = sequence_name.space();
                matches.push(Match::new(
                    i,
                    j,
                    token,
                    Pattern::Sequence(SequenceMatch {
                        sequence_name,
                        sequence_space,
                        ascending: delta > 0,
                    }),
                ));
            }
        }
    };

    for k in 1..n {
        let delta = deltas[k - 1];
        if last_delta.is_none() {
            last_delta = Some(delta);
        }
        if Some(delta) == last_delta {
            continue;
        }
        let j = k - 1;
        emit(i, j, last_delta.unwrap(), &mut matches);
        i = j;
        last_delta = Some(delta);
    }
    emit(i, n - 1, last_delta.unwrap(), &mut matches);
    matches
}

fn classify(token: &str) -> SequenceName {
    if token.chars().all(|c| c.is_ascii_lowercase()) {
        SequenceName::Lower
    } else if token.chars().all(|c| c.is_ascii_uppercase()) {
        SequenceName::Upper
    } else if token.chars().all(|c| c.is_ascii_digit()) {
        SequenceName::Digits
    } else {
        SequenceName::Unicode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn finds_ascending_lowercase_sequence() {
        let password = chars("abcdef");
        let matches = sequence_match(&password);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.token, "abcdef");
        if let Pattern::Sequence(s) = &m.pattern {
            assert_eq!(s.sequence_name, SequenceName::Lower);
            assert!(s.ascending);
        } else {
            panic!("expected sequence match");
        }
    }

    #[test]
    fn single_character_password_has_no_sequence() {
        assert!(sequence_match(&chars("a")).is_empty());
    }

    #[test]
    fn skipping_sequence_is_still_recognized() {
        // delta of 2 throughout: '9', '7', '5' -> descending, step 2
        let matches = sequence_match(&chars("975"));
        assert_eq!(matches.len(), 1);
        if let Pattern::Sequence(s) = &matches[0].pattern {
            assert!(!s.ascending);
        } else {
            panic!("expected sequence match");
        }
    }
}
