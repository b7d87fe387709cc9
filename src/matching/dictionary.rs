//! Dictionary, reversed-dictionary and leet-speak matchers.

use std::collections::HashMap;

use itertools::Itertools;

use super::{Dictionaries, DictionaryMatch, Match, Pattern};

/// Substitute characters considered for each plaintext letter. Pruned down
/// to the ones that actually occur in the password before use, since most
/// passwords only touch a handful of these.
const LEET_TABLE: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// For every registered dictionary and every substring of `password`, emits
/// a Dictionary match when the lowercased substring is a dictionary entry.
pub fn dictionary_match(password: &[char], dicts: &Dictionaries) -> Vec<Match> {
    let n = password.len();
    let lower: Vec<char> = password.iter().flat_map(|c| c.to_lowercase()).collect();
    // `to_lowercase` can change length for a handful of codepoints; fall
    // back to per-char lowercase (one-to-one) so indices stay aligned with
    // `password`.
    let lower: Vec<char> = if lower.len() == n {
        lower
    } else {
        password
            .iter()
            .map(|c| c.to_lowercase().next().unwrap_or(*c))
            .collect()
    };

    let mut matches = Vec::new();
    for (dict_name, ranked_dict) in dicts.iter() {
        for i in 0..n {
            for j in i..n {
                let word: String = lower[i..=j].iter().collect();
                if let Some(&rank) = ranked_dict.get(&word) {
                    let token: String = password[i..=j].iter().collect();
                    matches.push(Match::new(
                        i,
                        j,
                        token,
                        Pattern::Dictionary(DictionaryMatch {
                            matched_word: word,
                            rank,
                            dictionary_name: dict_name.to_string(),
                            l33t: false,
                            reversed: false,
                            sub: None,
                        }),
                    ));
                }
            }
        }
    }
    matches
}

/// Runs the dictionary matcher on the reversed password and translates
/// indices/tokens back into the coordinates of the original password.
pub fn reversed_dictionary_match(password: &[char], dicts: &Dictionaries) -> Vec<Match> {
    let n = password.len();
    let reversed: Vec<char> = password.iter().rev().copied().collect();
    let mut matches = dictionary_match(&reversed, dicts);
    for m in &mut matches {
        let (i, j) = (n - 1 - m.j, n - 1 - m.i);
        m.i = i;
        m.j = j;
        m.token = m.token.chars().rev().collect();
        if let Pattern::Dictionary(d) = &mut m.pattern {
            d.reversed = true;
        }
    }
    matches
}

/// Keeps only the leet substitutes that actually occur in `password` --
/// no point enumerating substitution maps for symbols that aren't there.
fn relevant_l33t_subtable(password: &[char]) -> Vec<(char, Vec<char>)> {
    let present: std::collections::HashSet<char> = password.iter().copied().collect();
    LEET_TABLE
        .iter()
        .filter_map(|&(letter, subs)| {
            let relevant: Vec<char> = subs.iter().copied().filter(|s| present.contains(s)).collect();
            if relevant.is_empty() {
                None
            } else {
                Some((letter, relevant))
            }
        })
        .collect()
}

/// Enumerates every non-empty substitution map over `table`: each letter
/// either is omitted or bound to exactly one of its relevant substitutes.
/// Deduplicated by sorted key-value content, since different construction
/// orders can land on the same map.
fn enumerate_l33t_subs(table: &[(char, Vec<char>)]) -> Vec<HashMap<char, char>> {
    // subs: each candidate is a Vec<(sub_char, letter)>, built up letter by letter.
    let mut subs: Vec<Vec<(char, char)>> = vec![Vec::new()];

    for &(letter, ref relevant) in table {
        let mut next_subs: Vec<Vec<(char, char)>> = Vec::new();
        for &l33t_chr in relevant {
            for sub in &subs {
                let dup_index = sub.iter().position(|&(c, _)| c == l33t_chr);
                match dup_index {
                    None => {
                        let mut extended = sub.clone();
                        extended.push((l33t_chr, letter));
                        next_subs.push(extended);
                    }
                    Some(idx) => {
                        // keep the original (letting a later key win the slot later)
                        next_subs.push(sub.clone());
                        let mut alternative = sub.clone();
                        alternative.remove(idx);
                        alternative.push((l33t_chr, letter));
                        next_subs.push(alternative);
                    }
                }
            }
        }
        subs = dedup_subs(next_subs);
    }

    subs.into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.into_iter().map(|(sub, letter)| (sub, letter)).collect())
        .collect()
}

fn dedup_subs(subs: Vec<Vec<(char, char)>>) -> Vec<Vec<(char, char)>> {
    subs.into_iter()
        .unique_by(|sub| sub.iter().copied().sorted().collect::<Vec<_>>())
        .collect()
}

fn translate(password: &[char], sub: &HashMap<char, char>) -> Vec<char> {
    password
        .iter()
        .map(|c| *sub.get(c).unwrap_or(c))
        .collect()
}

/// Re-runs the dictionary matcher under every leet substitution map,
/// keeping only matches that actually required a substitution and span
/// more than one character -- a single substituted character is too easy
/// to land on by accident to count as a real leet match.
pub fn l33t_match(password: &[char], dicts: &Dictionaries) -> Vec<Match> {
    let table = relevant_l33t_subtable(password);
    if table.is_empty() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    for sub in enumerate_l33t_subs(&table) {
        if sub.is_empty() {
            continue;
        }
        let subbed = translate(password, &sub);
        for mut m in dictionary_match(&subbed, dicts) {
            let token: String = password[m.i..=m.j].iter().collect();
            if let Pattern::Dictionary(d) = &m.pattern {
                if token.to_lowercase() == d.matched_word {
                    // no real substitution was needed for this token
                    continue;
                }
            }
            let used_sub: HashMap<char, char> = sub
                .iter()
                .filter(|&(&subbed_chr, _)| token.contains(subbed_chr))
                .map(|(&k, &v)| (k, v))
                .collect();
            m.token = token;
            if let Pattern::Dictionary(d) = &mut m.pattern {
                d.l33t = true;
                d.sub = Some(used_sub);
            }
            matches.push(m);
        }
    }
    matches.retain(|m| m.token.chars().count() > 1);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Dictionaries;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn finds_password_in_dictionary() {
        let dicts = Dictionaries::new(&[]);
        let password = chars("password");
        let matches = dictionary_match(&password, &dicts);
        assert!(matches.iter().any(|m| {
            matches!(&m.pattern, Pattern::Dictionary(d) if d.dictionary_name == "passwords" && d.rank == 1)
                && m.i == 0
                && m.j == 7
        }));
    }

    #[test]
    fn user_inputs_are_installed_fresh_each_call() {
        let dicts = Dictionaries::new(&["corporation"]);
        let password = chars("corporation");
        let matches = dictionary_match(&password, &dicts);
        assert!(matches.iter().any(|m| {
            matches!(&m.pattern, Pattern::Dictionary(d) if d.dictionary_name == "user_inputs")
        }));

        let dicts2 = Dictionaries::new(&[]);
        let matches2 = dictionary_match(&password, &dicts2);
        assert!(!matches2.iter().any(|m| {
            matches!(&m.pattern, Pattern::Dictionary(d) if d.dictionary_name == "user_inputs")
        }));
    }

    #[test]
    fn leet_match_requires_real_substitution() {
        let dicts = Dictionaries::new(&[]);
        let password = chars("p@ssw0rd");
        let matches = l33t_match(&password, &dicts);
        assert!(matches.iter().any(|m| {
            matches!(&m.pattern, Pattern::Dictionary(d) if d.l33t && d.sub.as_ref().unwrap().get(&'@') == Some(&'a'))
        }));
    }

    #[test]
    fn single_char_leet_matches_are_discarded() {
        let dicts = Dictionaries::new(&[]);
        // '4' alone could leet-match a one letter dictionary word; must never surface.
        let password = chars("4");
        let matches = l33t_match(&password, &dicts);
        assert!(matches.is_empty());
    }
}
