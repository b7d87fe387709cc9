//! Guess estimation and the most-guessable-sequence optimizer.
//!
//! Guesses are carried as `f64` rather than an integer type: `l!` and
//! `D^(l-1)` blow past `u64::MAX` at fairly modest sequence lengths, and the
//! optimizer only ever compares and multiplies these numbers, so it's
//! robust to floating-point error as long as the ordering stays consistent.

use std::collections::HashMap;

use crate::matching::{DateMatch, DictionaryMatch, Match, Pattern, RegexMatch, RepeatMatch, SequenceMatch, SpatialMatch};

pub const REFERENCE_YEAR: i32 = 2016;
const MIN_YEAR_SPACE: f64 = 20.0;
const BRUTEFORCE_CARDINALITY: f64 = 10.0;
const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10_000.0;
const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct GuessCalculation {
    pub guesses: f64,
    pub guesses_log10: f64,
    pub sequence: Vec<Match>,
}

struct Optimal {
    m: Vec<HashMap<usize, Match>>,
    pi: Vec<HashMap<usize, f64>>,
    g: Vec<HashMap<usize, f64>>,
}

/// Computes the non-overlapping cover of `password` that minimizes
/// `l! * Product(guesses) + D^(l-1)`.
pub fn most_guessable_match_sequence(password: &[char], matches: Vec<Match>) -> GuessCalculation {
    most_guessable_match_sequence_opts(password, matches, false)
}

pub fn most_guessable_match_sequence_opts(
    password: &[char],
    matches: Vec<Match>,
    exclude_additive: bool,
) -> GuessCalculation {
    let n = password.len();
    if n == 0 {
        return GuessCalculation {
            guesses: 1.0,
            guesses_log10: 0.0,
            sequence: Vec::new(),
        };
    }

    let mut matches_by_j: Vec<Vec<Match>> = (0..n).map(|_| Vec::new()).collect();
    for m in matches {
        matches_by_j[m.j].push(m);
    }
    for lst in &mut matches_by_j {
        lst.sort_by_key(|m| m.i);
    }

    let mut optimal = Optimal {
        m: (0..n).map(|_| HashMap::new()).collect(),
        pi: (0..n).map(|_| HashMap::new()).collect(),
        g: (0..n).map(|_| HashMap::new()).collect(),
    };

    for k in 0..n {
        for m in std::mem::take(&mut matches_by_j[k]) {
            if m.i > 0 {
                let ls: Vec<usize> = optimal.m[m.i - 1].keys().copied().collect();
                for l in ls {
                    update(m.clone(), l + 1, password, &mut optimal, exclude_additive);
                }
            } else {
                update(m, 1, password, &mut optimal, exclude_additive);
            }
        }
        bruteforce_update(k, password, &mut optimal, exclude_additive);
    }

    let sequence = unwind(n, &mut optimal);
    let optimal_l = sequence.len();
    let guesses = optimal.g[n - 1][&optimal_l];

    GuessCalculation {
        guesses,
        guesses_log10: guesses.log10(),
        sequence,
    }
}

fn update(mut m: Match, l: usize, password: &[char], optimal: &mut Optimal, exclude_additive: bool) {
    let k = m.j;
    let mut pi = estimate_guesses(&mut m, password.len());
    if l > 1 {
        pi *= optimal.pi[m.i - 1][&(l - 1)];
    }
    let mut g = factorial(l) * pi;
    if !exclude_additive {
        g += MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi((l - 1) as i32);
    }
    for (&competing_l, &competing_g) in optimal.g[k].iter() {
        if competing_l <= l && competing_g <= g {
            return;
        }
    }
    optimal.g[k].insert(l, g);
    optimal.m[k].insert(l, m);
    optimal.pi[k].insert(l, pi);
}

fn bruteforce_update(k: usize, password: &[char], optimal: &mut Optimal, exclude_additive: bool) {
    let m = make_bruteforce_match(0, k, password);
    update(m, 1, password, optimal, exclude_additive);
    if k == 0 {
        return;
    }
    for (&l, last_m) in optimal.m[k - 1].clone().iter() {
        if matches!(last_m.pattern, Pattern::Bruteforce) {
            let m = make_bruteforce_match(last_m.i, k, password);
            update(m, l, password, optimal, exclude_additive);
        } else {
            let m = make_bruteforce_match(k, k, password);
            update(m, l + 1, password, optimal, exclude_additive);
        }
    }
}

fn make_bruteforce_match(i: usize, j: usize, password: &[char]) -> Match {
    let token: String = password[i..=j].iter().collect();
    Match {
        i,
        j,
        token,
        guesses: None,
        guesses_log10: None,
        pattern: Pattern::Bruteforce,
    }
}

fn unwind(n: usize, optimal: &mut Optimal) -> Vec<Match> {
    let mut sequence = Vec::new();
    let mut k = n - 1;
    let (mut l, _) = optimal.g[k]
        .iter()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(&l, &g)| (l, g))
        .expect("at least one candidate sequence covers the last index");

    loop {
        let m = optimal.m[k].remove(&l).expect("dp state is internally consistent");
        let next_k = if m.i > 0 { Some(m.i - 1) } else { None };
        sequence.insert(0, m);
        match next_k {
            Some(k2) => {
                k = k2;
                l -= 1;
            }
            None => break,
        }
    }
    sequence
}

fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0f64, |acc, x| acc * x as f64)
}

fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 {
        return 1.0;
    }
    let mut r = 1.0f64;
    let mut n = n as f64;
    for d in 1..=k {
        r = r * n / d as f64;
        n -= 1.0;
    }
    r
}

fn estimate_guesses(m: &mut Match, password_len: usize) -> f64 {
    if let Some(g) = m.guesses {
        return g;
    }
    let token_len = m.token.chars().count();
    let min_guesses = if token_len < password_len {
        if token_len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };

    let raw = match &m.pattern {
        Pattern::Bruteforce => bruteforce_guesses(token_len),
        Pattern::Dictionary(d) => dictionary_guesses(d, &m.token),
        Pattern::Spatial(s) => spatial_guesses(s, token_len),
        Pattern::Repeat(r) => repeat_guesses(r),
        Pattern::Sequence(s) => sequence_guesses(s, &m.token),
        Pattern::Regex(r) => regex_guesses(r),
        Pattern::Date(d) => date_guesses(d),
    };

    let mut guesses = raw.max(min_guesses);
    if let Pattern::Dictionary(d) = &m.pattern {
        guesses += if d.dictionary_name == "user_inputs" { 0.0 } else { 1.0 };
    }
    m.guesses = Some(guesses);
    m.guesses_log10 = Some(guesses.log10());
    guesses
}

fn bruteforce_guesses(len: usize) -> f64 {
    let guesses = BRUTEFORCE_CARDINALITY.powi(len as i32);
    let min_guesses = if len == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
    };
    guesses.max(min_guesses)
}

fn dictionary_guesses(d: &DictionaryMatch, token: &str) -> f64 {
    let uv = uppercase_variations(token);
    let lv = l33t_variations(d, token);
    let reversed = if d.reversed { 2.0 } else { 1.0 };
    d.rank as f64 * uv * lv * reversed
}

/// Sums `C(U+L, i)` for `i` in `[1, min(U,L))`, excluding `min(U,L)` itself.
/// Looks like an off-by-one; kept as-is to match the reference guess
/// numbers other implementations produce.
fn uppercase_variations(token: &str) -> f64 {
    if token.chars().all(|c| !c.is_uppercase()) || token.to_lowercase() == token {
        return 1.0;
    }
    let first_upper = token.chars().next().map_or(false, char::is_uppercase);
    let last_upper = token.chars().last().map_or(false, char::is_uppercase);
    let all_upper = token.chars().all(char::is_uppercase);
    if first_upper || last_upper || all_upper {
        return 2.0;
    }
    let upper = token.chars().filter(|c| c.is_uppercase()).count();
    let lower = token.chars().filter(|c| c.is_lowercase()).count();
    (1..upper.min(lower)).map(|i| n_ck(upper + lower, i)).sum()
}

fn l33t_variations(d: &DictionaryMatch, token: &str) -> f64 {
    if !d.l33t {
        return 1.0;
    }
    let lower = token.to_lowercase();
    let mut variations = 1.0;
    if let Some(sub) = &d.sub {
        for (&subbed_chr, &unsubbed_chr) in sub {
            let s = lower.chars().filter(|&c| c == subbed_chr).count();
            let u = lower.chars().filter(|&c| c == unsubbed_chr).count();
            if s == 0 || u == 0 {
                variations *= 2.0;
            } else {
                let p = s.min(u);
                variations *= (1..p).map(|i| n_ck(s + u, i)).sum::<f64>();
            }
        }
    }
    variations
}

lazy_static! {
    static ref KEYBOARD_AVERAGE_DEGREE: f64 = calc_average_degree(&crate::adjacency_graphs::QWERTY);
    static ref KEYPAD_AVERAGE_DEGREE: f64 = calc_average_degree(&crate::adjacency_graphs::KEYPAD);
    static ref KEYBOARD_STARTING_POSITIONS: f64 = crate::adjacency_graphs::QWERTY.len() as f64;
    static ref KEYPAD_STARTING_POSITIONS: f64 = crate::adjacency_graphs::KEYPAD.len() as f64;
}

fn calc_average_degree(graph: &crate::adjacency_graphs::Graph) -> f64 {
    let sum: usize = graph
        .values()
        .map(|slots| slots.iter().filter(|s| s.is_some()).count())
        .sum();
    sum as f64 / graph.len() as f64
}

/// Sums over possible run lengths and turn counts; both loop bounds are
/// exclusive on their upper end, matching the reference guess numbers for
/// keyboard-pattern matches.
fn spatial_guesses(s: &SpatialMatch, len: usize) -> f64 {
    let (starts, degree) = if s.graph == "qwerty" || s.graph == "dvorak" {
        (*KEYBOARD_STARTING_POSITIONS, *KEYBOARD_AVERAGE_DEGREE)
    } else {
        (*KEYPAD_STARTING_POSITIONS, *KEYPAD_AVERAGE_DEGREE)
    };
    let mut guesses = 0.0;
    for i in 2..len {
        let possible_turns = s.turns.min(i - 1);
        for j in 1..possible_turns {
            guesses += n_ck(i - 1, j - 1) * starts * degree.powi(j as i32);
        }
    }
    if s.shifted_count > 0 {
        let unshifted = len - s.shifted_count;
        if unshifted == 0 {
            guesses *= 2.0;
        } else {
            let p = s.shifted_count.min(unshifted);
            let variations: f64 = (1..p).map(|i| n_ck(s.shifted_count + unshifted, i)).sum();
            guesses *= variations;
        }
    }
    guesses
}

fn repeat_guesses(r: &RepeatMatch) -> f64 {
    r.base_guesses * r.repeat_count as f64
}

fn sequence_guesses(s: &SequenceMatch, token: &str) -> f64 {
    let first = token.chars().next().expect("sequence matches are never empty");
    let mut base = if ['a', 'A', 'z', 'Z', '0', '1', '9'].contains(&first) {
        4.0
    } else if first.is_ascii_digit() {
        10.0
    } else {
        26.0
    };
    if !s.ascending {
        base *= 2.0;
    }
    base * token.chars().count() as f64
}

fn regex_guesses(r: &RegexMatch) -> f64 {
    match r.regex_name.as_str() {
        "recent_year" => {
            let year: i32 = r.regex_match[0].parse().unwrap_or(REFERENCE_YEAR);
            ((year - REFERENCE_YEAR).abs() as f64).max(MIN_YEAR_SPACE)
        }
        _ => MIN_YEAR_SPACE,
    }
}

fn date_guesses(d: &DateMatch) -> f64 {
    let year_space = ((d.year - REFERENCE_YEAR).abs() as f64).max(MIN_YEAR_SPACE);
    let mut guesses = year_space * 365.0;
    if d.has_full_year {
        guesses *= 2.0;
    }
    if !d.separator.is_empty() {
        guesses *= 4.0;
    }
    guesses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Dictionaries, Pattern};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn dictionary_match(i: usize, j: usize, token: &str, rank: usize) -> Match {
        Match {
            i,
            j,
            token: token.to_string(),
            guesses: None,
            guesses_log10: None,
            pattern: Pattern::Dictionary(DictionaryMatch {
                matched_word: token.to_lowercase(),
                rank,
                dictionary_name: "passwords".to_string(),
                l33t: false,
                reversed: false,
                sub: None,
            }),
        }
    }

    #[test]
    fn n_ck_matches_known_values() {
        let cases = [(0, 0, 1.0), (5, 0, 1.0), (0, 1, 0.0), (2, 1, 2.0), (4, 2, 6.0)];
        for (n, k, expected) in cases {
            assert_eq!(n_ck(n, k), expected);
        }
    }

    #[test]
    fn empty_password_yields_one_guess() {
        let result = most_guessable_match_sequence(&[], Vec::new());
        assert_eq!(result.guesses, 1.0);
        assert!(result.sequence.is_empty());
    }

    #[test]
    fn no_matches_falls_back_to_bruteforce() {
        let password = chars("0123456789");
        let result = most_guessable_match_sequence_opts(&password, Vec::new(), true);
        assert_eq!(result.sequence.len(), 1);
        assert!(matches!(result.sequence[0].pattern, Pattern::Bruteforce));
        assert_eq!(result.sequence[0].token, "0123456789");
    }

    #[test]
    fn prefers_fewer_guesses_between_identical_spans() {
        let password = chars("0123456789");
        let mut cheap = dictionary_match(0, 9, "0123456789", 1);
        let mut expensive = dictionary_match(0, 9, "0123456789", 1000);
        cheap.guesses = Some(1.0);
        expensive.guesses = Some(1000.0);
        let result = most_guessable_match_sequence_opts(
            &password,
            vec![cheap.clone(), expensive],
            true,
        );
        assert_eq!(result.sequence.len(), 1);
        assert_eq!(result.sequence[0].guesses, Some(1.0));
    }

    #[test]
    fn cover_is_contiguous_and_complete() {
        let password = chars("correcthorsebatterystaple2016");
        let dicts = Dictionaries::new(&[]);
        let matches = crate::matching::omnimatch(&password, &dicts);
        let result = most_guessable_match_sequence(&password, matches);
        let mut cursor = 0usize;
        for m in &result.sequence {
            assert_eq!(m.i, cursor);
            cursor = m.j + 1;
        }
        assert_eq!(cursor, password.len());
    }

    #[test]
    fn adding_matches_never_increases_guesses() {
        let password = chars("letmein1");
        let dicts = Dictionaries::new(&[]);
        let matches = crate::matching::omnimatch(&password, &dicts);
        let with_matches = most_guessable_match_sequence(&password, matches);
        let without_matches = most_guessable_match_sequence(&password, Vec::new());
        assert!(with_matches.guesses <= without_matches.guesses);
    }
}
