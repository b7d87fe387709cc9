//! Date matcher: dates with and without separators.

use super::{DateMatch, Match, Pattern};

const DATE_MIN_YEAR: i32 = 1000;
const DATE_MAX_YEAR: i32 = 2050;
use crate::scoring::REFERENCE_YEAR;

lazy_static! {
    static ref DATE_WITH_SEPARATOR: fancy_regex::Regex =
        fancy_regex::Regex::new(r"^(\d{1,4})([\s/\\_.-])(\d{1,2})\2(\d{1,4})$").unwrap();
}

fn date_splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

struct Dmy {
    year: i32,
    month: u32,
    day: u32,
    has_full_year: bool,
}

fn map_ints_to_dm(x: i32, y: i32) -> Option<(u32, u32)> {
    for &(d, m) in &[(x, y), (y, x)] {
        if (1..=31).contains(&d) && (1..=12).contains(&m) {
            return Some((d as u32, m as u32));
        }
    }
    None
}

/// Maps an unordered 3-tuple of integers to a (year, month, day). Rejects
/// implausible combinations up front, then tries the trailing integer as
/// the year before falling back to the leading one.
fn map_ints_to_dmy(a: i32, b: i32, c: i32) -> Option<Dmy> {
    if !(1..=31).contains(&b) {
        return None;
    }
    let ints = [a, b, c];
    let mut over_31 = 0;
    let mut over_12 = 0;
    let mut under_1 = 0;
    for &n in &ints {
        if (100..DATE_MIN_YEAR).contains(&n) || n > DATE_MAX_YEAR {
            return None;
        }
        if n > 31 {
            over_31 += 1;
        }
        if n > 12 {
            over_12 += 1;
        }
        if n <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    // year-last (c) then year-first (a); if either position holds a
    // plausible four-digit year, commit to it -- a four-digit year that
    // doesn't resolve to a valid day/month means the whole substring isn't
    // a date, it doesn't fall through to two-digit-year guessing.
    let year_candidates = [(c, (a, b)), (a, (b, c))];
    for &(y, (x, z)) in &year_candidates {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&y) {
            return map_ints_to_dm(x, z).map(|(day, month)| Dmy {
                year: y,
                month,
                day,
                has_full_year: true,
            });
        }
    }
    for &(y, (x, z)) in &year_candidates {
        if let Some((day, month)) = map_ints_to_dm(x, z) {
            return Some(Dmy {
                year: two_to_four_digit_year(y),
                month,
                day,
                has_full_year: false,
            });
        }
    }
    None
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}

fn date_match_no_separator(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    for i in 0..n {
        for len in 4..=8usize.min(n - i) {
            let end = i + len;
            let slice = &password[i..end];
            if !slice.iter().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let digits: Vec<i32> = slice.iter().map(|c| c.to_digit(10).unwrap() as i32).collect();
            let mut best: Option<Dmy> = None;
            for &(k, l) in date_splits(len) {
                let a = digits_to_int(&digits[0..k]);
                let b = digits_to_int(&digits[k..l]);
                let c = digits_to_int(&digits[l..len]);
                if let Some(dmy) = map_ints_to_dmy(a, b, c) {
                    let better = best
                        .as_ref()
                        .map(|cur| (dmy.year - REFERENCE_YEAR).abs() < (cur.year - REFERENCE_YEAR).abs())
                        .unwrap_or(true);
                    if better {
                        best = Some(dmy);
                    }
                }
            }
            if let Some(dmy) = best {
                let token: String = slice.iter().collect();
                matches.push(Match::new(
                    i,
                    end - 1,
                    token,
                    Pattern::Date(DateMatch {
                        year: dmy.year,
                        month: dmy.month,
                        day: dmy.day,
                        separator: String::new(),
                        has_full_year: dmy.has_full_year,
                    }),
                ));
            }
        }
    }
    matches
}

fn digits_to_int(digits: &[i32]) -> i32 {
    digits.iter().fold(0, |acc, d| acc * 10 + d)
}

fn date_match_with_separator(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    for i in 0..n {
        for len in 6..=10usize.min(n - i) {
            let end = i + len;
            let slice: String = password[i..end].iter().collect();
            if let Ok(Some(caps)) = DATE_WITH_SEPARATOR.captures(&slice) {
                let a: i32 = caps[1].parse().unwrap();
                let sep = caps[2].to_string();
                let b: i32 = caps[3].parse().unwrap();
                let c: i32 = caps[4].parse().unwrap();
                if let Some(dmy) = map_ints_to_dmy(a, b, c) {
                    matches.push(Match::new(
                        i,
                        end - 1,
                        slice.clone(),
                        Pattern::Date(DateMatch {
                            year: dmy.year,
                            month: dmy.month,
                            day: dmy.day,
                            separator: sep,
                            has_full_year: dmy.has_full_year,
                        }),
                    ));
                }
            }
        }
    }
    matches
}

/// Discards Date matches strictly contained within another Date match --
/// the separator pass and the no-separator pass can both fire on
/// overlapping spans of the same digits, and the wider one is the real
/// date.
fn suppress_submatches(matches: Vec<Match>) -> Vec<Match> {
    let keep: Vec<bool> = matches
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            !matches
                .iter()
                .enumerate()
                .any(|(other_idx, other)| other_idx != idx && other.i <= m.i && other.j >= m.j)
        })
        .collect();
    matches
        .into_iter()
        .zip(keep)
        .filter_map(|(m, k)| if k { Some(m) } else { None })
        .collect()
}

pub fn date_match(password: &[char]) -> Vec<Match> {
    let mut matches = date_match_no_separator(password);
    matches.extend(date_match_with_separator(password));
    suppress_submatches(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn finds_date_with_slash_separator() {
        let password = chars("11/15/1991");
        let matches = date_match(&password);
        assert_eq!(matches.len(), 1);
        if let Pattern::Date(d) = &matches[0].pattern {
            assert_eq!(d.year, 1991);
            assert_eq!(d.month, 11);
            assert_eq!(d.day, 15);
            assert_eq!(d.separator, "/");
        } else {
            panic!("expected date match");
        }
    }

    #[test]
    fn finds_date_without_separator() {
        let password = chars("19911115");
        let matches = date_match(&password);
        assert!(matches.iter().any(|m| matches!(&m.pattern, Pattern::Date(d) if d.year == 1991 && d.month == 11 && d.day == 15)));
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(map_ints_to_dmy(40, 40, 40).is_none());
    }

    #[test]
    fn two_digit_year_resolves_to_full_year() {
        assert_eq!(two_to_four_digit_year(15), 2015);
        assert_eq!(two_to_four_digit_year(87), 1987);
        assert_eq!(two_to_four_digit_year(1991), 1991);
    }
}
