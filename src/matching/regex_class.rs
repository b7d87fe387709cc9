//! Regex-class matcher: scans for fixed patterns such as `recent_year`.

use super::{Match, Pattern, RegexMatch};

lazy_static! {
    static ref RECENT_YEAR: regex::Regex = regex::Regex::new(r"19\d\d|200\d|201\d").unwrap();
}

pub fn regex_match(password: &[char]) -> Vec<Match> {
    let text: String = password.iter().collect();
    // byte offset -> char offset, since the password is indexed by char
    // throughout the rest of the crate.
    let mut matches = Vec::new();
    for m in RECENT_YEAR.find_iter(&text) {
        let i = byte_to_char(&text, m.start());
        let j = byte_to_char(&text, m.end() - 1);
        let token = m.as_str().to_string();
        matches.push(Match::new(
            i,
            j,
            token.clone(),
            Pattern::Regex(RegexMatch {
                regex_name: "recent_year".to_string(),
                regex_match: vec![token],
            }),
        ));
    }
    matches
}

fn byte_to_char(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx].chars().count()
}
