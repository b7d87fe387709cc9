//! Human-readable feedback: a top-line warning plus actionable
//! suggestions, built from the longest match in the optimal sequence.

use crate::matching::{DictionaryMatch, Match, Pattern};

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Use a few words, avoid common phrases",
    "No need for symbols, digits, or uppercase letters",
];

/// Builds top-line feedback from a scored sequence. An empty password gets
/// the generic suggestions; a strong-enough score gets none, since there is
/// nothing specific worth calling out.
pub fn get_feedback(score: u8, sequence: &[Match]) -> Feedback {
    if sequence.is_empty() {
        return Feedback {
            warning: None,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        };
    }
    if score > 2 {
        return Feedback::default();
    }

    let longest_match = sequence
        .iter()
        .max_by(|a, b| {
            let len_a = a.token.chars().count();
            let len_b = b.token.chars().count();
            len_a.cmp(&len_b)
        })
        .expect("sequence is non-empty");

    let is_sole_match = sequence.len() == 1;
    let mut feedback = get_match_feedback(longest_match, is_sole_match);
    feedback.suggestions.push("Add another word or two. Uncommon words are better.".to_string());
    feedback
}

fn get_match_feedback(m: &Match, is_sole_match: bool) -> Feedback {
    match &m.pattern {
        Pattern::Dictionary(d) => dictionary_feedback(m, d, is_sole_match),
        Pattern::Spatial(s) => {
            let warning = if s.turns == 1 {
                "Straight rows of keys are easy to guess"
            } else {
                "Short keyboard patterns are easy to guess"
            };
            Feedback {
                warning: Some(warning.to_string()),
                suggestions: vec!["Use a longer keyboard pattern with more turns".to_string()],
            }
        }
        Pattern::Repeat(r) => {
            let warning = if r.base_token.chars().count() == 1 {
                "Repeats like \"aaa\" are easy to guess"
            } else {
                "Repeats like \"abcabcabc\" are only slightly harder to guess than \"abc\""
            };
            Feedback {
                warning: Some(warning.to_string()),
                suggestions: vec!["Avoid repeated words and characters".to_string()],
            }
        }
        Pattern::Sequence(_) => Feedback {
            warning: Some("Sequences like \"abc\" or \"6543\" are easy to guess".to_string()),
            suggestions: vec!["Avoid sequences".to_string()],
        },
        Pattern::Regex(r) if r.regex_name == "recent_year" => Feedback {
            warning: Some("Recent years are easy to guess".to_string()),
            suggestions: vec![
                "Avoid recent years".to_string(),
                "Avoid years that are associated with you".to_string(),
            ],
        },
        Pattern::Regex(_) => Feedback::default(),
        Pattern::Date(_) => Feedback {
            warning: Some("Dates are often easy to guess".to_string()),
            suggestions: vec!["Avoid dates and years that are associated with you".to_string()],
        },
        Pattern::Bruteforce => Feedback::default(),
    }
}

fn dictionary_feedback(m: &Match, d: &DictionaryMatch, is_sole_match: bool) -> Feedback {
    let word_is_capitalized = m.token.chars().next().map_or(false, char::is_uppercase)
        && m.token.chars().skip(1).any(char::is_lowercase);

    let mut warning = match d.dictionary_name.as_str() {
        "passwords" => {
            if is_sole_match && !d.l33t && !d.reversed {
                if d.rank <= 10 {
                    Some("This is a top-10 common password".to_string())
                } else if d.rank <= 100 {
                    Some("This is a top-100 common password".to_string())
                } else {
                    Some("This is a very common password".to_string())
                }
            } else if d.rank <= 1e6 as usize / 10 {
                Some("This is similar to a commonly used password".to_string())
            } else {
                None
            }
        }
        "english" => {
            if is_sole_match {
                Some("A word by itself is easy to guess".to_string())
            } else {
                None
            }
        }
        "surnames" | "male_names" | "female_names" => {
            if is_sole_match {
                Some("Names and surnames by themselves are easy to guess".to_string())
            } else {
                Some("Common names and surnames are easy to guess".to_string())
            }
        }
        "user_inputs" => Some("This is similar to information you've already provided".to_string()),
        _ => None,
    };

    if d.reversed && m.token.chars().count() >= 4 {
        warning = warning.or(Some("This is similar to a commonly used password".to_string()));
    }

    let mut suggestions = Vec::new();
    if word_is_capitalized {
        suggestions.push("Capitalization doesn't help very much".to_string());
    }
    if d.reversed && m.token.chars().count() >= 4 {
        suggestions.push("Reversed words aren't much harder to guess".to_string());
    }
    if d.l33t {
        suggestions.push("Predictable substitutions like '@' instead of 'a' don't help very much".to_string());
    }

    Feedback { warning, suggestions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Dictionaries, Pattern};
    use crate::scoring;

    fn analyze(password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let dicts = Dictionaries::new(&[]);
        let matches = crate::matching::omnimatch(&chars, &dicts);
        scoring::most_guessable_match_sequence(&chars, matches).sequence
    }

    #[test]
    fn empty_sequence_gets_generic_suggestions() {
        let feedback = get_feedback(0, &[]);
        assert!(feedback.warning.is_none());
        assert!(!feedback.suggestions.is_empty());
    }

    #[test]
    fn strong_password_gets_no_feedback() {
        let sequence = analyze("correcthorsebatterystaple2016zzq");
        let feedback = get_feedback(4, &sequence);
        assert_eq!(feedback, Feedback::default());
    }

    #[test]
    fn top_password_gets_a_warning() {
        let sequence = analyze("password");
        let feedback = get_feedback(0, &sequence);
        assert!(feedback.warning.is_some());
    }

    #[test]
    fn keyboard_pattern_suggests_more_turns() {
        let sequence = analyze("qwertyuiop");
        let feedback = get_feedback(0, &sequence);
        assert!(sequence.iter().any(|m| matches!(m.pattern, Pattern::Spatial(_))));
        assert!(feedback.suggestions.iter().any(|s| s.contains("turns")));
    }
}
