//! Password strength estimation via pattern matching and minimum-guesses
//! sequencing, originally written in Javascript by Dropbox. See
//! [`zxcvbn`] for the main entry point.

#[macro_use]
extern crate lazy_static;

mod adjacency_graphs;
pub mod feedback;
mod frequency_lists;
pub mod matching;
pub mod scoring;
pub mod time_estimates;

use time::{Duration, Instant};

pub use feedback::Feedback;
pub use matching::{Match, Pattern};
pub use time_estimates::{CrackTimesDisplay, CrackTimesSeconds};

/// The full result of scoring a password.
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Entropy {
    pub guesses: f64,
    pub guesses_log10: f64,
    pub sequence: Vec<Match>,
    #[cfg_attr(feature = "ser", serde(skip))]
    pub calc_time: Duration,
    pub crack_times_seconds: CrackTimesSeconds,
    pub crack_times_display: CrackTimesDisplay,
    pub score: u8,
    pub feedback: Feedback,
}

/// Estimates the strength of `password`, tailoring the dictionary match
/// against `user_inputs` (site name, username, email, etc.) so that
/// values the user themselves supplied are penalized like any other
/// dictionary word.
pub fn zxcvbn(password: &str, user_inputs: &[&str]) -> Entropy {
    let start = Instant::now();
    let chars: Vec<char> = password.chars().collect();
    let dicts = matching::Dictionaries::new(user_inputs);
    let matches = matching::omnimatch(&chars, &dicts);
    let result = scoring::most_guessable_match_sequence(&chars, matches);
    let attack_times = time_estimates::estimate_attack_times(result.guesses);
    let feedback = feedback::get_feedback(attack_times.score, &result.sequence);
    let calc_time = start.elapsed();

    Entropy {
        guesses: result.guesses,
        guesses_log10: result.guesses_log10,
        sequence: result.sequence,
        calc_time,
        crack_times_seconds: attack_times.crack_times_seconds,
        crack_times_display: attack_times.crack_times_display,
        score: attack_times.score,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_has_zero_score() {
        let result = zxcvbn("", &[]);
        assert_eq!(result.guesses, 1.0);
        assert_eq!(result.score, 0);
        assert!(result.sequence.is_empty());
    }

    #[test]
    fn common_password_scores_low() {
        let result = zxcvbn("password", &[]);
        assert_eq!(result.score, 0);
        assert!(result.feedback.warning.is_some());
    }

    #[test]
    fn keyboard_run_scores_low() {
        let result = zxcvbn("qwerty", &[]);
        assert!(result.score <= 1);
    }

    #[test]
    fn single_char_repeat_scores_low() {
        let result = zxcvbn("aaaaaa", &[]);
        assert!(result.score <= 1);
    }

    #[test]
    fn ascending_sequence_scores_low() {
        let result = zxcvbn("abcdef", &[]);
        assert!(result.score <= 1);
    }

    #[test]
    fn date_with_separator_is_recognized() {
        let result = zxcvbn("11/15/1991", &[]);
        assert!(result
            .sequence
            .iter()
            .any(|m| matches!(m.pattern, Pattern::Date(_))));
    }

    #[test]
    fn leet_substitution_scores_higher_than_strong_random() {
        let leet = zxcvbn("p@ssw0rd", &[]);
        let strong = zxcvbn("xQj4!vTr8pLk", &[]);
        assert!(leet.guesses < strong.guesses);
    }

    #[test]
    fn user_inputs_are_penalized_like_dictionary_words() {
        let result = zxcvbn("correcthorsebatterystaplexqz", &["correcthorsebatterystaplexqz"]);
        assert!(result
            .sequence
            .iter()
            .any(|m| matches!(&m.pattern, Pattern::Dictionary(d) if d.dictionary_name == "user_inputs")));
    }

    #[test]
    fn longer_passwords_never_score_lower_than_shorter_prefixes() {
        let short = zxcvbn("correct", &[]);
        let long = zxcvbn("correcthorsebatterystaple", &[]);
        assert!(long.guesses >= short.guesses);
    }

    quickcheck::quickcheck! {
        fn never_panics_on_arbitrary_input(password: String, user_input: String) -> bool {
            let result = zxcvbn(&password, &[user_input.as_str()]);
            result.guesses >= 1.0 && result.score <= 4
        }
    }

    #[cfg(feature = "ser")]
    #[test]
    fn result_round_trips_through_json() {
        let result = zxcvbn("p@ssw0rd2016", &["jane.doe"]);
        let json = serde_json::to_string(&result).expect("result should serialize");
        let parsed: Entropy = serde_json::from_str(&json).expect("result should deserialize");
        assert_eq!(parsed.guesses, result.guesses);
        assert_eq!(parsed.score, result.score);
        assert_eq!(parsed.sequence.len(), result.sequence.len());
    }
}
