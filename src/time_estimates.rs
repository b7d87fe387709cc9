//! Attack-time projection and score derivation: turns a raw guess count
//! into crack-time estimates under four attacker models, plus the coarse
//! 0-4 score shown to the user.

use std::fmt;

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackTimesSeconds {
    pub online_throttling_100_per_hour: f64,
    pub online_no_throttling_10_per_second: f64,
    pub offline_slow_hashing_1e4_per_second: f64,
    pub offline_fast_hashing_1e10_per_second: f64,
}

#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CrackTimesDisplay {
    pub online_throttling_100_per_hour: String,
    pub online_no_throttling_10_per_second: String,
    pub offline_slow_hashing_1e4_per_second: String,
    pub offline_fast_hashing_1e10_per_second: String,
}

pub struct AttackTimes {
    pub crack_times_seconds: CrackTimesSeconds,
    pub crack_times_display: CrackTimesDisplay,
    pub score: u8,
}

/// Derives the four crack-time scenarios and the coarse score from a
/// guess count.
pub fn estimate_attack_times(guesses: f64) -> AttackTimes {
    let seconds = CrackTimesSeconds {
        online_throttling_100_per_hour: guesses / (100.0 / 3600.0),
        online_no_throttling_10_per_second: guesses / 10.0,
        offline_slow_hashing_1e4_per_second: guesses / 1.0e4,
        offline_fast_hashing_1e10_per_second: guesses / 1.0e10,
    };
    let display = CrackTimesDisplay {
        online_throttling_100_per_hour: display_time(seconds.online_throttling_100_per_hour),
        online_no_throttling_10_per_second: display_time(seconds.online_no_throttling_10_per_second),
        offline_slow_hashing_1e4_per_second: display_time(seconds.offline_slow_hashing_1e4_per_second),
        offline_fast_hashing_1e10_per_second: display_time(seconds.offline_fast_hashing_1e10_per_second),
    };
    AttackTimes {
        crack_times_seconds: seconds,
        crack_times_display: display,
        score: guesses_to_score(guesses),
    }
}

pub fn guesses_to_score(guesses: f64) -> u8 {
    const DELTA: f64 = 5.0;
    if guesses < 1e3 + DELTA {
        0
    } else if guesses < 1e6 + DELTA {
        1
    } else if guesses < 1e8 + DELTA {
        2
    } else if guesses < 1e10 + DELTA {
        3
    } else {
        4
    }
}

fn display_time(seconds: f64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;
    const MONTH: f64 = DAY * 31.0;
    const YEAR: f64 = MONTH * 12.0;
    const CENTURY: f64 = YEAR * 100.0;

    if seconds < 1.0 {
        "less than a second".to_string()
    } else if seconds < MINUTE {
        pluralize(seconds.round() as i64, "second")
    } else if seconds < HOUR {
        pluralize((seconds / MINUTE).round() as i64, "minute")
    } else if seconds < DAY {
        pluralize((seconds / HOUR).round() as i64, "hour")
    } else if seconds < MONTH {
        pluralize((seconds / DAY).round() as i64, "day")
    } else if seconds < YEAR {
        pluralize((seconds / MONTH).round() as i64, "month")
    } else if seconds < CENTURY {
        pluralize((seconds / YEAR).round() as i64, "year")
    } else {
        "centuries".to_string()
    }
}

fn pluralize(base: i64, unit: &str) -> String {
    if base == 1 {
        format!("{} {}", base, unit)
    } else {
        format!("{} {}s", base, unit)
    }
}

impl fmt::Display for CrackTimesDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "online (throttled): {}, online (unthrottled): {}, offline (slow hash): {}, offline (fast hash): {}",
            self.online_throttling_100_per_hour,
            self.online_no_throttling_10_per_second,
            self.offline_slow_hashing_1e4_per_second,
            self.offline_fast_hashing_1e10_per_second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_second_guesses_render_as_sentinel() {
        assert_eq!(display_time(0.5), "less than a second");
    }

    #[test]
    fn pluralizes_correctly() {
        assert_eq!(display_time(1.0), "1 second");
        assert_eq!(display_time(2.0), "2 seconds");
        assert_eq!(display_time(60.0), "1 minute");
    }

    #[test]
    fn above_a_century_renders_as_centuries() {
        assert_eq!(display_time(60.0 * 60.0 * 24.0 * 31.0 * 12.0 * 200.0), "centuries");
    }

    #[test]
    fn score_thresholds() {
        assert_eq!(guesses_to_score(10.0), 0);
        assert_eq!(guesses_to_score(1e4), 1);
        assert_eq!(guesses_to_score(1e7), 2);
        assert_eq!(guesses_to_score(1e9), 3);
        assert_eq!(guesses_to_score(1e11), 4);
    }
}
