//! Spatial (keyboard-adjacency walk) matcher.

use super::{Match, Pattern, SpatialMatch};
use crate::adjacency_graphs::GRAPHS;

pub fn spatial_match(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    for (&graph_name, graph) in GRAPHS.iter() {
        let n = password.len();
        if n < 3 {
            continue;
        }
        let mut i = 0;
        while i < n.saturating_sub(1) {
            let mut j = i + 1;
            let mut last_direction: Option<usize> = None;
            let mut turns = 0usize;
            let mut shifted_count = 0usize;
            loop {
                let prev_char = password[j - 1];
                let mut found = false;
                let mut found_direction = None;
                if j < n {
                    let cur_char = password[j];
                    if let Some(slots) = graph.get(&prev_char) {
                        for (dir, slot) in slots.iter().enumerate() {
                            if let Some((unshifted, shifted)) = slot {
                                if *unshifted == cur_char || *shifted == cur_char {
                                    found = true;
                                    found_direction = Some(dir);
                                    if *shifted == cur_char && *unshifted != *shifted {
                                        shifted_count += 1;
                                    }
                                    break;
                                }
                            }
                        }
                    }
                }
                if found {
                    if last_direction != found_direction {
                        turns += 1;
                        last_direction = found_direction;
                    }
                    j += 1;
                } else {
                    if j - i > 2 {
                        let token: String = password[i..j].iter().collect();
                        matches.push(Match::new(
                            i,
                            j - 1,
                            token,
                            Pattern::Spatial(SpatialMatch {
                                graph: graph_name.to_string(),
                                turns,
                                shifted_count,
                            }),
                        ));
                    }
                    i = j;
                    break;
                }
            }
        }
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
    fn qwerty_top_row_run_has_one_turn() {
        let password = chars("qwerty");
        let matches = spatial_match(&password);
        let m = matches
            .iter()
            .find(|m| matches!(&m.pattern, Pattern::Spatial(s) if s.graph == "qwerty"))
            .expect("expected a qwerty spatial match");
        if let Pattern::Spatial(s) = &m.pattern {
            assert_eq!(s.turns, 1);
            assert_eq!(s.shifted_count, 0);
        }
        assert_eq!(m.i, 0);
        assert_eq!(m.j, password.len() - 1);
    }

    #[test]
    fn short_runs_are_not_emitted() {
        let password = chars("qw");
        assert!(spatial_match(&password).is_empty());
    }
}
