//! Keyboard adjacency graphs used by the spatial matcher.
//!
//! Each graph maps a key character to a fixed-length list of neighbor
//! slots. A slot is `None` when that direction has no neighbor, or
//! `Some((unshifted, shifted))` giving the characters reached by pressing
//! that neighbor key with and without shift. Slot order is
//! `[left, right, up, down]`; the spatial matcher only cares that the same
//! physical direction keeps the same slot index as it walks the password,
//! not about the slot's compass meaning.

use std::collections::HashMap;

pub type NeighborSlots = Vec<Option<(char, char)>>;
pub type Graph = HashMap<char, NeighborSlots>;

const SLOTS: usize = 4;
const LEFT: usize = 0;
const RIGHT: usize = 1;
const UP: usize = 2;
const DOWN: usize = 3;

/// Builds a graph from rows of `(unshifted, shifted)` key pairs. Rows are
/// aligned by column index; a shorter row simply has no `UP`/`DOWN`
/// neighbor past its own length.
fn build_grid(rows: &[Vec<(char, char)>]) -> Graph {
    let mut graph: Graph = HashMap::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, &(unshifted, shifted)) in row.iter().enumerate() {
            let mut slots: NeighborSlots = vec![None; SLOTS];
            if c > 0 {
                slots[LEFT] = Some(row[c - 1]);
            }
            if c + 1 < row.len() {
                slots[RIGHT] = Some(row[c + 1]);
            }
            if r > 0 {
                if let Some(&up) = rows[r - 1].get(c) {
                    slots[UP] = Some(up);
                }
            }
            if r + 1 < rows.len() {
                if let Some(&down) = rows[r + 1].get(c) {
                    slots[DOWN] = Some(down);
                }
            }
            graph.insert(unshifted, slots);
        }
    }
    graph
}

fn pairs(unshifted: &str, shifted: &str) -> Vec<(char, char)> {
    unshifted.chars().zip(shifted.chars()).collect()
}

fn no_shift(unshifted: &str) -> Vec<(char, char)> {
    unshifted.chars().map(|c| (c, c)).collect()
}

lazy_static! {
    pub static ref QWERTY: Graph = build_grid(&[
        pairs("1234567890-=", "!@#$%^&*()_+"),
        pairs("qwertyuiop[]", "QWERTYUIOP{}"),
        pairs("asdfghjkl;'", "ASDFGHJKL:\""),
        pairs("zxcvbnm,./", "ZXCVBNM<>?"),
    ]);

    pub static ref DVORAK: Graph = build_grid(&[
        pairs("1234567890[]", "!@#$%^&*(){}"),
        pairs("',.pyfgcrl/=", "\"<>PYFGCRL?+"),
        pairs("aoeuidhtns-", "AOEUIDHTNS_"),
        pairs(";qjkxbmwvz", ":QJKXBMWVZ"),
    ]);

    pub static ref KEYPAD: Graph = build_grid(&[
        no_shift("789"),
        no_shift("456"),
        no_shift("123"),
        no_shift("0."),
    ]);

    pub static ref MAC_KEYPAD: Graph = build_grid(&[
        no_shift("=/*"),
        no_shift("789"),
        no_shift("456"),
        no_shift("123"),
        no_shift("0."),
    ]);

    pub static ref GRAPHS: HashMap<&'static str, &'static Graph> = {
        let mut m = HashMap::new();
        m.insert("qwerty", &*QWERTY);
        m.insert("dvorak", &*DVORAK);
        m.insert("keypad", &*KEYPAD);
        m.insert("mac_keypad", &*MAC_KEYPAD);
        m
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qwerty_has_adjacent_top_row() {
        let slots = &QWERTY[&'q'];
        assert!(slots.iter().flatten().any(|&(u, _)| u == 'w'));
    }

    #[test]
    fn every_graph_entry_has_fixed_slot_count() {
        for graph in GRAPHS.values() {
            for slots in graph.values() {
                assert_eq!(slots.len(), SLOTS);
            }
        }
    }
}
