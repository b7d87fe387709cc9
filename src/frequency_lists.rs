//! Ranked frequency dictionaries used by the dictionary matcher.
//!
//! Each list is ordered most-common first; rank is assigned by position
//! (starting at 1). These are representative word lists, not the full
//! production corpora that ship with the real tool -- loading a large
//! corpus from disk is a packaging concern, not a matching one.

use std::collections::HashMap;

pub type RankedDictionary = HashMap<String, usize>;

fn build_ranked(words: &[&str]) -> RankedDictionary {
    words
        .iter()
        .enumerate()
        .map(|(idx, w)| (w.to_lowercase(), idx + 1))
        .collect()
}

const PASSWORDS: &[&str] = &[
    "password", "123456", "12345678", "qwerty", "123456789", "12345", "1234",
    "111111", "1234567", "dragon", "123123", "baseball", "abc123", "football",
    "monkey", "letmein", "shadow", "master", "666666", "qwertyuiop",
    "123321", "mustang", "1234567890", "michael", "654321", "superman",
    "1qaz2wsx", "7777777", "121212", "000000", "qazwsx", "123qwe", "killer",
    "trustno1", "jordan", "jennifer", "zxcvbnm", "asdfgh", "hunter",
    "buster", "soccer", "harley", "batman", "andrew", "tigger", "sunshine",
    "iloveyou", "fuckyou", "2000", "charlie", "robert", "thomas", "hockey",
    "ranger", "daniel", "starwars", "klaster", "112233", "george", "asshole",
];

const ENGLISH: &[&str] = &[
    "the", "of", "and", "to", "in", "a", "is", "that", "for", "it", "as",
    "was", "with", "be", "by", "on", "not", "he", "I", "this", "are", "or",
    "his", "from", "at", "which", "but", "have", "an", "had", "they", "you",
    "were", "their", "one", "all", "we", "can", "her", "there", "if", "will",
    "up", "other", "about", "out", "many", "then", "them", "these", "so",
    "some", "would", "into", "word", "dog", "cat", "house", "river", "tree",
    "mountain", "ocean", "music", "garden", "winter", "summer", "coffee",
    "purple", "dragon", "castle", "forest", "pencil", "window", "bridge",
];

const SURNAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller",
    "davis", "rodriguez", "martinez", "hernandez", "lopez", "gonzalez",
    "wilson", "anderson", "thomas", "taylor", "moore", "jackson", "martin",
    "lee", "perez", "thompson", "white", "harris", "sanchez", "clark",
    "ramirez", "lewis", "robinson", "walker", "young", "allen", "king",
    "wright", "scott", "torres", "nguyen", "hill", "flores",
];

const MALE_NAMES: &[&str] = &[
    "james", "robert", "john", "michael", "david", "william", "richard",
    "joseph", "thomas", "charles", "christopher", "daniel", "matthew",
    "anthony", "donald", "mark", "paul", "steven", "andrew", "kenneth",
    "joshua", "kevin", "brian", "george", "edward", "ronald", "timothy",
    "jason", "jeffrey", "ryan",
];

const FEMALE_NAMES: &[&str] = &[
    "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara",
    "susan", "jessica", "sarah", "karen", "nancy", "lisa", "margaret",
    "betty", "sandra", "ashley", "dorothy", "kimberly", "emily", "donna",
    "michelle", "carol", "amanda", "melissa", "deborah", "stephanie",
    "rebecca", "laura", "helen", "sharon",
];

lazy_static! {
    pub static ref PASSWORDS_DICT: RankedDictionary = build_ranked(PASSWORDS);
    pub static ref ENGLISH_DICT: RankedDictionary = build_ranked(ENGLISH);
    pub static ref SURNAMES_DICT: RankedDictionary = build_ranked(SURNAMES);
    pub static ref MALE_NAMES_DICT: RankedDictionary = build_ranked(MALE_NAMES);
    pub static ref FEMALE_NAMES_DICT: RankedDictionary = build_ranked(FEMALE_NAMES);

    pub static ref DICTIONARIES: HashMap<&'static str, &'static RankedDictionary> = {
        let mut m = HashMap::new();
        m.insert("passwords", &*PASSWORDS_DICT);
        m.insert("english", &*ENGLISH_DICT);
        m.insert("surnames", &*SURNAMES_DICT);
        m.insert("male_names", &*MALE_NAMES_DICT);
        m.insert("female_names", &*FEMALE_NAMES_DICT);
        m
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_rank_one() {
        assert_eq!(PASSWORDS_DICT.get("password"), Some(&1));
    }

    #[test]
    fn ranks_start_at_one() {
        for dict in DICTIONARIES.values() {
            assert!(dict.values().all(|&rank| rank >= 1));
        }
    }
}
