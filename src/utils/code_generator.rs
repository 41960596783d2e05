//! Random short code generation.

use rand::seq::IndexedRandom;

/// Generates a random code of `length` characters drawn uniformly, with
/// replacement, from `alphabet`.
///
/// Provides no uniqueness guarantee; the store's primary key is the sole
/// arbiter of uniqueness. `rand::rng()` is cryptographically secure, so codes
/// are not enumerable from earlier outputs.
///
/// # Panics
///
/// Panics if `alphabet` is empty. Alphabets come from
/// [`crate::domain::InsertContext`], which rejects empty alphabets at startup.
pub fn generate_code(alphabet: &[char], length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            *alphabet
                .choose(&mut rng)
                .expect("generation alphabet must not be empty")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALPHABET: &[char] = &['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

    #[test]
    fn test_generated_length() {
        for length in [1, 5, 32] {
            assert_eq!(generate_code(ALPHABET, length).len(), length);
        }
    }

    #[test]
    fn test_generated_characters_stay_in_alphabet() {
        let allowed: HashSet<char> = ALPHABET.iter().copied().collect();

        for _ in 0..100 {
            let code = generate_code(ALPHABET, 16);
            assert!(code.chars().all(|c| allowed.contains(&c)));
        }
    }

    #[test]
    fn test_single_character_alphabet_is_deterministic() {
        assert_eq!(generate_code(&['z'], 4), "zzzz");
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: HashSet<String> = (0..50).map(|_| generate_code(ALPHABET, 16)).collect();

        // 8^16 possibilities; 50 draws colliding would indicate a broken RNG.
        assert_eq!(codes.len(), 50);
    }

    #[test]
    fn test_zero_length_yields_empty_code() {
        assert_eq!(generate_code(ALPHABET, 0), "");
    }
}
