//! Display reference codes handed back to applicants, e.g. `CC-7KQ2M9XH`.
//!
//! The code is a label for the applicant to quote, not an identifier: it is
//! random, not checked for collisions, and not stored. The database primary
//! key is the only identity of a submission.

use rand::Rng;

/// Prefix of every reference code.
pub const REFERENCE_PREFIX: &str = "CC-";

/// Number of random characters after the prefix.
pub const REFERENCE_CODE_LENGTH: usize = 8;

/// Upper-case letters and digits without `0`, `O`, `1` and `I`.
pub const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a reference code using the thread-local RNG.
pub fn generate_reference_id() -> String {
    generate_reference_id_with(&mut rand::rng())
}

/// Generate a reference code from the given RNG.
pub fn generate_reference_id_with<R: Rng>(rng: &mut R) -> String {
    let mut code = String::with_capacity(REFERENCE_PREFIX.len() + REFERENCE_CODE_LENGTH);
    code.push_str(REFERENCE_PREFIX);
    for _ in 0..REFERENCE_CODE_LENGTH {
        let idx = rng.random_range(0..REFERENCE_ALPHABET.len());
        code.push(char::from(REFERENCE_ALPHABET[idx]));
    }
    code
}

/// Whether `s` has the shape of a reference code.
pub fn is_reference_id(s: &str) -> bool {
    let Some(code) = s.strip_prefix(REFERENCE_PREFIX) else {
        return false;
    };
    code.len() == REFERENCE_CODE_LENGTH && code.bytes().all(|b| REFERENCE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_codes_have_reference_shape() {
        for _ in 0..200 {
            let code = generate_reference_id();
            assert!(is_reference_id(&code), "{code}");
            assert_eq!(code.len(), 11);
        }
    }

    #[test]
    fn alphabet_excludes_confusable_characters() {
        for confusable in [b'0', b'O', b'1', b'I'] {
            assert!(!REFERENCE_ALPHABET.contains(&confusable));
        }
        assert_eq!(REFERENCE_ALPHABET.len(), 32);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = generate_reference_id_with(&mut StdRng::seed_from_u64(7));
        let b = generate_reference_id_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shape_check_rejects_near_misses() {
        assert!(is_reference_id("CC-ABCDEFGH"));
        assert!(!is_reference_id("CC-ABCDEFG"));
        assert!(!is_reference_id("CC-ABCDEFGHJ"));
        assert!(!is_reference_id("cc-ABCDEFGH"));
        assert!(!is_reference_id("CC-ABCDEF0H"));
        assert!(!is_reference_id("CC-abcdefgh"));
        assert!(!is_reference_id("ABCDEFGH"));
    }
}
