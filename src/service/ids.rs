//! Record identifier minting.

use rand::RngCore;
use uuid::Builder;

/// Supplies the random bytes record ids are built from.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Thread-local CSPRNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::thread_rng().fill_bytes(dest);
    }
}

/// Mint a 128-bit random id, rendered as a hyphenated version 4 UUID.
pub fn mint_id(random: &dyn RandomSource) -> String {
    let mut bytes = [0u8; 16];
    random.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::{Uuid, Version};

    struct FixedBytes(u8);

    impl RandomSource for FixedBytes {
        fn fill_bytes(&self, dest: &mut [u8]) {
            dest.fill(self.0);
        }
    }

    #[test]
    fn test_minted_id_is_uuid_v4() {
        let id = mint_id(&ThreadRandom);
        let parsed = Uuid::parse_str(&id).unwrap();

        assert_eq!(parsed.get_version(), Some(Version::Random));
        assert_eq!(id.len(), 36);
        assert_eq!(id, parsed.hyphenated().to_string());
    }

    #[test]
    fn test_mint_id_is_deterministic_for_source() {
        assert_eq!(mint_id(&FixedBytes(7)), mint_id(&FixedBytes(7)));
        assert_ne!(mint_id(&FixedBytes(7)), mint_id(&FixedBytes(8)));
    }

    #[test]
    fn test_thread_random_ids_differ() {
        assert_ne!(mint_id(&ThreadRandom), mint_id(&ThreadRandom));
    }
}
