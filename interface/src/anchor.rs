//! Anchor framework encodings.
//!
//! Anchor programs prefix instruction data with the first 8 bytes of
//! `sha256("global:<instruction_name>")` and account data with the first 8 bytes of
//! `sha256("account:<AccountName>")`. Arguments follow the discriminator, borsh-encoded.

use borsh::BorshSerialize;
use sha2::{
    Digest,
    Sha256,
};

pub const DISCRIMINATOR_LEN: usize = 8;

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

fn hashed_discriminator(namespace: &str, name: &str) -> Discriminator {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    discriminator
}

/// The discriminator for the snake-cased instruction handler `name`.
pub fn instruction_discriminator(name: &str) -> Discriminator {
    hashed_discriminator("global", name)
}

/// The discriminator for the account struct `name`, e.g. `StakeInfo`.
pub fn account_discriminator(name: &str) -> Discriminator {
    hashed_discriminator("account", name)
}

/// Encodes instruction data as the discriminator for `name` followed by the borsh encoding of
/// `args`.
pub fn instruction_data<T: BorshSerialize>(name: &str, args: &T) -> Vec<u8> {
    let mut data = instruction_discriminator(name).to_vec();
    // Writing into a `Vec` can't fail.
    args.serialize(&mut data)
        .expect("Serializing into a Vec is infallible");
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_instruction_discriminators() {
        // `sha256("global:initialize")[..8]`, the discriminator every Anchor starter emits.
        assert_eq!(
            instruction_discriminator("initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
    }

    #[test]
    fn data_is_discriminator_then_args() {
        let data = instruction_data("stake", &42u64);
        assert_eq!(data.len(), DISCRIMINATOR_LEN + 8);
        assert_eq!(&data[..DISCRIMINATOR_LEN], &instruction_discriminator("stake"));
        assert_eq!(&data[DISCRIMINATOR_LEN..], &42u64.to_le_bytes());
    }

    #[test]
    fn namespaces_differ() {
        assert_ne!(
            instruction_discriminator("StakeInfo"),
            account_discriminator("StakeInfo")
        );
    }
}
