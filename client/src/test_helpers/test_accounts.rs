//! Deterministic keypairs for tests and local dry runs, derived from fixed secret key bytes.

macro_rules! seeded_keypair_fn {
    ($fn_name:ident, $seed:literal) => {
        #[inline]
        pub fn $fn_name() -> &'static ::solana_keypair::Keypair {
            static KP: ::std::sync::LazyLock<::solana_keypair::Keypair> =
                ::std::sync::LazyLock::new(|| ::solana_keypair::Keypair::new_from_array([$seed; 32]));

            ::std::sync::LazyLock::force(&KP)
        }
    };
}

#[rustfmt::skip]
mod unformatted {
    seeded_keypair_fn!(payer,            0x01);
    seeded_keypair_fn!(receiver,         0x02);
    seeded_keypair_fn!(second_signer,    0x03);
    seeded_keypair_fn!(fungible_mint,    0x04);
    seeded_keypair_fn!(nft_mint,         0x05);
    seeded_keypair_fn!(stranger,         0x06);
}

pub use unformatted::*;
