//! Transaction envelopes: assembly of an ordered instruction list into a v0 message, and signing.
//!
//! The message is compiled without address lookup tables, so every account is a static key and
//! the first `num_required_signatures` static keys are exactly the required signers, fee payer
//! first.

use solana_instruction::Instruction;
use solana_sdk::{
    hash::Hash,
    message::{
        v0,
        VersionedMessage,
    },
    pubkey::Pubkey,
    signature::Signature,
    signer::Signer,
    transaction::VersionedTransaction,
};

use crate::error::{
    BootcampError,
    BootcampResult,
};

/// An assembled, not yet signed, transaction.
#[derive(Clone, Debug)]
pub struct UnsignedEnvelope {
    payer: Pubkey,
    instructions: Vec<Instruction>,
    message: VersionedMessage,
}

impl UnsignedEnvelope {
    /// Compiles `instructions` into a v0 message paid for by `payer`.
    ///
    /// Instruction order is preserved exactly; it's the on-chain execution order.
    pub fn assemble(
        payer: &Pubkey,
        instructions: &[Instruction],
        recent_blockhash: Hash,
    ) -> BootcampResult<Self> {
        if instructions.is_empty() {
            return Err(BootcampError::EmptyInstructions);
        }

        let message = v0::Message::try_compile(payer, instructions, &[], recent_blockhash)?;

        Ok(Self {
            payer: *payer,
            instructions: instructions.to_vec(),
            message: VersionedMessage::V0(message),
        })
    }

    pub fn payer(&self) -> &Pubkey {
        &self.payer
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn message(&self) -> &VersionedMessage {
        &self.message
    }

    pub fn recent_blockhash(&self) -> &Hash {
        self.message.recent_blockhash()
    }

    /// Every key that must sign, in signature-slot order. The fee payer is always first.
    pub fn required_signers(&self) -> &[Pubkey] {
        required_signers(&self.message)
    }

    /// Signs the serialized message with each of `signers`.
    ///
    /// Signers may be a subset of [`Self::required_signers`]; the slots of absent signers keep the
    /// default signature and the result reports them through
    /// [`SignedEnvelope::missing_signers`]. A signer that isn't required is an error.
    pub fn sign(self, signers: &[&dyn Signer]) -> BootcampResult<SignedEnvelope> {
        let required = self.required_signers();

        for signer in signers {
            let pubkey = signer.try_pubkey()?;
            if !required.contains(&pubkey) {
                return Err(BootcampError::UnexpectedSigner(pubkey));
            }
        }

        let message_bytes = self.message.serialize();
        let mut signatures = vec![Signature::default(); required.len()];
        for (slot, key) in signatures.iter_mut().zip(required) {
            if let Some(signer) = signers
                .iter()
                .find(|signer| signer.try_pubkey().is_ok_and(|pk| pk == *key))
            {
                *slot = signer.try_sign_message(&message_bytes)?;
            }
        }

        Ok(SignedEnvelope {
            instructions: self.instructions,
            transaction: VersionedTransaction {
                signatures,
                message: self.message,
            },
        })
    }
}

fn required_signers(message: &VersionedMessage) -> &[Pubkey] {
    let num_signers = message.header().num_required_signatures as usize;
    let keys = message.static_account_keys();
    &keys[..num_signers.min(keys.len())]
}

/// A transaction with a signature slot for every required signer, some possibly still empty.
#[derive(Clone, Debug)]
pub struct SignedEnvelope {
    instructions: Vec<Instruction>,
    transaction: VersionedTransaction,
}

impl SignedEnvelope {
    /// The submission identifier: the fee payer's signature.
    pub fn signature(&self) -> Signature {
        self.transaction.signatures[0]
    }

    pub fn payer(&self) -> &Pubkey {
        &self.required_signers()[0]
    }

    pub fn transaction(&self) -> &VersionedTransaction {
        &self.transaction
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn required_signers(&self) -> &[Pubkey] {
        required_signers(&self.transaction.message)
    }

    /// Required signers whose signature is absent or doesn't verify against the message.
    pub fn missing_signers(&self) -> Vec<Pubkey> {
        verify_signatures(&self.transaction)
    }

    pub fn is_complete(&self) -> bool {
        self.missing_signers().is_empty()
    }

    /// Fails with [`BootcampError::MissingSignatures`] unless every required signer has signed.
    pub fn verify(&self) -> BootcampResult<()> {
        let missing = self.missing_signers();
        match missing.is_empty() {
            true => Ok(()),
            false => Err(BootcampError::MissingSignatures(missing)),
        }
    }

    /// Drops the signature of `signer`, leaving its slot empty.
    pub fn without_signature_of(mut self, signer: &Pubkey) -> Self {
        if let Some(idx) = self.required_signers().iter().position(|key| key == signer) {
            self.transaction.signatures[idx] = Signature::default();
        }
        self
    }
}

/// Checks every signature slot of `transaction` against the serialized message, returning the
/// keys whose slot doesn't hold a valid signature.
pub fn verify_signatures(transaction: &VersionedTransaction) -> Vec<Pubkey> {
    let message_bytes = transaction.message.serialize();
    required_signers(&transaction.message)
        .iter()
        .enumerate()
        .filter(|(idx, key)| {
            !transaction
                .signatures
                .get(*idx)
                .is_some_and(|signature| signature.verify(key.as_ref(), &message_bytes))
        })
        .map(|(_, key)| *key)
        .collect()
}
