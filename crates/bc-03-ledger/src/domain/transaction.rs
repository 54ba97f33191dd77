//! # Legacy EIP-155 Transactions
//!
//! Signing key handling and RLP encoding for contract calls sent with
//! `eth_sendRawTransaction`.

use std::fmt;

use k256::ecdsa::{SigningKey, VerifyingKey};
use primitive_types::U256;
use rlp::RlpStream;
use sha3::{Digest, Keccak256};

use super::entities::{Address, TxHash};
use super::errors::{ConfigError, LedgerError};

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Derive the account address of a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let point = public_key.to_encoded_point(false);
    // Hash without the 0x04 prefix, keep the last 20 bytes.
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}

/// secp256k1 key used to sign registry transactions.
#[derive(Clone)]
pub struct LedgerSigner {
    key: SigningKey,
    address: Address,
}

impl LedgerSigner {
    /// Parse a 64 hex character private key, with or without `0x`.
    pub fn from_hex(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != 64 {
            return Err(ConfigError::InvalidCredential(format!(
                "expected 64 hex characters, got {}",
                digits.len()
            )));
        }
        let bytes = hex::decode(digits)
            .map_err(|_| ConfigError::InvalidCredential("not hex".to_string()))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| ConfigError::InvalidCredential("not a valid secp256k1 scalar".to_string()))?;
        let address = address_from_pubkey(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Account address of this key.
    pub fn address(&self) -> Address {
        self.address
    }

    fn sign_prehash(&self, hash: &[u8; 32]) -> Result<(u8, U256, U256), LedgerError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash)
            .map_err(|e| LedgerError::Rejected(format!("signing failed: {}", e)))?;
        let bytes = signature.to_bytes();
        let r = U256::from_big_endian(&bytes[..32]);
        let s = U256::from_big_endian(&bytes[32..]);
        Ok((recovery_id.to_byte(), r, s))
    }
}

impl fmt::Debug for LedgerSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Unsigned legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

impl LegacyTransaction {
    fn append_body(&self, stream: &mut RlpStream) {
        stream.append(&self.nonce);
        stream.append(&self.gas_price);
        stream.append(&self.gas_limit);
        stream.append(&self.to.as_bytes().to_vec());
        stream.append(&self.value);
        stream.append(&self.data);
    }

    /// EIP-155 signing hash: `keccak(rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0]))`.
    pub fn signing_hash(&self) -> [u8; 32] {
        let mut stream = RlpStream::new_list(9);
        self.append_body(&mut stream);
        stream.append(&self.chain_id);
        stream.append_empty_data();
        stream.append_empty_data();
        keccak256(&stream.out())
    }

    /// Sign and return the raw transaction bytes with their hash.
    pub fn sign(&self, signer: &LedgerSigner) -> Result<(Vec<u8>, TxHash), LedgerError> {
        let (recovery_id, r, s) = signer.sign_prehash(&self.signing_hash())?;
        let v = self
            .chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(35 + u64::from(recovery_id)))
            .ok_or_else(|| LedgerError::Rejected("chain id out of range".to_string()))?;

        let mut stream = RlpStream::new_list(9);
        self.append_body(&mut stream);
        stream.append(&v);
        stream.append(&r);
        stream.append(&s);
        let raw = stream.out().to_vec();
        let hash = TxHash(keccak256(&raw));
        Ok((raw, hash))
    }
}
