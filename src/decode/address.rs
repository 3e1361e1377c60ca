//! Stake credential extraction from bech32 addresses.

use crate::error::{Error, Result};
use cml_chain::address::Address;
use cml_chain::certs::Credential;
use cml_crypto::RawBytesEncoding;

/// Credential type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialType {
    KeyHash,
    ScriptHash,
}

impl CredentialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::KeyHash => "keyhash",
            CredentialType::ScriptHash => "scripthash",
        }
    }
}

/// Raw credential carried by an address, header byte stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCredential {
    /// Known only for reward addresses.
    pub cred_type: Option<CredentialType>,
    /// Hex of the address bytes after the header.
    pub hash: String,
}

/// Decode a bech32 reward address to the credential it withdraws from.
///
/// Reward addresses are a header byte followed by the 28-byte stake
/// credential, so the result is the credential hash the node prints in
/// `transaction view`. Other Shelley addresses decode to everything after
/// their header byte.
pub fn decode_reward_credential(addr_str: &str) -> Result<DecodedCredential> {
    let addr = Address::from_bech32(addr_str).map_err(|e| Error::InvalidAddress {
        address: addr_str.to_string(),
        reason: e.to_string(),
    })?;

    match addr {
        Address::Reward(reward_addr) => Ok(decode_credential(&reward_addr.payment)),
        Address::Byron(_) => Err(Error::InvalidAddress {
            address: addr_str.to_string(),
            reason: "Byron addresses carry no stake credential".to_string(),
        }),
        other => {
            let raw_bytes = other.to_raw_bytes();
            Ok(DecodedCredential {
                cred_type: None,
                hash: hex::encode(raw_bytes.get(1..).unwrap_or_default()),
            })
        }
    }
}

fn decode_credential(cred: &Credential) -> DecodedCredential {
    match cred {
        Credential::PubKey { hash, .. } => DecodedCredential {
            cred_type: Some(CredentialType::KeyHash),
            hash: hex::encode(hash.to_raw_bytes()),
        },
        Credential::Script { hash, .. } => DecodedCredential {
            cred_type: Some(CredentialType::ScriptHash),
            hash: hex::encode(hash.to_raw_bytes()),
        },
    }
}
