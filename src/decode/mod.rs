//! Decoding of node CLI output and bech32 addresses.

mod address;
mod view;

pub use address::{CredentialType, DecodedCredential, decode_reward_credential};
pub use view::{DecodedView, ViewCertificate, ViewTxOut, keys};
