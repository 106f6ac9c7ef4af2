/// Address handling.
///
/// Supports P2PKH address parsing and generation from public key hashes,
/// with mainnet/testnet discrimination. Uses Base58Check encoding with
/// double-SHA-256 checksums.

use std::fmt;

use txkit_primitives::hash::{hash160, sha256d};

use crate::ScriptError;

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Network type for address prefix selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// Mainnet (address prefix 0x00, starts with '1').
    Mainnet,
    /// Testnet (address prefix 0x6f, starts with 'm' or 'n').
    Testnet,
}

/// A P2PKH address.
///
/// Carries the 20-byte public key hash and the network it belongs to,
/// alongside the Base58Check string form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Decodes the string, validates the checksum, and detects the network
    /// from the version byte (0x00 = mainnet, 0x6f = testnet).
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address`, or an error naming what made the string invalid.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bs58::decode(addr)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != 25 {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        // Last 4 bytes must equal the sha256d of the first 21.
        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::ChecksumFailed);
        }

        let network = match decoded[0] {
            MAINNET_P2PKH => Network::Mainnet,
            TESTNET_P2PKH => Network::Testnet,
            _ => return Err(ScriptError::UnsupportedAddress(addr.to_string())),
        };

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    ///
    /// # Arguments
    /// * `hash` - The 20-byte hash160 of the public key.
    /// * `network` - The target network.
    ///
    /// # Returns
    /// A new `Address` with the encoded Base58Check string.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let version = match network {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        };

        let mut payload = Vec::with_capacity(25);
        payload.push(version);
        payload.extend_from_slice(hash);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        Address {
            address_string: bs58::encode(&payload).into_string(),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address from a hex-encoded public key string.
    ///
    /// Computes hash160 of the decoded public key bytes.
    ///
    /// # Arguments
    /// * `pub_key_hex` - Hex-encoded public key (compressed or uncompressed).
    /// * `network` - The target network.
    ///
    /// # Returns
    /// An `Address`, or `InvalidHex` if the string is not valid hex.
    pub fn from_public_key_string(pub_key_hex: &str, network: Network) -> Result<Self, ScriptError> {
        let pub_key_bytes =
            hex::decode(pub_key_hex).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        let h = hash160(&pub_key_bytes);
        Ok(Self::from_public_key_hash(&h, network))
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
