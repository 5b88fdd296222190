#![forbid(unsafe_code)]

//! String obfuscation applied to shader sources and archive entry names.
//!
//! This is a repeating-key XOR. It keeps names and shader text from being
//! readable with a hex viewer and nothing more.

use crate::pak::error::{PakError, PakResult};

pub trait Cipher {
    fn encipher(&self, plain: &[u8]) -> Vec<u8>;
    fn decipher(&self, enciphered: &[u8]) -> Vec<u8>;
}

#[derive(Debug, Clone)]
pub struct XorCipher {
    key: Vec<u8>,
}

impl XorCipher {
    pub fn new(key: &str) -> PakResult<Self> {
        if key.is_empty() {
            return Err(PakError::Config("encryption key must not be empty".into()));
        }
        Ok(Self {
            key: key.as_bytes().to_vec(),
        })
    }

    fn apply(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }
}

impl Cipher for XorCipher {
    fn encipher(&self, plain: &[u8]) -> Vec<u8> {
        self.apply(plain)
    }

    fn decipher(&self, enciphered: &[u8]) -> Vec<u8> {
        self.apply(enciphered)
    }
}
