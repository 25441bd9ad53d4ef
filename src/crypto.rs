//! Decoder for the encrypted `data` field some game record endpoints return.
//!
//! The key and mode are fixed by the upstream service (AES-128, ECB, PKCS#7).
//! This is wire compatibility only, not a general purpose cipher.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, KeyInit};
use aes::Aes128;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{KuroError, Result};

const KEY_BASE64: &str = "XSNLFgNCth8j8oJI3cNIdw==";
const BLOCK_SIZE: usize = 16;

/// Base64 -> AES-128-ECB decrypt -> PKCS#7 unpad -> UTF-8.
pub fn decrypt(value: &str) -> Result<String> {
    let key = BASE64
        .decode(KEY_BASE64)
        .map_err(|e| KuroError::Decrypt(e.to_string()))?;
    let mut data = BASE64
        .decode(value.trim())
        .map_err(|e| KuroError::Decrypt(e.to_string()))?;

    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(KuroError::Decrypt(format!(
            "ciphertext length {} is not a multiple of {}",
            data.len(),
            BLOCK_SIZE
        )));
    }

    let cipher =
        Aes128::new_from_slice(&key).map_err(|e| KuroError::Decrypt(e.to_string()))?;
    for block in data.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }

    let len = unpad(&data)?;
    data.truncate(len);
    String::from_utf8(data).map_err(|e| KuroError::Decrypt(e.to_string()))
}

/// Length of `data` without its PKCS#7 padding.
fn unpad(data: &[u8]) -> Result<usize> {
    let pad = *data.last().ok_or_else(|| KuroError::Decrypt("empty plaintext".into()))? as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return Err(KuroError::Decrypt("invalid padding".into()));
    }
    if !data[data.len() - pad..].iter().all(|b| *b as usize == pad) {
        return Err(KuroError::Decrypt("invalid padding".into()));
    }
    Ok(data.len() - pad)
}

#[cfg(test)]
pub(crate) fn encrypt(plain: &str) -> String {
    use aes::cipher::BlockEncrypt;

    let key = BASE64.decode(KEY_BASE64).unwrap();
    let cipher = Aes128::new_from_slice(&key).unwrap();
    let mut data = plain.as_bytes().to_vec();
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    data.extend(std::iter::repeat(pad as u8).take(pad));
    for block in data.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    BASE64.encode(data)
}
