#![allow(dead_code)]

pub mod mock_kuro;

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use base64::{engine::general_purpose::STANDARD, Engine};
use kuronet::{ClientConfig, Region};
use tracing_subscriber::EnvFilter;

pub const CN_PLAYER: u64 = 100000001;
/// Chinese player id the mock answers with an empty record for.
pub const CN_MISSING_PLAYER: u64 = 100000009;
/// Chinese player id whose sign-in claim triggers a captcha.
pub const CN_CAPTCHA_PLAYER: u64 = 100000002;
pub const OS_PLAYER: u64 = 512345678;
pub const USER_TOKEN: &str = "test-user-token";
pub const ACCOUNT_ID: i64 = 10000001;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kuronet=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Session config for a Chinese-region account pointed at `base_url`.
pub fn cn_config(base_url: &str) -> ClientConfig {
    ClientConfig::new()
        .with_region(Region::Chinese)
        .with_cookie_string(&format!("user_token={}; account_id={}", USER_TOKEN, ACCOUNT_ID))
        .with_player_id(CN_PLAYER)
        .with_lang("zh-Hans")
        .with_api_base(base_url)
        .with_timeout(2)
}

pub fn os_config(base_url: &str) -> ClientConfig {
    ClientConfig::new()
        .with_region(Region::Overseas)
        .with_player_id(OS_PLAYER)
        .with_api_base(base_url)
        .with_timeout(2)
}

/// Encrypt a payload the way the game record service does.
pub fn encrypt_payload(value: &serde_json::Value) -> String {
    let key = STANDARD
        .decode("XSNLFgNCth8j8oJI3cNIdw==")
        .expect("valid key");
    let cipher = Aes128::new_from_slice(&key).expect("16 byte key");
    let mut data = serde_json::to_vec(value).expect("serialize payload");
    let pad = 16 - data.len() % 16;
    data.extend(std::iter::repeat(pad as u8).take(pad));
    for block in data.chunks_exact_mut(16) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    STANDARD.encode(data)
}
