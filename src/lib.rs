//! Async client for the Kuro game community ("lab"), game record
//! ("chronicle") and gacha record ("wish") APIs.
//!
//! ```no_run
//! use kuronet::{ClientConfig, McClient, Region};
//!
//! # async fn run() -> kuronet::Result<()> {
//! let config = ClientConfig::new()
//!     .with_region(Region::Chinese)
//!     .with_cookie_string("user_token=...; account_id=10000001")
//!     .with_player_id(100000001);
//! let client = McClient::open(config).await?;
//! let notes = client.chronicle().get_mc_notes(None, None, true).await?;
//! println!("{} / {}", notes.current_stamina, notes.max_stamina);
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod components;
pub mod config;
pub mod cookies;
pub mod crypto;
pub mod enums;
pub mod envelope;
pub mod error;
pub mod http;
pub mod mc;
pub mod models;
pub mod player;
pub mod routes;
pub mod session;

pub use components::{BbsOptions, ChronicleClient, LabClient, WishClient};
pub use config::ClientConfig;
pub use cookies::{Cookie, CookieJar};
pub use enums::{Game, Region};
pub use error::{ApiError, ApiErrorKind, KuroError, Result};
pub use mc::McClient;
pub use session::{Session, SessionState};
