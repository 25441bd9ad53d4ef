use crate::components::{ChronicleClient, LabClient, WishClient};
use crate::config::ClientConfig;
use crate::enums::Game;
use crate::error::Result;
use crate::session::Session;

/// Client for the one supported game. Owns its [`Session`] and hands out the
/// domain capabilities over it.
pub struct McClient {
    session: Session,
}

impl McClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?.with_game(Game::Mc),
        })
    }

    /// Build and initialize; the session is closed again if that fails.
    pub async fn open(config: ClientConfig) -> Result<Self> {
        let client = Self::new(config)?;
        if let Err(e) = client.session.initialize().await {
            client.session.close().await;
            return Err(e);
        }
        Ok(client)
    }

    pub fn game(&self) -> Game {
        Game::Mc
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn lab(&self) -> LabClient<'_> {
        LabClient::new(&self.session)
    }

    pub fn chronicle(&self) -> ChronicleClient<'_> {
        ChronicleClient::new(&self.session)
    }

    pub fn wish(&self) -> WishClient<'_> {
        WishClient::new(&self.session)
    }

    pub async fn close(&self) {
        self.session.close().await;
    }
}
