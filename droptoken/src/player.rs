use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::errors::Error;

/// A registered player: a caller-supplied external id, a display name,
/// and the single-character token their pieces are marked with.
///
/// Identity is the external id alone; the token is assigned once by the
/// registry and never changes for the player's lifetime.
#[derive(Clone, Debug, Serialize)]
pub struct Player {
    id: String,
    name: String,
    token: char,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        token: char,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        Ok(Self {
            id: id.into(),
            name,
            token,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> char {
        self.token
    }
}

// Equality and hashing go by external id only. The active flag, token
// and name never participate, so a Player can key maps and sets safely.
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
