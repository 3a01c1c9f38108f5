//! Cache of users that have signed in on this machine.
//!
//! Stored at: ~/.local/share/growpod/users.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::SocialUser;
use crate::config::GrowPodConfig;
use crate::error::{GrowPodError, GrowPodResult};

const USERS_FILE: &str = "users.json";

/// Basic profile of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUser {
    pub id: String,
    pub email: String,
}

impl From<&SocialUser> for CachedUser {
    fn from(user: &SocialUser) -> Self {
        CachedUser {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UserRepository { path: path.into() }
    }

    pub fn open_default() -> GrowPodResult<Self> {
        Ok(Self::new(GrowPodConfig::data_dir()?.join(USERS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a signed-in user, replacing any entry with the same provider id.
    /// The whole list is rewritten.
    pub fn add(&self, user: &SocialUser) -> GrowPodResult<()> {
        let mut users = self.get_all()?;
        users.retain(|u| u.id != user.id);
        users.push(CachedUser::from(user));
        self.save(&users)
    }

    /// All stored users; empty when nothing was stored yet.
    pub fn get_all(&self) -> GrowPodResult<Vec<CachedUser>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            GrowPodError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    pub fn save(&self, users: &[CachedUser]) -> GrowPodResult<()> {
        let contents = serde_json::to_string_pretty(users)
            .map_err(|e| GrowPodError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
