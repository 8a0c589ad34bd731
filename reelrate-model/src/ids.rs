use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed ID for movies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct MovieId(pub Uuid);

impl Default for MovieId {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieId {
    pub fn new() -> Self {
        MovieId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for MovieId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for MovieId {
    fn from(id: Uuid) -> Self {
        MovieId(id)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for ratings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct RatingId(pub Uuid);

impl Default for RatingId {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingId {
    pub fn new() -> Self {
        RatingId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for RatingId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RatingId {
    fn from(id: Uuid) -> Self {
        RatingId(id)
    }
}

impl std::fmt::Display for RatingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
