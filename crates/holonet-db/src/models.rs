//! Database row types — these map directly to SQLite rows.
//! Distinct from holonet-types API models to keep the DB layer independent.

use chrono::{DateTime, NaiveDateTime, Utc};
use holonet_types::api::FavoriteRecord;
use holonet_types::models::{Character, CharacterFavorite, Planet, PlanetFavorite, User};
use tracing::warn;

use crate::favorites::FavoriteKind;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct CharacterRow {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlanetRow {
    pub id: i64,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
}

/// One row of `character_favorites` or `planet_favorites`, joined with the
/// favorited entity's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRow {
    pub kind: FavoriteKind,
    pub id: i64,
    pub user_id: i64,
    pub entity_id: i64,
    pub entity_name: String,
    pub created_at: String,
}

/// Insert payload for a character; `id` is assigned by the store.
pub type NewCharacter = CharacterRow;

/// Insert payload for a planet; `id` is assigned by the store.
pub type NewPlanet = PlanetRow;

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            is_active: row.is_active,
        }
    }
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            gender: row.gender,
            birth_year: row.birth_year,
            height: row.height,
            hair_color: row.hair_color,
            eye_color: row.eye_color,
        }
    }
}

impl From<PlanetRow> for Planet {
    fn from(row: PlanetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            climate: row.climate,
            terrain: row.terrain,
            population: row.population,
            diameter: row.diameter,
        }
    }
}

impl FavoriteRow {
    pub fn into_character(self) -> CharacterFavorite {
        let created_at = parse_timestamp(&self.created_at, self.id);
        CharacterFavorite {
            id: self.id,
            user_id: self.user_id,
            character_id: self.entity_id,
            character_name: self.entity_name,
            created_at,
        }
    }

    pub fn into_planet(self) -> PlanetFavorite {
        let created_at = parse_timestamp(&self.created_at, self.id);
        PlanetFavorite {
            id: self.id,
            user_id: self.user_id,
            planet_id: self.entity_id,
            planet_name: self.entity_name,
            created_at,
        }
    }

    pub fn into_record(self) -> FavoriteRecord {
        match self.kind {
            FavoriteKind::Character => FavoriteRecord::Character(self.into_character()),
            FavoriteKind::Planet => FavoriteRecord::Planet(self.into_planet()),
        }
    }
}

fn parse_timestamp(raw: &str, favorite_id: i64) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on favorite {}: {}", raw, favorite_id, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_timestamps_parse_as_utc() {
        let ts = parse_timestamp("2024-05-04 12:30:00", 1);
        assert_eq!(ts.to_rfc3339(), "2024-05-04T12:30:00+00:00");
    }

    #[test]
    fn corrupt_timestamp_falls_back_to_epoch() {
        assert_eq!(parse_timestamp("yesterday", 1), DateTime::<Utc>::default());
    }

    #[test]
    fn record_follows_kind() {
        let row = FavoriteRow {
            kind: FavoriteKind::Planet,
            id: 3,
            user_id: 1,
            entity_id: 4,
            entity_name: "Hoth".into(),
            created_at: "2024-05-04 12:30:00".into(),
        };

        match row.into_record() {
            FavoriteRecord::Planet(p) => {
                assert_eq!(p.planet_id, 4);
                assert_eq!(p.planet_name, "Hoth");
            }
            FavoriteRecord::Character(_) => panic!("expected a planet favorite"),
        }
    }
}
