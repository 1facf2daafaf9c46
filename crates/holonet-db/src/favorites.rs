//! Favorite links between users and catalog entities.
//!
//! Every operation takes the acting user's id explicitly. Mutations check the
//! user and the target inside one IMMEDIATE transaction, and the foreign keys
//! on the link tables reject anything that would still dangle at commit.

use std::fmt;

use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::Database;
use crate::error::FavoriteError;
use crate::models::FavoriteRow;
use crate::queries::query_user_by_id;

/// The two catalogs a user can favorite from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteKind {
    Character,
    Planet,
}

impl FavoriteKind {
    fn entity_table(self) -> &'static str {
        match self {
            Self::Character => "characters",
            Self::Planet => "planets",
        }
    }

    fn link_table(self) -> &'static str {
        match self {
            Self::Character => "character_favorites",
            Self::Planet => "planet_favorites",
        }
    }

    fn entity_column(self) -> &'static str {
        match self {
            Self::Character => "character_id",
            Self::Planet => "planet_id",
        }
    }

    /// `SELECT` over the link table joined with the entity name; callers
    /// append the `WHERE` clause.
    fn select_favorites(self) -> String {
        format!(
            "SELECT f.id, f.user_id, f.{col}, e.name, f.created_at
             FROM {link} f
             JOIN {entity} e ON e.id = f.{col}",
            col = self.entity_column(),
            link = self.link_table(),
            entity = self.entity_table(),
        )
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Character => "character",
            Self::Planet => "planet",
        })
    }
}

/// Both favorite sets of one user, ordered by creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFavorites {
    pub characters: Vec<FavoriteRow>,
    pub planets: Vec<FavoriteRow>,
}

/// Result of an add. `created` is false when the link already existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteAdded {
    pub favorite: FavoriteRow,
    pub created: bool,
}

impl Database {
    pub fn list_favorites(&self, user_id: i64) -> Result<UserFavorites, FavoriteError> {
        self.with_snapshot(|tx| {
            require_user(tx, user_id)?;
            Ok(UserFavorites {
                characters: find_favorites_by_user(tx, FavoriteKind::Character, user_id)?,
                planets: find_favorites_by_user(tx, FavoriteKind::Planet, user_id)?,
            })
        })
    }

    pub fn add_planet_favorite(
        &self,
        user_id: i64,
        planet_id: i64,
    ) -> Result<FavoriteAdded, FavoriteError> {
        self.add_favorite(FavoriteKind::Planet, user_id, planet_id)
    }

    pub fn add_character_favorite(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> Result<FavoriteAdded, FavoriteError> {
        self.add_favorite(FavoriteKind::Character, user_id, character_id)
    }

    pub fn remove_planet_favorite(
        &self,
        user_id: i64,
        planet_id: i64,
    ) -> Result<FavoriteRow, FavoriteError> {
        self.remove_favorite(FavoriteKind::Planet, user_id, planet_id)
    }

    pub fn remove_character_favorite(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> Result<FavoriteRow, FavoriteError> {
        self.remove_favorite(FavoriteKind::Character, user_id, character_id)
    }

    /// Links `user_id` to the entity. Adding an existing link is a no-op that
    /// returns the stored record.
    pub fn add_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i64,
        entity_id: i64,
    ) -> Result<FavoriteAdded, FavoriteError> {
        self.with_tx(|tx| {
            require_user(tx, user_id)?;
            if !entity_exists(tx, kind, entity_id)? {
                return Err(FavoriteError::entity_not_found(kind, entity_id));
            }

            if let Some(existing) = find_favorite_by_user_and_entity(tx, kind, user_id, entity_id)? {
                debug!("User {} already favorites {} {}", user_id, kind, entity_id);
                return Ok(FavoriteAdded {
                    favorite: existing,
                    created: false,
                });
            }

            tx.execute(
                &format!(
                    "INSERT INTO {} (user_id, {}) VALUES (?1, ?2)",
                    kind.link_table(),
                    kind.entity_column()
                ),
                [user_id, entity_id],
            )?;
            let favorite = find_favorite_by_id(tx, kind, tx.last_insert_rowid())?;

            info!("User {} favorited {} {}", user_id, kind, entity_id);
            Ok(FavoriteAdded {
                favorite,
                created: true,
            })
        })
    }

    /// Deletes the link and returns it as it was stored.
    pub fn remove_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i64,
        entity_id: i64,
    ) -> Result<FavoriteRow, FavoriteError> {
        self.with_tx(|tx| {
            require_user(tx, user_id)?;
            let favorite = find_favorite_by_user_and_entity(tx, kind, user_id, entity_id)?
                .ok_or(FavoriteError::FavoriteNotFound {
                    kind,
                    user_id,
                    entity_id,
                })?;

            tx.execute(
                &format!("DELETE FROM {} WHERE id = ?1", kind.link_table()),
                [favorite.id],
            )?;

            info!("User {} unfavorited {} {}", user_id, kind, entity_id);
            Ok(favorite)
        })
    }
}

fn require_user(conn: &Connection, user_id: i64) -> Result<(), FavoriteError> {
    match query_user_by_id(conn, user_id)? {
        Some(_) => Ok(()),
        None => Err(FavoriteError::UserNotFound(user_id)),
    }
}

fn entity_exists(conn: &Connection, kind: FavoriteKind, entity_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        &format!("SELECT 1 FROM {} WHERE id = ?1", kind.entity_table()),
        [entity_id],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

fn find_favorite_by_id(conn: &Connection, kind: FavoriteKind, id: i64) -> rusqlite::Result<FavoriteRow> {
    conn.query_row(
        &format!("{} WHERE f.id = ?1", kind.select_favorites()),
        [id],
        |row| favorite_from_row(kind, row),
    )
}

pub(crate) fn find_favorite_by_user_and_entity(
    conn: &Connection,
    kind: FavoriteKind,
    user_id: i64,
    entity_id: i64,
) -> rusqlite::Result<Option<FavoriteRow>> {
    conn.query_row(
        &format!(
            "{} WHERE f.user_id = ?1 AND f.{} = ?2",
            kind.select_favorites(),
            kind.entity_column()
        ),
        [user_id, entity_id],
        |row| favorite_from_row(kind, row),
    )
    .optional()
}

fn find_favorites_by_user(
    conn: &Connection,
    kind: FavoriteKind,
    user_id: i64,
) -> rusqlite::Result<Vec<FavoriteRow>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE f.user_id = ?1 ORDER BY f.id",
        kind.select_favorites()
    ))?;

    let rows = stmt
        .query_map([user_id], |row| favorite_from_row(kind, row))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn favorite_from_row(kind: FavoriteKind, row: &Row<'_>) -> rusqlite::Result<FavoriteRow> {
    Ok(FavoriteRow {
        kind,
        id: row.get(0)?,
        user_id: row.get(1)?,
        entity_id: row.get(2)?,
        entity_name: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCharacter, NewPlanet};

    struct Fixture {
        db: Database,
        user: i64,
        luke: i64,
        hoth: i64,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user("luke@tatooine.example", "hash", true).unwrap();
        let luke = db
            .create_character(&NewCharacter {
                name: "Luke Skywalker".into(),
                ..Default::default()
            })
            .unwrap();
        let hoth = db
            .create_planet(&NewPlanet {
                name: "Hoth".into(),
                ..Default::default()
            })
            .unwrap();
        Fixture { db, user, luke, hoth }
    }

    fn link_count(db: &Database, kind: FavoriteKind) -> i64 {
        db.with_conn(|conn| {
            Ok(conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", kind.link_table()),
                [],
                |r| r.get(0),
            )?)
        })
        .unwrap()
    }

    #[test]
    fn new_user_has_no_favorites() {
        let f = fixture();
        assert_eq!(f.db.list_favorites(f.user).unwrap(), UserFavorites::default());
    }

    #[test]
    fn listing_for_unknown_user_fails() {
        let f = fixture();
        let err = f.db.list_favorites(42).unwrap_err();
        assert!(matches!(err, FavoriteError::UserNotFound(42)));
    }

    #[test]
    fn added_planet_is_listed_once() {
        let f = fixture();
        let added = f.db.add_planet_favorite(f.user, f.hoth).unwrap();
        assert!(added.created);
        assert_eq!(added.favorite.entity_name, "Hoth");

        let favorites = f.db.list_favorites(f.user).unwrap();
        assert_eq!(favorites.planets, vec![added.favorite]);
        assert!(favorites.characters.is_empty());
    }

    #[test]
    fn repeated_add_does_not_duplicate() {
        let f = fixture();
        let first = f.db.add_character_favorite(f.user, f.luke).unwrap();
        let second = f.db.add_character_favorite(f.user, f.luke).unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.favorite.id, second.favorite.id);
        assert_eq!(f.db.list_favorites(f.user).unwrap().characters.len(), 1);
    }

    #[test]
    fn missing_planet_creates_nothing() {
        let f = fixture();
        let err = f.db.add_planet_favorite(f.user, 99999).unwrap_err();
        assert!(matches!(err, FavoriteError::PlanetNotFound(99999)));
        assert_eq!(link_count(&f.db, FavoriteKind::Planet), 0);
    }

    #[test]
    fn missing_character_creates_nothing() {
        let f = fixture();
        let err = f.db.add_character_favorite(f.user, 7).unwrap_err();
        assert!(matches!(err, FavoriteError::CharacterNotFound(7)));
        assert_eq!(link_count(&f.db, FavoriteKind::Character), 0);
    }

    #[test]
    fn missing_user_cannot_add() {
        let f = fixture();
        let err = f.db.add_planet_favorite(999, f.hoth).unwrap_err();
        assert!(matches!(err, FavoriteError::UserNotFound(999)));
        assert_eq!(link_count(&f.db, FavoriteKind::Planet), 0);
    }

    #[test]
    fn remove_after_add_restores_state() {
        let f = fixture();
        f.db.add_character_favorite(f.user, f.luke).unwrap();
        let before = f.db.list_favorites(f.user).unwrap();

        f.db.add_planet_favorite(f.user, f.hoth).unwrap();
        let removed = f.db.remove_planet_favorite(f.user, f.hoth).unwrap();
        assert_eq!(removed.entity_id, f.hoth);

        assert_eq!(f.db.list_favorites(f.user).unwrap(), before);
    }

    #[test]
    fn second_remove_is_not_found() {
        let f = fixture();
        f.db.add_character_favorite(f.user, f.luke).unwrap();
        f.db.remove_character_favorite(f.user, f.luke).unwrap();

        let err = f.db.remove_character_favorite(f.user, f.luke).unwrap_err();
        assert!(matches!(
            err,
            FavoriteError::FavoriteNotFound {
                kind: FavoriteKind::Character,
                ..
            }
        ));
    }

    #[test]
    fn remove_for_unknown_user_fails_first() {
        let f = fixture();
        let err = f.db.remove_planet_favorite(5, f.hoth).unwrap_err();
        assert!(matches!(err, FavoriteError::UserNotFound(5)));
    }

    #[test]
    fn favorites_are_scoped_per_user() {
        let f = fixture();
        let other = f.db.create_user("leia@alderaan.example", "hash", true).unwrap();
        f.db.add_planet_favorite(other, f.hoth).unwrap();

        assert!(f.db.list_favorites(f.user).unwrap().planets.is_empty());
        assert!(matches!(
            f.db.remove_planet_favorite(f.user, f.hoth),
            Err(FavoriteError::FavoriteNotFound { .. })
        ));
        assert_eq!(f.db.list_favorites(other).unwrap().planets.len(), 1);
    }

    #[test]
    fn same_id_in_both_catalogs_stays_separate() {
        let f = fixture();
        // Both catalogs start numbering at 1.
        assert_eq!(f.luke, f.hoth);
        f.db.add_character_favorite(f.user, f.luke).unwrap();

        assert!(f.db.remove_planet_favorite(f.user, f.hoth).is_err());
        assert_eq!(f.db.list_favorites(f.user).unwrap().characters.len(), 1);
    }

    #[test]
    fn foreign_keys_reject_dangling_links() {
        let f = fixture();
        let result = f.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO planet_favorites (user_id, planet_id) VALUES (?1, ?2)",
                [f.user, 424242],
            )?;
            Ok(())
        });
        assert!(result.is_err());
    }

    #[test]
    fn errors_classify_not_found() {
        assert!(FavoriteError::UserNotFound(1).is_not_found());
        assert!(FavoriteError::CharacterNotFound(2).is_not_found());
        assert!(FavoriteError::PlanetNotFound(3).is_not_found());
        assert!(
            FavoriteError::FavoriteNotFound {
                kind: FavoriteKind::Planet,
                user_id: 1,
                entity_id: 3,
            }
            .is_not_found()
        );
        assert!(!FavoriteError::from(crate::LockPoisoned).is_not_found());
        assert!(!FavoriteError::Storage(rusqlite::Error::QueryReturnedNoRows).is_not_found());
    }
}
