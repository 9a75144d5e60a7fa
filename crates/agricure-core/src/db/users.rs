//! User account and session database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{AuthUser, Session, UserProfile};

/// Stored credentials for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: AuthUser,
    pub password_hash: String,
}

impl Database {
    /// Insert a user and their initial profile atomically.
    pub fn insert_user(
        &mut self,
        credentials: &UserCredentials,
        profile: &UserProfile,
    ) -> DbResult<()> {
        let tx = self.transaction()?;

        let inserted = tx.execute(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(email) DO NOTHING
            "#,
            params![
                credentials.user.id,
                credentials.user.email,
                credentials.password_hash,
                profile.created_at,
            ],
        )?;
        if inserted == 0 {
            return Err(DbError::Constraint(format!(
                "Email already registered: {}",
                credentials.user.email
            )));
        }

        tx.execute(
            r#"
            INSERT INTO user_profiles (
                id, full_name, email, farm_location, phone, farm_size,
                farm_size_unit, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                profile.id,
                profile.full_name,
                profile.email,
                profile.farm_location,
                profile.phone,
                profile.farm_size,
                profile.farm_size_unit,
                profile.created_at,
                profile.updated_at,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Find credentials by email (case-insensitive).
    pub fn find_user_by_email(&self, email: &str) -> DbResult<Option<UserCredentials>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, email, password_hash FROM users WHERE email = ?",
                [email],
                |row| {
                    Ok(UserCredentials {
                        user: AuthUser {
                            id: row.get(0)?,
                            email: row.get(1)?,
                        },
                        password_hash: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    /// Get a user by ID.
    pub fn get_user(&self, user_id: &str) -> DbResult<Option<AuthUser>> {
        Ok(self
            .conn
            .query_row("SELECT id, email FROM users WHERE id = ?", [user_id], |row| {
                Ok(AuthUser {
                    id: row.get(0)?,
                    email: row.get(1)?,
                })
            })
            .optional()?)
    }

    /// Record a new session.
    pub fn insert_session(&self, session: &Session) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![session.token, session.user.id, session.created_at],
        )?;
        Ok(())
    }

    /// Resolve a session token to its user.
    pub fn get_session(&self, token: &str) -> DbResult<Option<Session>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT s.token, s.created_at, u.id, u.email
                FROM sessions s
                JOIN users u ON u.id = s.user_id
                WHERE s.token = ?
                "#,
                [token],
                |row| {
                    Ok(Session {
                        token: row.get(0)?,
                        created_at: row.get(1)?,
                        user: AuthUser {
                            id: row.get(2)?,
                            email: row.get(3)?,
                        },
                    })
                },
            )
            .optional()?)
    }

    /// Delete a session.
    pub fn delete_session(&self, token: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM sessions WHERE token = ?", [token])?;
        Ok(rows_affected > 0)
    }
}
