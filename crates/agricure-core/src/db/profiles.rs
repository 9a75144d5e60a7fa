//! User profile database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::UserProfile;

impl Database {
    /// Get a profile by user ID.
    pub fn get_profile(&self, user_id: &str) -> DbResult<Option<UserProfile>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, full_name, email, farm_location, phone, farm_size,
                       farm_size_unit, created_at, updated_at
                FROM user_profiles
                WHERE id = ?
                "#,
                [user_id],
                |row| {
                    Ok(UserProfile {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        email: row.get(2)?,
                        farm_location: row.get(3)?,
                        phone: row.get(4)?,
                        farm_size: row.get(5)?,
                        farm_size_unit: row.get(6)?,
                        created_at: row.get(7)?,
                        updated_at: row.get(8)?,
                    })
                },
            )
            .optional()?)
    }

    /// Update the editable fields of a profile.
    pub fn update_profile(&self, profile: &UserProfile) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE user_profiles SET
                full_name = ?2,
                farm_location = ?3,
                phone = ?4,
                farm_size = ?5,
                farm_size_unit = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
            params![
                profile.id,
                profile.full_name,
                profile.farm_location,
                profile.phone,
                profile.farm_size,
                profile.farm_size_unit,
                profile.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }
}
