//! Recommendation history database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{PredictionResult, Recommendation, StoredRecommendation};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, field_name, field_size, field_size_unit, crop_type, soil_type,
           soil_ph, nitrogen, phosphorus, potassium, temperature, humidity, soil_moisture,
           ml_prediction, recommendations, created_at
    FROM fertilizer_recommendations
"#;

impl Database {
    /// Insert a saved recommendation.
    pub fn insert_recommendation(&self, record: &StoredRecommendation) -> DbResult<()> {
        let ml_prediction_json = serde_json::to_string(&record.ml_prediction)?;
        let recommendations_json = serde_json::to_string(&record.recommendations)?;

        self.conn.execute(
            r#"
            INSERT INTO fertilizer_recommendations (
                id, user_id, field_name, field_size, field_size_unit, crop_type, soil_type,
                soil_ph, nitrogen, phosphorus, potassium, temperature, humidity, soil_moisture,
                ml_prediction, recommendations, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
            "#,
            params![
                record.id,
                record.user_id,
                record.field_name,
                record.field_size,
                record.field_size_unit,
                record.crop_type,
                record.soil_type,
                record.soil_ph,
                record.nitrogen,
                record.phosphorus,
                record.potassium,
                record.temperature,
                record.humidity,
                record.soil_moisture,
                ml_prediction_json,
                recommendations_json,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    /// List a user's recommendations, newest first.
    pub fn list_recommendations_for_user(
        &self,
        user_id: &str,
    ) -> DbResult<Vec<StoredRecommendation>> {
        let sql = format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([user_id], RecommendationRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Get one of a user's recommendations by ID.
    pub fn get_recommendation(
        &self,
        id: &str,
        user_id: &str,
    ) -> DbResult<Option<StoredRecommendation>> {
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_COLUMNS);
        self.conn
            .query_row(&sql, params![id, user_id], RecommendationRow::from_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Delete one of a user's recommendations. Returns false if the user owns
    /// no record with that ID.
    pub fn delete_recommendation(&self, id: &str, user_id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM fertilizer_recommendations WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct RecommendationRow {
    id: String,
    user_id: String,
    field_name: String,
    field_size: f64,
    field_size_unit: String,
    crop_type: String,
    soil_type: String,
    soil_ph: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    temperature: f64,
    humidity: f64,
    soil_moisture: f64,
    ml_prediction: String,
    recommendations: String,
    created_at: String,
}

impl RecommendationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            field_name: row.get(2)?,
            field_size: row.get(3)?,
            field_size_unit: row.get(4)?,
            crop_type: row.get(5)?,
            soil_type: row.get(6)?,
            soil_ph: row.get(7)?,
            nitrogen: row.get(8)?,
            phosphorus: row.get(9)?,
            potassium: row.get(10)?,
            temperature: row.get(11)?,
            humidity: row.get(12)?,
            soil_moisture: row.get(13)?,
            ml_prediction: row.get(14)?,
            recommendations: row.get(15)?,
            created_at: row.get(16)?,
        })
    }
}

impl TryFrom<RecommendationRow> for StoredRecommendation {
    type Error = DbError;

    fn try_from(row: RecommendationRow) -> Result<Self, Self::Error> {
        let ml_prediction: PredictionResult = serde_json::from_str(&row.ml_prediction)?;
        let recommendations: Recommendation = serde_json::from_str(&row.recommendations)?;

        Ok(StoredRecommendation {
            id: row.id,
            user_id: row.user_id,
            field_name: row.field_name,
            field_size: row.field_size,
            field_size_unit: row.field_size_unit,
            crop_type: row.crop_type,
            soil_type: row.soil_type,
            soil_ph: row.soil_ph,
            nitrogen: row.nitrogen,
            phosphorus: row.phosphorus,
            potassium: row.potassium,
            temperature: row.temperature,
            humidity: row.humidity,
            soil_moisture: row.soil_moisture,
            ml_prediction,
            recommendations,
            created_at: row.created_at,
        })
    }
}
