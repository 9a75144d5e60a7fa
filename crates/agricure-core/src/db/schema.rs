//! SQLite schema definition.

/// Complete database schema for AgriCure.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Users & Sessions
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,                 -- bcrypt hash (salt embedded)
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);

-- ============================================================================
-- User Profiles
-- ============================================================================

CREATE TABLE IF NOT EXISTS user_profiles (
    id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    full_name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL,
    farm_location TEXT,
    phone TEXT,
    farm_size REAL,
    farm_size_unit TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- ============================================================================
-- Fertilizer Recommendations (History)
-- ============================================================================

CREATE TABLE IF NOT EXISTS fertilizer_recommendations (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    field_name TEXT NOT NULL,
    field_size REAL NOT NULL,
    field_size_unit TEXT NOT NULL,
    crop_type TEXT NOT NULL,
    soil_type TEXT NOT NULL,
    soil_ph REAL NOT NULL,
    nitrogen REAL NOT NULL,
    phosphorus REAL NOT NULL,
    potassium REAL NOT NULL,
    temperature REAL NOT NULL,
    humidity REAL NOT NULL,
    soil_moisture REAL NOT NULL,
    ml_prediction TEXT NOT NULL,                 -- JSON object {fertilizer, confidence}
    recommendations TEXT NOT NULL,               -- JSON Recommendation
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_recommendations_user_created
    ON fertilizer_recommendations(user_id, created_at);

-- ============================================================================
-- App State
-- ============================================================================

CREATE TABLE IF NOT EXISTS app_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
