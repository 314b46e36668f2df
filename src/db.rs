// ==========================================
// 住宅建造估算系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为 (外键级联依赖 foreign_keys)
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 建库 (幂等)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS project (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    project_name TEXT NOT NULL,
    built_up_area REAL NOT NULL,
    number_of_floors INTEGER NOT NULL,
    project_timeline INTEGER NOT NULL,
    total_cost REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'DRAFT',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_project_user ON project(user_id, created_at);

CREATE TABLE IF NOT EXISTS project_rate (
    project_id TEXT NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    key TEXT NOT NULL,
    value REAL NOT NULL,
    PRIMARY KEY (project_id, key)
);

CREATE TABLE IF NOT EXISTS project_phase (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    phase_name TEXT NOT NULL,
    phase_order INTEGER NOT NULL,
    start_week INTEGER NOT NULL,
    duration_weeks INTEGER NOT NULL,
    cost_estimate REAL NOT NULL,
    UNIQUE(project_id, phase_order)
);

CREATE TABLE IF NOT EXISTS labor_allocation (
    id TEXT PRIMARY KEY,
    phase_id TEXT NOT NULL REFERENCES project_phase(id) ON DELETE CASCADE,
    seq_no INTEGER NOT NULL,
    worker_type TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    days_required INTEGER NOT NULL,
    cost REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS material_requirement (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    seq_no INTEGER NOT NULL,
    material_name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    unit TEXT NOT NULL,
    cost REAL NOT NULL,
    phase TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS weekly_schedule (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    week_number INTEGER NOT NULL,
    phase_name TEXT NOT NULL,
    tasks TEXT NOT NULL,
    workforce_required TEXT NOT NULL,
    materials_needed TEXT NOT NULL,
    UNIQUE(project_id, week_number)
);

CREATE TABLE IF NOT EXISTS layout_suggestion (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    floor_number INTEGER NOT NULL,
    total_rooms INTEGER NOT NULL,
    layout_config TEXT NOT NULL,
    suggestions TEXT NOT NULL,
    UNIQUE(project_id, floor_number)
);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建库 (幂等) 并登记 schema_version
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    if let Some(version) = read_schema_version(conn)? {
        if version != CURRENT_SCHEMA_VERSION {
            tracing::warn!(
                expected = CURRENT_SCHEMA_VERSION,
                actual = version,
                "schema_version 与代码期望不一致"
            );
        }
    }
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        assert_eq!(read_schema_version(&conn).unwrap(), None);
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }
}
