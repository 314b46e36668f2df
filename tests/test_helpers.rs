// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================
#![allow(dead_code)]

use construction_planner::api::{CreateProjectRequest, ProjectApi};
use construction_planner::db::{init_schema, open_sqlite_connection};
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开已初始化的测试库, 返回可共享的连接
pub fn shared_connection(db_path: &str) -> Arc<Mutex<Connection>> {
    let conn = open_sqlite_connection(db_path).expect("Failed to open test db");
    Arc::new(Mutex::new(conn))
}

/// 创建基于临时库的 ProjectApi
pub fn create_test_api() -> (NamedTempFile, ProjectApi) {
    let (temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = ProjectApi::open(&db_path).expect("Failed to open ProjectApi");
    (temp_file, api)
}

/// 标准测试项目: 1000 sq ft × 2 层, 24 周
pub fn sample_request(project_name: &str) -> CreateProjectRequest {
    CreateProjectRequest {
        project_name: project_name.to_string(),
        built_up_area: 1000.0,
        number_of_floors: 2,
        project_timeline: 24,
    }
}

/// 浮点比较
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
