// ==========================================
// 住宅建造估算系统 - 项目数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: project / project_rate 表的 CRUD
// 约束: 所有读写按 (project_id, user_id) 限定归属, 不匹配视为未找到
// ==========================================

use crate::config::CostConfig;
use crate::domain::layout::LayoutSuggestion;
use crate::domain::material::MaterialRequirement;
use crate::domain::phase::Phase;
use crate::domain::project::Project;
use crate::domain::schedule::WeeklyScheduleEntry;
use crate::domain::types::ProjectStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::estimate_repo::{
    read_layouts, read_materials, read_phases, read_schedules, write_estimate, EstimateRows,
};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const PROJECT_COLUMNS: &str = r#"
    id, user_id, project_name,
    built_up_area, number_of_floors, project_timeline,
    total_cost, status, created_at, updated_at
"#;

// 行原始值 (status 需在闭包外解析)
struct ProjectRow {
    id: String,
    user_id: String,
    project_name: String,
    built_up_area: f64,
    number_of_floors: u32,
    project_timeline: i32,
    total_cost: f64,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl ProjectRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            project_name: row.get(2)?,
            built_up_area: row.get(3)?,
            number_of_floors: row.get(4)?,
            project_timeline: row.get(5)?,
            total_cost: row.get(6)?,
            status: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn into_project(self) -> RepositoryResult<Project> {
        let status = ProjectStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("未知项目状态: {}", self.status),
            }
        })?;

        Ok(Project {
            id: self.id,
            user_id: self.user_id,
            project_name: self.project_name,
            built_up_area: self.built_up_area,
            number_of_floors: self.number_of_floors,
            project_timeline: self.project_timeline,
            total_cost: self.total_cost,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn project_not_found(project_id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "Project".to_string(),
        id: project_id.to_string(),
    }
}

fn read_project(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> RepositoryResult<Option<Project>> {
    let sql = format!(
        "SELECT {} FROM project WHERE id = ?1 AND user_id = ?2",
        PROJECT_COLUMNS
    );
    let row = conn
        .query_row(&sql, params![project_id, user_id], ProjectRow::from_row)
        .optional()?;

    row.map(ProjectRow::into_project).transpose()
}

fn read_rates(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> RepositoryResult<BTreeMap<String, f64>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT r.key, r.value
        FROM project_rate r
        JOIN project p ON p.id = r.project_id
        WHERE r.project_id = ?1 AND p.user_id = ?2
        "#,
    )?;
    let rates = stmt
        .query_map(params![project_id, user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(rates)
}

fn write_rates(conn: &Connection, project_id: &str, config: &CostConfig) -> RepositoryResult<()> {
    conn.execute(
        "DELETE FROM project_rate WHERE project_id = ?1",
        params![project_id],
    )?;
    for (key, value) in config.to_rate_table() {
        conn.execute(
            "INSERT INTO project_rate (project_id, key, value) VALUES (?1, ?2, ?3)",
            params![project_id, key, value],
        )?;
    }
    Ok(())
}

// ==========================================
// ProjectSnapshot - 同一事务内读出的项目全貌
// ==========================================
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub rates: BTreeMap<String, f64>,
    pub phases: Vec<Phase>,
    pub materials: Vec<MaterialRequirement>,
    pub schedules: Vec<WeeklyScheduleEntry>,
    pub layouts: Vec<LayoutSuggestion>,
}

// ==========================================
// ProjectRepository - 项目仓储
// ==========================================
/// 项目仓储
/// 职责: 项目记录与费率表; 派生数据随项目一起写入
pub struct ProjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProjectRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建项目 (项目 + 费率表 + 派生数据, 单事务)
    pub fn create(
        &self,
        project: &Project,
        config: &CostConfig,
        rows: EstimateRows<'_>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO project (
                id, user_id, project_name,
                built_up_area, number_of_floors, project_timeline,
                total_cost, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                project.id,
                project.user_id,
                project.project_name,
                project.built_up_area,
                project.number_of_floors,
                project.project_timeline,
                project.total_cost,
                project.status.as_str(),
                project.created_at,
                project.updated_at,
            ],
        )?;
        write_rates(&tx, &project.id, config)?;
        write_estimate(&tx, &project.id, rows)?;

        tx.commit()?;
        Ok(())
    }

    /// 按主键查询 (限定归属用户)
    ///
    /// # 返回
    /// - Ok(Some(Project)): 找到项目
    /// - Ok(None): 不存在或不属于该用户
    pub fn find_by_id(&self, project_id: &str, user_id: &str) -> RepositoryResult<Option<Project>> {
        let conn = self.get_conn()?;
        read_project(&conn, project_id, user_id)
    }

    /// 按主键查询, 不存在时返回 NotFound
    pub fn get(&self, project_id: &str, user_id: &str) -> RepositoryResult<Project> {
        self.find_by_id(project_id, user_id)?
            .ok_or_else(|| project_not_found(project_id))
    }

    /// 查询用户的全部项目 (新建在前)
    pub fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Project>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM project WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            PROJECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user_id], ProjectRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ProjectRow::into_project).collect()
    }

    /// 读取项目费率表 (key-value, 限定归属用户; 不匹配时为空表)
    pub fn load_rates(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> RepositoryResult<BTreeMap<String, f64>> {
        let conn = self.get_conn()?;
        read_rates(&conn, project_id, user_id)
    }

    /// 读取项目全貌 (项目、费率、阶段、材料、周计划、户型)
    ///
    /// 持锁并在同一事务内完成全部读取, 不会与并发的费率更新交错
    ///
    /// # 返回
    /// - Ok(None): 不存在或不属于该用户
    pub fn find_snapshot(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> RepositoryResult<Option<ProjectSnapshot>> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let project = match read_project(&tx, project_id, user_id)? {
            Some(project) => project,
            None => return Ok(None),
        };
        let snapshot = ProjectSnapshot {
            project,
            rates: read_rates(&tx, project_id, user_id)?,
            phases: read_phases(&tx, project_id, user_id)?,
            materials: read_materials(&tx, project_id, user_id)?,
            schedules: read_schedules(&tx, project_id, user_id)?,
            layouts: read_layouts(&tx, project_id, user_id)?,
        };

        tx.commit()?;
        Ok(Some(snapshot))
    }

    /// 读取项目全貌, 不存在时返回 NotFound
    pub fn get_snapshot(&self, project_id: &str, user_id: &str) -> RepositoryResult<ProjectSnapshot> {
        self.find_snapshot(project_id, user_id)?
            .ok_or_else(|| project_not_found(project_id))
    }

    /// 更新费率并替换派生数据 (单事务)
    ///
    /// # 参数
    /// - `total_cost`: 重新估算后的总成本
    /// - `rows`: 重新估算后的派生数据
    pub fn update_config(
        &self,
        project_id: &str,
        user_id: &str,
        config: &CostConfig,
        total_cost: f64,
        rows: EstimateRows<'_>,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let affected = tx.execute(
            r#"
            UPDATE project
            SET total_cost = ?1, updated_at = ?2
            WHERE id = ?3 AND user_id = ?4
            "#,
            params![total_cost, updated_at, project_id, user_id],
        )?;
        if affected == 0 {
            return Err(project_not_found(project_id));
        }

        write_rates(&tx, project_id, config)?;
        write_estimate(&tx, project_id, rows)?;

        tx.commit()?;
        Ok(())
    }

    /// 更新项目状态
    pub fn update_status(
        &self,
        project_id: &str,
        user_id: &str,
        status: ProjectStatus,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE project SET status = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
            params![status.as_str(), updated_at, project_id, user_id],
        )?;
        if affected == 0 {
            return Err(project_not_found(project_id));
        }
        Ok(())
    }

    /// 删除项目 (派生数据级联删除)
    pub fn delete(&self, project_id: &str, user_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM project WHERE id = ?1 AND user_id = ?2",
            params![project_id, user_id],
        )?;
        if affected == 0 {
            return Err(project_not_found(project_id));
        }
        Ok(())
    }
}
