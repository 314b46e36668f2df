// ==========================================
// 住宅建造估算系统 - 估算结果数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 阶段(含人工)、材料、周计划、户型建议的行级读写
// 写入语义: 整体替换 (先删后插, 由调用方提供事务)
// 读取语义: 与 project 表联查, 按 (project_id, user_id) 限定归属
// ==========================================

use crate::domain::layout::{LayoutConfig, LayoutSuggestion};
use crate::domain::material::MaterialRequirement;
use crate::domain::phase::{LaborAllocation, Phase};
use crate::domain::schedule::WeeklyScheduleEntry;
use crate::domain::types::{PhaseName, WorkerType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// EstimateRows - 待写入的派生数据
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct EstimateRows<'a> {
    pub phases: &'a [Phase],
    pub materials: &'a [MaterialRequirement],
    pub schedule: &'a [WeeklyScheduleEntry],
    pub layouts: &'a [LayoutSuggestion],
}

/// 替换项目的全部派生数据
///
/// 须在事务内调用 (labor_allocation 随 project_phase 级联删除)
pub(crate) fn write_estimate(
    conn: &Connection,
    project_id: &str,
    rows: EstimateRows<'_>,
) -> RepositoryResult<()> {
    for table in [
        "project_phase",
        "material_requirement",
        "weekly_schedule",
        "layout_suggestion",
    ] {
        conn.execute(
            &format!("DELETE FROM {} WHERE project_id = ?1", table),
            params![project_id],
        )?;
    }

    for phase in rows.phases {
        let phase_id = Uuid::new_v4().to_string();
        conn.execute(
            r#"
            INSERT INTO project_phase (
                id, project_id, phase_name, phase_order,
                start_week, duration_weeks, cost_estimate
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                phase_id,
                project_id,
                phase.name.as_str(),
                phase.order,
                phase.start_week,
                phase.duration_weeks,
                phase.cost_estimate,
            ],
        )?;

        for (seq_no, labor) in phase.labor_allocations.iter().enumerate() {
            conn.execute(
                r#"
                INSERT INTO labor_allocation (
                    id, phase_id, seq_no, worker_type, quantity, days_required, cost
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    Uuid::new_v4().to_string(),
                    phase_id,
                    seq_no as i64,
                    labor.worker_type.as_str(),
                    labor.quantity,
                    labor.days_required,
                    labor.cost,
                ],
            )?;
        }
    }

    for (seq_no, material) in rows.materials.iter().enumerate() {
        conn.execute(
            r#"
            INSERT INTO material_requirement (
                id, project_id, seq_no, material_name, quantity, unit, cost, phase
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                Uuid::new_v4().to_string(),
                project_id,
                seq_no as i64,
                material.material_name,
                material.quantity,
                material.unit,
                material.cost,
                material.phase,
            ],
        )?;
    }

    for entry in rows.schedule {
        conn.execute(
            r#"
            INSERT INTO weekly_schedule (
                id, project_id, week_number, phase_name,
                tasks, workforce_required, materials_needed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                Uuid::new_v4().to_string(),
                project_id,
                entry.week_number,
                entry.phase_name,
                serde_json::to_string(&entry.tasks)?,
                serde_json::to_string(&entry.workforce_required)?,
                serde_json::to_string(&entry.materials_needed)?,
            ],
        )?;
    }

    for layout in rows.layouts {
        conn.execute(
            r#"
            INSERT INTO layout_suggestion (
                id, project_id, floor_number, total_rooms, layout_config, suggestions
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                Uuid::new_v4().to_string(),
                project_id,
                layout.floor_number,
                layout.total_rooms,
                serde_json::to_string(&layout.layout_config)?,
                layout.suggestions,
            ],
        )?;
    }

    Ok(())
}

// ==========================================
// 读取 (由 ProjectRepository 在同一事务内调用)
// ==========================================

/// 查询阶段 (含人工配置), 按 phase_order 升序
pub(crate) fn read_phases(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> RepositoryResult<Vec<Phase>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT ph.id, ph.phase_name, ph.phase_order,
               ph.start_week, ph.duration_weeks, ph.cost_estimate
        FROM project_phase ph
        JOIN project p ON p.id = ph.project_id
        WHERE ph.project_id = ?1 AND p.user_id = ?2
        ORDER BY ph.phase_order ASC
        "#,
    )?;
    let raw_phases = stmt
        .query_map(params![project_id, user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
                row.get::<_, i32>(3)?,
                row.get::<_, i32>(4)?,
                row.get::<_, f64>(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut labor_stmt = conn.prepare(
        r#"
        SELECT worker_type, quantity, days_required, cost
        FROM labor_allocation
        WHERE phase_id = ?1
        ORDER BY seq_no ASC
        "#,
    )?;

    let mut phases = Vec::with_capacity(raw_phases.len());
    for (phase_id, phase_name, order, start_week, duration_weeks, cost_estimate) in raw_phases {
        let name = PhaseName::parse(&phase_name).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "phase_name".to_string(),
                message: format!("未知阶段: {}", phase_name),
            }
        })?;

        let raw_labor = labor_stmt
            .query_map(params![phase_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let labor_allocations = raw_labor
            .into_iter()
            .map(|(worker_type, quantity, days_required, cost)| -> RepositoryResult<LaborAllocation> {
                let worker_type = WorkerType::parse(&worker_type).ok_or_else(|| {
                    RepositoryError::FieldValueError {
                        field: "worker_type".to_string(),
                        message: format!("未知工种: {}", worker_type),
                    }
                })?;
                Ok(LaborAllocation {
                    worker_type,
                    quantity,
                    days_required,
                    cost,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        phases.push(Phase {
            name,
            order,
            start_week,
            duration_weeks,
            cost_estimate,
            labor_allocations,
        });
    }

    Ok(phases)
}

/// 查询材料需求, 保持估算时的顺序
pub(crate) fn read_materials(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> RepositoryResult<Vec<MaterialRequirement>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT m.material_name, m.quantity, m.unit, m.cost, m.phase
        FROM material_requirement m
        JOIN project p ON p.id = m.project_id
        WHERE m.project_id = ?1 AND p.user_id = ?2
        ORDER BY m.seq_no ASC
        "#,
    )?;

    let materials = stmt
        .query_map(params![project_id, user_id], |row| {
            Ok(MaterialRequirement {
                material_name: row.get(0)?,
                quantity: row.get(1)?,
                unit: row.get(2)?,
                cost: row.get(3)?,
                phase: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(materials)
}

/// 查询周计划, 按周号升序
pub(crate) fn read_schedules(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> RepositoryResult<Vec<WeeklyScheduleEntry>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT w.week_number, w.phase_name, w.tasks, w.workforce_required, w.materials_needed
        FROM weekly_schedule w
        JOIN project p ON p.id = w.project_id
        WHERE w.project_id = ?1 AND p.user_id = ?2
        ORDER BY w.week_number ASC
        "#,
    )?;

    let raw = stmt
        .query_map(params![project_id, user_id], |row| {
            Ok((
                row.get::<_, i32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(week_number, phase_name, tasks, workforce, materials)| -> RepositoryResult<WeeklyScheduleEntry> {
            Ok(WeeklyScheduleEntry {
                week_number,
                phase_name,
                tasks: serde_json::from_str::<Vec<String>>(&tasks)?,
                workforce_required: serde_json::from_str::<BTreeMap<String, i64>>(&workforce)?,
                materials_needed: serde_json::from_str::<BTreeMap<String, i64>>(&materials)?,
            })
        })
        .collect()
}

/// 查询户型建议, 按楼层升序
pub(crate) fn read_layouts(
    conn: &Connection,
    project_id: &str,
    user_id: &str,
) -> RepositoryResult<Vec<LayoutSuggestion>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT l.floor_number, l.total_rooms, l.layout_config, l.suggestions
        FROM layout_suggestion l
        JOIN project p ON p.id = l.project_id
        WHERE l.project_id = ?1 AND p.user_id = ?2
        ORDER BY l.floor_number ASC
        "#,
    )?;

    let raw = stmt
        .query_map(params![project_id, user_id], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(floor_number, total_rooms, layout_config, suggestions)| -> RepositoryResult<LayoutSuggestion> {
            Ok(LayoutSuggestion {
                floor_number,
                total_rooms,
                layout_config: serde_json::from_str::<LayoutConfig>(&layout_config)?,
                suggestions,
            })
        })
        .collect()
}
