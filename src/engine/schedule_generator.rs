// ==========================================
// 住宅建造估算系统 - 周计划生成引擎
// ==========================================
// 输入: 施工阶段 + 材料需求
// 输出: 每个 (阶段, 阶段内周) 一条周计划, 全局周号连续
// ==========================================
// 规则: 任务按阶段内周序号查表, 超出表长取最后一项
//       人力 = 阶段班组人数 (每周相同, 不分摊)
//       材料 = 阶段标签包含本阶段名称的材料, ceil(数量 / 阶段周数)
// 红线: 负工期阶段报错, 不做除法; 0 周阶段不产生条目
// ==========================================

use crate::domain::material::MaterialRequirement;
use crate::domain::phase::Phase;
use crate::domain::schedule::WeeklyScheduleEntry;
use crate::domain::types::PhaseName;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 未知阶段的通用任务
pub const GENERIC_TASK: &str = "Work in progress";

// ==========================================
// 任务查找表 (阶段 → 按周排列的三项任务)
// ==========================================
const FOUNDATION_TASKS: &[[&str; 3]] = &[
    ["Site preparation and marking", "Excavation work begins", "Soil testing"],
    ["Deep excavation", "Foundation layout marking", "Reinforcement preparation"],
    ["Foundation concrete pouring", "Curing process", "Foundation leveling"],
    ["Foundation waterproofing", "Backfilling", "Quality inspection"],
];

const STRUCTURE_TASKS: &[[&str; 3]] = &[
    ["Column reinforcement", "Formwork preparation", "First floor slab preparation"],
    ["Beam and slab reinforcement", "Concrete pouring", "Curing"],
    ["Second floor construction", "Column extension", "Wall construction"],
    ["Structural completion", "Load testing", "Quality checks"],
];

const ROOFING_TASKS: &[[&str; 3]] = &[
    ["Roof slab preparation", "Waterproofing layer", "Insulation work"],
    ["Roof finishing", "Drainage system", "Parapet construction"],
    ["Final waterproofing", "Roof testing", "Completion checks"],
];

const FINISHING_TASKS: &[[&str; 3]] = &[
    ["Electrical conduit installation", "Plumbing rough-in", "Window and door frames"],
    ["Plastering work", "Flooring preparation", "Electrical wiring"],
    ["Painting and finishing", "Fixture installation", "Final touches"],
    ["Quality inspection", "Cleaning", "Handover preparation"],
];

fn task_table(phase: PhaseName) -> &'static [[&'static str; 3]] {
    match phase {
        PhaseName::Foundation => FOUNDATION_TASKS,
        PhaseName::Structure => STRUCTURE_TASKS,
        PhaseName::Roofing => ROOFING_TASKS,
        PhaseName::Finishing => FINISHING_TASKS,
    }
}

/// 查询某阶段第 `week_index` 周 (从 0 开始) 的任务
///
/// 超出表长取最后一项; 未知阶段返回单项通用任务
pub fn week_tasks(phase_name: &str, week_index: usize) -> Vec<String> {
    match PhaseName::parse(phase_name) {
        Some(phase) => {
            let table = task_table(phase);
            let idx = week_index.min(table.len() - 1);
            table[idx].iter().map(|t| t.to_string()).collect()
        }
        None => vec![GENERIC_TASK.to_string()],
    }
}

// ==========================================
// ScheduleGenerator - 周计划生成引擎
// ==========================================
pub struct ScheduleGenerator {
    // 无状态引擎
}

impl ScheduleGenerator {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成周计划
    ///
    /// # 返回
    /// - Ok(Vec): 条目数 = 各阶段周数之和
    /// - Err(DegenerateSchedule): 存在负工期阶段
    pub fn generate_schedule(
        &self,
        phases: &[Phase],
        materials: &[MaterialRequirement],
    ) -> EngineResult<Vec<WeeklyScheduleEntry>> {
        let mut schedule = Vec::new();

        for phase in phases {
            if phase.duration_weeks < 0 {
                return Err(EngineError::DegenerateSchedule {
                    phase: phase.name.to_string(),
                    duration_weeks: phase.duration_weeks,
                });
            }
            if phase.duration_weeks == 0 {
                warn!(phase = %phase.name, "阶段工期为 0, 跳过周计划");
                continue;
            }

            let phase_name = phase.name.as_str();

            let workforce_required: BTreeMap<String, i64> = phase
                .labor_allocations
                .iter()
                .map(|l| (l.worker_type.to_string(), l.quantity))
                .collect();

            let weeks = i64::from(phase.duration_weeks);
            let materials_needed: BTreeMap<String, i64> = materials
                .iter()
                .filter(|m| m.applies_to(phase_name))
                .map(|m| (m.material_name.clone(), ceil_div(m.quantity, weeks)))
                .collect();

            for week in 0..phase.duration_weeks {
                schedule.push(WeeklyScheduleEntry {
                    week_number: phase.start_week + week,
                    phase_name: phase_name.to_string(),
                    tasks: week_tasks(phase_name, week as usize),
                    workforce_required: workforce_required.clone(),
                    materials_needed: materials_needed.clone(),
                });
            }
        }

        debug!(weeks = schedule.len(), "周计划生成完成");

        Ok(schedule)
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 向上取整除法 (被除数非负, 除数为正; 不做加法, 避免溢出)
fn ceil_div(quantity: i64, weeks: i64) -> i64 {
    let whole = quantity / weeks;
    if quantity % weeks == 0 {
        whole
    } else {
        whole + 1
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostConfig;
    use crate::domain::project::ProjectInputs;
    use crate::engine::{MaterialEstimator, PhasePlanner};

    fn build(area: f64, floors: u32, timeline: i32) -> (Vec<Phase>, Vec<MaterialRequirement>) {
        let inputs = ProjectInputs::new(area, floors, timeline);
        let config = CostConfig::default();
        (
            PhasePlanner::new().compute_phases(&inputs, &config).unwrap(),
            MaterialEstimator::new().compute_materials(&inputs, &config),
        )
    }

    #[test]
    fn test_week_tasks_clamps_to_last_entry() {
        assert_eq!(
            week_tasks("Roofing", 0),
            vec!["Roof slab preparation", "Waterproofing layer", "Insulation work"]
        );
        assert_eq!(week_tasks("Roofing", 7), week_tasks("Roofing", 2));
        assert_eq!(week_tasks("Landscaping", 0), vec![GENERIC_TASK.to_string()]);
    }

    #[test]
    fn test_entry_count_and_week_numbers() {
        let (phases, materials) = build(1000.0, 2, 24);
        let schedule = ScheduleGenerator::new()
            .generate_schedule(&phases, &materials)
            .unwrap();

        assert_eq!(schedule.len(), 24);
        for (idx, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.week_number, idx as i32 + 1);
        }
        assert_eq!(schedule[6].phase_name, "Structure");
        assert_eq!(schedule[19].phase_name, "Finishing");
    }

    #[test]
    fn test_materials_split_by_phase_label() {
        let (phases, materials) = build(1000.0, 2, 24);
        let schedule = ScheduleGenerator::new()
            .generate_schedule(&phases, &materials)
            .unwrap();

        // Foundation 6 周: 水泥 800/6 → 134, 砂 100/6 → 17, 骨料 120/6 = 20
        let foundation = &schedule[0];
        assert_eq!(foundation.materials_needed.get("Cement"), Some(&134));
        assert_eq!(foundation.materials_needed.get("Sand"), Some(&17));
        assert_eq!(foundation.materials_needed.get("Aggregate"), Some(&20));
        assert!(!foundation.materials_needed.contains_key("Steel"));
        assert!(!foundation.materials_needed.contains_key("Bricks"));

        // Structure 9 周: 全部 5 种材料
        let structure = &schedule[6];
        assert_eq!(structure.materials_needed.len(), 5);
        assert_eq!(structure.materials_needed.get("Steel"), Some(&889));

        // Roofing: 无匹配材料
        let roofing = &schedule[15];
        assert_eq!(roofing.phase_name, "Roofing");
        assert!(roofing.materials_needed.is_empty());

        // Finishing 5 周: 仅砖 16000/5
        let finishing = &schedule[19];
        assert_eq!(finishing.materials_needed.len(), 1);
        assert_eq!(finishing.materials_needed.get("Bricks"), Some(&3200));
    }

    #[test]
    fn test_workforce_is_full_crew_every_week() {
        let (phases, materials) = build(1000.0, 2, 24);
        let schedule = ScheduleGenerator::new()
            .generate_schedule(&phases, &materials)
            .unwrap();

        for entry in schedule.iter().filter(|e| e.phase_name == "Foundation") {
            assert_eq!(entry.workforce_required.get("Mason"), Some(&4));
            assert_eq!(entry.workforce_required.get("Labor"), Some(&7));
        }
    }

    #[test]
    fn test_zero_week_phase_is_skipped() {
        let (phases, materials) = build(1000.0, 1, 4);
        let schedule = ScheduleGenerator::new()
            .generate_schedule(&phases, &materials)
            .unwrap();

        assert_eq!(schedule.len(), 4);
        assert!(schedule.iter().all(|e| e.phase_name != "Finishing"));
    }

    #[test]
    fn test_negative_phase_is_reported() {
        let (phases, materials) = build(1000.0, 1, 2);
        let result = ScheduleGenerator::new().generate_schedule(&phases, &materials);

        assert!(matches!(
            result,
            Err(EngineError::DegenerateSchedule { ref phase, .. }) if phase == "Finishing"
        ));
    }

    #[test]
    fn test_ceil_div_near_i64_max() {
        assert_eq!(ceil_div(i64::MAX, 2), i64::MAX / 2 + 1);
        assert_eq!(ceil_div(i64::MAX, 1), i64::MAX);
        assert_eq!(ceil_div(0, 7), 0);
        assert_eq!(ceil_div(12, 4), 3);
        assert_eq!(ceil_div(13, 4), 4);
    }

    #[test]
    fn test_schedule_covers_every_phase_week_across_timelines() {
        for timeline in 4..=120 {
            let (phases, materials) = build(1500.0, 3, timeline);
            let schedule = ScheduleGenerator::new()
                .generate_schedule(&phases, &materials)
                .unwrap();

            let total_weeks: i32 = phases.iter().map(|p| p.duration_weeks).sum();
            assert_eq!(total_weeks, timeline, "timeline {}", timeline);
            assert_eq!(schedule.len(), total_weeks as usize, "timeline {}", timeline);

            for (idx, entry) in schedule.iter().enumerate() {
                assert_eq!(entry.week_number, idx as i32 + 1, "timeline {}", timeline);

                let owner = phases
                    .iter()
                    .find(|p| {
                        entry.week_number >= p.start_week
                            && entry.week_number < p.start_week + p.duration_weeks
                    })
                    .unwrap_or_else(|| {
                        panic!("week {} outside every phase (timeline {})", entry.week_number, timeline)
                    });
                assert_eq!(entry.phase_name, owner.name.as_str(), "timeline {}", timeline);
                assert_eq!(entry.tasks.len(), 3);
            }
        }
    }
}
