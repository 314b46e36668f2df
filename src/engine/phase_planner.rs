// ==========================================
// 住宅建造估算系统 - 阶段与人工规划引擎
// ==========================================
// 输入: 项目输入 + 费率配置
// 输出: 4 个施工阶段 (Foundation, Structure, Roofing, Finishing)
// ==========================================
// 规则: 工期按固定比例切分 (25% / 35% / 15% / 余量), 前三项向上取整
//       收尾阶段吸收全部舍入余量, 四段之和恒等于总工期
//       班组人数 = ceil(总面积 / 每人负担面积)
//       人工天数 = 阶段周数 × 6
// ==========================================

use crate::config::CostConfig;
use crate::domain::phase::{LaborAllocation, Phase};
use crate::domain::project::ProjectInputs;
use crate::domain::types::{PhaseName, WorkerType};
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, warn};

/// 每周工作天数
pub const WORKING_DAYS_PER_WEEK: i32 = 6;

// ==========================================
// 阶段模板 (固定查找表)
// ==========================================
struct PhaseTemplate {
    name: PhaseName,
    /// 工期占比; None 表示吸收余量
    timeline_share: Option<f64>,
    /// (工种, 每人负担面积 sq ft)
    crews: &'static [(WorkerType, f64)],
}

const PHASE_TEMPLATES: [PhaseTemplate; 4] = [
    PhaseTemplate {
        name: PhaseName::Foundation,
        timeline_share: Some(0.25),
        crews: &[(WorkerType::Mason, 500.0), (WorkerType::Labor, 300.0)],
    },
    PhaseTemplate {
        name: PhaseName::Structure,
        timeline_share: Some(0.35),
        crews: &[(WorkerType::Mason, 400.0), (WorkerType::Labor, 250.0)],
    },
    PhaseTemplate {
        name: PhaseName::Roofing,
        timeline_share: Some(0.15),
        crews: &[(WorkerType::Mason, 600.0), (WorkerType::Labor, 400.0)],
    },
    PhaseTemplate {
        name: PhaseName::Finishing,
        timeline_share: None,
        crews: &[
            (WorkerType::Mason, 500.0),
            (WorkerType::Electrician, 800.0),
            (WorkerType::Plumber, 800.0),
            (WorkerType::Labor, 350.0),
        ],
    },
];

// ==========================================
// PhasePlanner - 阶段与人工规划引擎
// ==========================================
pub struct PhasePlanner {
    // 无状态引擎
}

impl PhasePlanner {
    pub fn new() -> Self {
        Self {}
    }

    /// 切分总工期
    ///
    /// # 返回
    /// 四个阶段的周数, 和恒等于 `timeline`; 收尾阶段可能 <= 0
    pub fn split_timeline(&self, timeline: i32) -> [i32; 4] {
        let mut durations = [0i32; 4];
        let mut allocated = 0;

        for (idx, template) in PHASE_TEMPLATES.iter().enumerate() {
            durations[idx] = match template.timeline_share {
                Some(share) => (f64::from(timeline) * share).ceil() as i32,
                None => timeline - allocated,
            };
            allocated += durations[idx];
        }

        durations
    }

    /// 计算施工阶段
    ///
    /// 收尾阶段工期 <= 0 时仍输出该阶段 (退化但非致命),
    /// 由 `ensure_schedulable` 在排程前拦截负工期
    ///
    /// # 返回
    /// - Err(InvalidInput): 工期过大, 人工天数或周号超出 i32 范围
    pub fn compute_phases(
        &self,
        inputs: &ProjectInputs,
        config: &CostConfig,
    ) -> EngineResult<Vec<Phase>> {
        let total_area = inputs.total_area();
        let durations = self.split_timeline(inputs.project_timeline);

        let mut phases = Vec::with_capacity(PHASE_TEMPLATES.len());
        let mut start_week = 1;

        for (template, duration_weeks) in PHASE_TEMPLATES.iter().zip(durations) {
            let days_required = duration_weeks
                .checked_mul(WORKING_DAYS_PER_WEEK)
                .ok_or_else(|| timeline_overflow(inputs.project_timeline))?;

            let labor_allocations: Vec<LaborAllocation> = template
                .crews
                .iter()
                .map(|(worker_type, area_per_worker)| {
                    let quantity = (total_area / area_per_worker).ceil() as i64;
                    LaborAllocation {
                        worker_type: *worker_type,
                        quantity,
                        days_required,
                        cost: quantity as f64
                            * f64::from(days_required)
                            * config.wage_for(*worker_type),
                    }
                })
                .collect();

            let cost_estimate = labor_allocations.iter().map(|l| l.cost).sum();

            if duration_weeks <= 0 {
                warn!(
                    phase = %template.name,
                    duration_weeks = duration_weeks,
                    project_timeline = inputs.project_timeline,
                    "阶段工期非正, 前序阶段取整已占满总工期"
                );
            }

            phases.push(Phase {
                name: template.name,
                order: template.name.order(),
                start_week,
                duration_weeks,
                cost_estimate,
                labor_allocations,
            });

            start_week = start_week
                .checked_add(duration_weeks)
                .ok_or_else(|| timeline_overflow(inputs.project_timeline))?;
        }

        debug!(
            durations = ?durations,
            labor_cost = phases.iter().map(|p| p.cost_estimate).sum::<f64>(),
            "阶段规划完成"
        );

        Ok(phases)
    }

    /// 排程前校验: 不允许负工期阶段
    ///
    /// 工期为 0 的阶段允许通过 (不产生周计划条目)
    pub fn ensure_schedulable(&self, phases: &[Phase]) -> EngineResult<()> {
        match phases.iter().find(|p| p.duration_weeks < 0) {
            Some(phase) => Err(EngineError::DegenerateSchedule {
                phase: phase.name.to_string(),
                duration_weeks: phase.duration_weeks,
            }),
            None => Ok(()),
        }
    }
}

fn timeline_overflow(project_timeline: i32) -> EngineError {
    EngineError::invalid_input(
        "project_timeline",
        format!("工期过大, 人工天数超出范围: {}", project_timeline),
    )
}

impl Default for PhasePlanner {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn plan(area: f64, floors: u32, timeline: i32) -> Vec<Phase> {
        PhasePlanner::new()
            .compute_phases(
                &ProjectInputs::new(area, floors, timeline),
                &CostConfig::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_split_24_weeks() {
        let planner = PhasePlanner::new();
        assert_eq!(planner.split_timeline(24), [6, 9, 4, 5]);
    }

    #[test]
    fn test_durations_sum_to_timeline() {
        let planner = PhasePlanner::new();
        for timeline in 1..=120 {
            let durations = planner.split_timeline(timeline);
            assert_eq!(durations.iter().sum::<i32>(), timeline, "timeline={}", timeline);
        }
    }

    #[test]
    fn test_start_weeks_contiguous() {
        let phases = plan(1000.0, 2, 24);

        let starts: Vec<i32> = phases.iter().map(|p| p.start_week).collect();
        assert_eq!(starts, vec![1, 7, 16, 20]);

        for pair in phases.windows(2) {
            assert_eq!(pair[1].start_week, pair[0].start_week + pair[0].duration_weeks);
        }

        let orders: Vec<i32> = phases.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_foundation_crew_and_cost() {
        let phases = plan(1000.0, 2, 24);
        let foundation = &phases[0];

        assert_eq!(foundation.name, PhaseName::Foundation);
        // 2000 / 500 = 4 瓦工, 2000 / 300 = 6.67 → 7 普工
        let mason = &foundation.labor_allocations[0];
        assert_eq!(mason.worker_type, WorkerType::Mason);
        assert_eq!(mason.quantity, 4);
        assert_eq!(mason.days_required, 36);
        assert_eq!(mason.cost, 4.0 * 36.0 * 800.0);

        let labor = &foundation.labor_allocations[1];
        assert_eq!(labor.quantity, 7);
        assert_eq!(labor.cost, 7.0 * 36.0 * 600.0);

        assert_eq!(foundation.cost_estimate, mason.cost + labor.cost);
    }

    #[test]
    fn test_finishing_has_four_trades() {
        let phases = plan(1000.0, 2, 24);
        let finishing = &phases[3];

        let trades: Vec<WorkerType> = finishing
            .labor_allocations
            .iter()
            .map(|l| l.worker_type)
            .collect();
        assert_eq!(
            trades,
            vec![
                WorkerType::Mason,
                WorkerType::Electrician,
                WorkerType::Plumber,
                WorkerType::Labor
            ]
        );
        // 2000 / 800 = 2.5 → 3
        assert_eq!(finishing.labor_allocations[1].quantity, 3);
        assert_eq!(finishing.duration_weeks, 5);
    }

    #[test]
    fn test_short_timeline_yields_negative_finishing() {
        let planner = PhasePlanner::new();
        let phases = plan(1000.0, 1, 3);

        assert_eq!(phases[3].duration_weeks, -1);
        assert_eq!(
            planner.ensure_schedulable(&phases),
            Err(EngineError::DegenerateSchedule {
                phase: "Finishing".to_string(),
                duration_weeks: -1,
            })
        );
    }

    #[test]
    fn test_zero_finishing_is_schedulable() {
        let planner = PhasePlanner::new();
        let phases = plan(1000.0, 1, 4);

        assert_eq!(phases[3].duration_weeks, 0);
        assert_eq!(phases[3].cost_estimate, 0.0);
        assert!(planner.ensure_schedulable(&phases).is_ok());
    }

    #[test]
    fn test_huge_timeline_is_rejected_not_overflowed() {
        let result = PhasePlanner::new().compute_phases(
            &ProjectInputs::new(1000.0, 2, i32::MAX),
            &CostConfig::default(),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "project_timeline"
        ));
    }
}
