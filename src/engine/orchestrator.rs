// ==========================================
// 住宅建造估算系统 - 引擎编排器
// ==========================================
// 用途: 按固定顺序串联各计算引擎
// 流程: 输入校验 → 材料 → 阶段 → 负工期拦截 → 成本 → 周计划 → 户型
// ==========================================

use crate::config::CostConfig;
use crate::domain::cost::CostBreakdown;
use crate::domain::layout::LayoutSuggestion;
use crate::domain::material::MaterialRequirement;
use crate::domain::phase::Phase;
use crate::domain::project::ProjectInputs;
use crate::domain::schedule::WeeklyScheduleEntry;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::{
    CostAggregator, LayoutGenerator, MaterialEstimator, PhasePlanner, ScheduleGenerator,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 建筑面积上限 (平方英尺)
pub const MAX_BUILT_UP_AREA: f64 = 1.0e9;
/// 楼层数上限
pub const MAX_NUMBER_OF_FLOORS: u32 = 500;
/// 工期上限 (周, 约 100 年)
pub const MAX_PROJECT_TIMELINE: i32 = 5_200;

// ==========================================
// EstimateReport - 完整估算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    pub inputs: ProjectInputs,
    pub config: CostConfig,
    pub total_area: f64,

    pub materials: Vec<MaterialRequirement>,
    pub phases: Vec<Phase>,
    pub cost: CostBreakdown,
    pub schedule: Vec<WeeklyScheduleEntry>,
    pub layouts: Vec<LayoutSuggestion>,

    /// 非致命提示 (如工期为 0 的阶段)
    pub warnings: Vec<String>,
}

// ==========================================
// EstimationOrchestrator - 引擎编排器
// ==========================================
pub struct EstimationOrchestrator {
    materials: MaterialEstimator,
    planner: PhasePlanner,
    aggregator: CostAggregator,
    scheduler: ScheduleGenerator,
    layouts: LayoutGenerator,
}

impl EstimationOrchestrator {
    pub fn new() -> Self {
        Self {
            materials: MaterialEstimator::new(),
            planner: PhasePlanner::new(),
            aggregator: CostAggregator::new(),
            scheduler: ScheduleGenerator::new(),
            layouts: LayoutGenerator::new(),
        }
    }

    /// 校验项目输入
    ///
    /// 面积必须为有限正数, 楼层数与工期必须为正, 三者均不得超过上限
    pub fn validate_inputs(inputs: &ProjectInputs) -> EngineResult<()> {
        if !inputs.built_up_area.is_finite() || inputs.built_up_area <= 0.0 {
            return Err(EngineError::invalid_input(
                "built_up_area",
                format!("建筑面积必须为正数, 实际为 {}", inputs.built_up_area),
            ));
        }
        if inputs.built_up_area > MAX_BUILT_UP_AREA {
            return Err(EngineError::invalid_input(
                "built_up_area",
                format!(
                    "建筑面积超出上限 {}, 实际为 {}",
                    MAX_BUILT_UP_AREA, inputs.built_up_area
                ),
            ));
        }
        if inputs.number_of_floors == 0 {
            return Err(EngineError::invalid_input(
                "number_of_floors",
                "楼层数必须为正整数",
            ));
        }
        if inputs.number_of_floors > MAX_NUMBER_OF_FLOORS {
            return Err(EngineError::invalid_input(
                "number_of_floors",
                format!(
                    "楼层数超出上限 {}, 实际为 {}",
                    MAX_NUMBER_OF_FLOORS, inputs.number_of_floors
                ),
            ));
        }
        if inputs.project_timeline <= 0 {
            return Err(EngineError::invalid_input(
                "project_timeline",
                format!("工期必须为正数, 实际为 {}", inputs.project_timeline),
            ));
        }
        if inputs.project_timeline > MAX_PROJECT_TIMELINE {
            return Err(EngineError::invalid_input(
                "project_timeline",
                format!(
                    "工期超出上限 {} 周, 实际为 {}",
                    MAX_PROJECT_TIMELINE, inputs.project_timeline
                ),
            ));
        }
        Ok(())
    }

    /// 执行完整估算
    ///
    /// # 返回
    /// - Err(InvalidInput): 输入或费率非法
    /// - Err(DegenerateSchedule): 工期过短, 收尾阶段为负
    pub fn estimate(
        &self,
        inputs: &ProjectInputs,
        config: &CostConfig,
    ) -> EngineResult<EstimateReport> {
        Self::validate_inputs(inputs)?;
        config.validate()?;

        info!(
            built_up_area = inputs.built_up_area,
            number_of_floors = inputs.number_of_floors,
            project_timeline = inputs.project_timeline,
            "开始执行估算流程"
        );

        // 步骤1: 材料估算
        let materials = self.materials.compute_materials(inputs, config);

        // 步骤2: 阶段与人工规划
        let phases = self.planner.compute_phases(inputs, config)?;
        self.planner.ensure_schedulable(&phases)?;

        let warnings: Vec<String> = phases
            .iter()
            .filter(|p| p.duration_weeks == 0)
            .map(|p| format!("{} 阶段工期为 0 周, 未安排周计划", p.name))
            .collect();

        // 步骤3: 成本汇总
        let cost = self.aggregator.compute_cost_breakdown(&materials, &phases);

        // 步骤4: 周计划
        let schedule = self.scheduler.generate_schedule(&phases, &materials)?;

        // 步骤5: 户型建议
        let layouts = self.layouts.generate_layouts(inputs);

        debug!(
            total_cost = cost.total_cost,
            weeks = schedule.len(),
            floors = layouts.len(),
            warnings = warnings.len(),
            "估算流程完成"
        );

        Ok(EstimateReport {
            inputs: *inputs,
            config: *config,
            total_area: inputs.total_area(),
            materials,
            phases,
            cost,
            schedule,
            layouts,
            warnings,
        })
    }
}

impl Default for EstimationOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_inputs() {
        let orchestrator = EstimationOrchestrator::new();
        let config = CostConfig::default();

        for inputs in [
            ProjectInputs::new(0.0, 2, 24),
            ProjectInputs::new(f64::NAN, 2, 24),
            ProjectInputs::new(1000.0, 0, 24),
            ProjectInputs::new(1000.0, 2, 0),
        ] {
            assert!(matches!(
                orchestrator.estimate(&inputs, &config),
                Err(EngineError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_oversized_inputs() {
        let orchestrator = EstimationOrchestrator::new();
        let config = CostConfig::default();

        let cases = [
            (ProjectInputs::new(1e300, 2, 24), "built_up_area"),
            (ProjectInputs::new(1000.0, 2, i32::MAX), "project_timeline"),
            (
                ProjectInputs::new(1000.0, 2, MAX_PROJECT_TIMELINE + 1),
                "project_timeline",
            ),
            (
                ProjectInputs::new(1000.0, MAX_NUMBER_OF_FLOORS + 1, 24),
                "number_of_floors",
            ),
            (ProjectInputs::new(1000.0, u32::MAX, 24), "number_of_floors"),
        ];
        for (inputs, expected) in cases {
            match orchestrator.estimate(&inputs, &config) {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidInput on {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_accepts_inputs_at_upper_bounds() {
        let inputs = ProjectInputs::new(
            MAX_BUILT_UP_AREA,
            MAX_NUMBER_OF_FLOORS,
            MAX_PROJECT_TIMELINE,
        );
        assert!(EstimationOrchestrator::validate_inputs(&inputs).is_ok());
    }

    #[test]
    fn test_rejects_invalid_rate() {
        let config = CostConfig {
            steel_rate: -1.0,
            ..CostConfig::default()
        };
        let result =
            EstimationOrchestrator::new().estimate(&ProjectInputs::new(1000.0, 2, 24), &config);
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "steel_rate"
        ));
    }

    #[test]
    fn test_zero_week_phase_reported_as_warning() {
        let report = EstimationOrchestrator::new()
            .estimate(&ProjectInputs::new(1000.0, 1, 4), &CostConfig::default())
            .unwrap();

        assert_eq!(report.schedule.len(), 4);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Finishing"));
    }
}
