// ==========================================
// 估算引擎集成测试
// ==========================================
// 测试目标: 材料 → 阶段 → 成本 → 周计划 → 户型 全流程
// 基准项目: 1000 sq ft × 2 层, 24 周, 默认费率
// ==========================================

mod test_helpers;

use construction_planner::config::{CostConfig, CostConfigOverride};
use construction_planner::domain::{FloorPosition, PhaseName, ProjectInputs, WorkerType};
use construction_planner::engine::{EngineError, EstimationOrchestrator, LayoutGenerator};
use construction_planner::logging;
use test_helpers::assert_close;

fn estimate(area: f64, floors: u32, timeline: i32) -> construction_planner::EstimateReport {
    EstimationOrchestrator::new()
        .estimate(
            &ProjectInputs::new(area, floors, timeline),
            &CostConfig::default(),
        )
        .expect("estimate should succeed")
}

#[test]
fn test_reference_project_costs() {
    logging::init_test();

    let report = estimate(1000.0, 2, 24);

    assert_close(report.total_area, 2000.0);
    assert_close(report.cost.material_cost, 1_262_000.0);
    // Foundation 266400 + Structure 475200 + Roofing 148800 + Finishing 384000
    assert_close(report.cost.labor_cost, 1_274_400.0);
    assert_close(report.cost.total_cost, 2_536_400.0);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_reference_project_phases() {
    let report = estimate(1000.0, 2, 24);

    let names: Vec<PhaseName> = report.phases.iter().map(|p| p.name).collect();
    assert_eq!(names, PhaseName::ALL.to_vec());

    let durations: Vec<i32> = report.phases.iter().map(|p| p.duration_weeks).collect();
    assert_eq!(durations, vec![6, 9, 4, 5]);

    let starts: Vec<i32> = report.phases.iter().map(|p| p.start_week).collect();
    assert_eq!(starts, vec![1, 7, 16, 20]);

    let finishing = &report.phases[3];
    let crew: Vec<(WorkerType, i64)> = finishing
        .labor_allocations
        .iter()
        .map(|l| (l.worker_type, l.quantity))
        .collect();
    assert_eq!(
        crew,
        vec![
            (WorkerType::Mason, 4),
            (WorkerType::Electrician, 3),
            (WorkerType::Plumber, 3),
            (WorkerType::Labor, 6),
        ]
    );
    assert!(finishing.labor_allocations.iter().all(|l| l.days_required == 30));

    for phase in &report.phases {
        assert_close(phase.cost_estimate, phase.labor_cost());
    }
}

#[test]
fn test_schedule_is_contiguous_and_tracks_phases() {
    let report = estimate(1000.0, 2, 24);

    assert_eq!(report.schedule.len(), 24);
    for (idx, entry) in report.schedule.iter().enumerate() {
        assert_eq!(entry.week_number, idx as i32 + 1);
        assert_eq!(entry.tasks.len(), 3);
    }

    // 第 7 周为主体结构第一周
    let week7 = &report.schedule[6];
    assert_eq!(week7.phase_name, "Structure");
    assert_eq!(week7.tasks[0], "Column reinforcement");
    assert_eq!(week7.workforce_required.get("Mason"), Some(&5));
    assert_eq!(week7.materials_needed.get("Steel"), Some(&889));

    // 屋面阶段不匹配任何材料标签
    assert!(report.schedule[15].materials_needed.is_empty());
    assert_eq!(report.schedule[15].phase_name, "Roofing");

    // 收尾阶段第 5 周超出任务表, 取最后一项
    let last = &report.schedule[23];
    assert_eq!(last.phase_name, "Finishing");
    assert_eq!(last.tasks[0], "Quality inspection");
    assert_eq!(last.materials_needed.get("Bricks"), Some(&3200));
}

#[test]
fn test_layouts_follow_floor_positions() {
    let report = estimate(1000.0, 3, 24);
    let generator = LayoutGenerator::new();

    assert_eq!(report.layouts.len(), 3);
    let floors: Vec<u32> = report.layouts.iter().map(|l| l.floor_number).collect();
    assert_eq!(floors, vec![1, 2, 3]);

    assert_eq!(report.layouts[0].layout_config.balconies, 0);
    assert_eq!(report.layouts[0].layout_config.bedrooms, 3);
    assert_eq!(report.layouts[1].layout_config.balconies, 1);

    assert_eq!(
        report.layouts[0].suggestions,
        generator.suggestion_text(FloorPosition::Ground)
    );
    assert_eq!(
        report.layouts[1].suggestions,
        generator.suggestion_text(FloorPosition::Middle)
    );
    assert_eq!(
        report.layouts[2].suggestions,
        generator.suggestion_text(FloorPosition::Top)
    );

    for layout in &report.layouts {
        assert_eq!(layout.total_rooms, layout.layout_config.total_rooms());
    }
}

#[test]
fn test_estimate_is_deterministic() {
    let first = serde_json::to_value(estimate(1350.0, 4, 37)).unwrap();
    let second = serde_json::to_value(estimate(1350.0, 4, 37)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rate_override_changes_only_affected_costs() {
    let orchestrator = EstimationOrchestrator::new();
    let inputs = ProjectInputs::new(1000.0, 2, 24);
    let config = CostConfig::default().merge(&CostConfigOverride {
        cement_rate: Some(450.0),
        ..Default::default()
    });

    let report = orchestrator.estimate(&inputs, &config).unwrap();

    // 800 袋 × 50 的差价
    assert_close(report.cost.material_cost, 1_302_000.0);
    assert_close(report.cost.labor_cost, 1_274_400.0);
}

#[test]
fn test_short_timelines() {
    // 4 周: 收尾阶段 0 周, 记为警告
    let report = estimate(1000.0, 1, 4);
    let durations: Vec<i32> = report.phases.iter().map(|p| p.duration_weeks).collect();
    assert_eq!(durations, vec![1, 2, 1, 0]);
    assert_eq!(report.schedule.len(), 4);
    assert_eq!(report.warnings.len(), 1);

    // 3 周: 收尾阶段为负, 拒绝排程
    let result = EstimationOrchestrator::new().estimate(
        &ProjectInputs::new(1000.0, 1, 3),
        &CostConfig::default(),
    );
    assert_eq!(
        result.err(),
        Some(EngineError::DegenerateSchedule {
            phase: "Finishing".to_string(),
            duration_weeks: -1,
        })
    );
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let orchestrator = EstimationOrchestrator::new();
    let config = CostConfig::default();

    for inputs in [
        ProjectInputs::new(0.0, 2, 24),
        ProjectInputs::new(1000.0, 0, 24),
        ProjectInputs::new(1000.0, 2, 0),
        ProjectInputs::new(f64::NAN, 2, 24),
    ] {
        assert!(matches!(
            orchestrator.estimate(&inputs, &config),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
