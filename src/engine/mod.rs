// ==========================================
// 住宅建造估算系统 - 引擎层
// ==========================================
// 职责: 纯计算引擎, 无 I/O, 无共享可变状态
// 红线: Engine 不拼 SQL, 不调用外部服务
// ==========================================

pub mod compression;
pub mod cost_aggregator;
pub mod error;
pub mod layout_generator;
pub mod material_estimator;
pub mod orchestrator;
pub mod phase_planner;
pub mod schedule_generator;

// 重导出核心引擎
pub use compression::CompressionSimulator;
pub use cost_aggregator::CostAggregator;
pub use error::{EngineError, EngineResult};
pub use layout_generator::LayoutGenerator;
pub use material_estimator::MaterialEstimator;
pub use orchestrator::{EstimateReport, EstimationOrchestrator};
pub use phase_planner::PhasePlanner;
pub use schedule_generator::{week_tasks, ScheduleGenerator};
