// ==========================================
// 住宅建造估算系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、固定类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod cost;
pub mod layout;
pub mod material;
pub mod phase;
pub mod project;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use cost::{CompressionResult, CostBreakdown};
pub use layout::{LayoutConfig, LayoutSuggestion};
pub use material::MaterialRequirement;
pub use phase::{LaborAllocation, Phase};
pub use project::{Project, ProjectInputs};
pub use schedule::WeeklyScheduleEntry;
pub use types::{FloorPosition, MaterialKind, PhaseName, ProjectStatus, WorkerType};
