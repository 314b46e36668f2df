// ==========================================
// 住宅建造估算系统 - 施工阶段领域模型
// ==========================================
// 四个阶段无间隙、无重叠地划分总工期
// 阶段成本仅含人工; 材料成本按材料单独统计
// ==========================================

use crate::domain::types::{PhaseName, WorkerType};
use serde::{Deserialize, Serialize};

// ==========================================
// LaborAllocation - 人工配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborAllocation {
    pub worker_type: WorkerType,
    pub quantity: i64,      // 班组人数 (向上取整)
    pub days_required: i32, // 工作天数 = 阶段周数 × 6
    pub cost: f64,          // 人数 × 天数 × 日薪
}

// ==========================================
// Phase - 施工阶段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: PhaseName,
    pub order: i32,          // 1-4
    pub start_week: i32,     // 起始周 (从 1 开始)
    pub duration_weeks: i32, // 持续周数 (收尾阶段可能 <= 0, 见 PhasePlanner)
    pub cost_estimate: f64,  // 人工成本合计
    pub labor_allocations: Vec<LaborAllocation>,
}

impl Phase {
    pub fn labor_cost(&self) -> f64 {
        self.labor_allocations.iter().map(|l| l.cost).sum()
    }
}
