// ==========================================
// 住宅建造估算系统 - 成本汇总引擎
// ==========================================
// 输出: 材料成本 + 人工成本 = 总成本
// 纯求和, 不做额外取整
// ==========================================

use crate::domain::cost::CostBreakdown;
use crate::domain::material::MaterialRequirement;
use crate::domain::phase::Phase;
use tracing::debug;

pub struct CostAggregator {
    // 无状态引擎
}

impl CostAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总成本
    pub fn compute_cost_breakdown(
        &self,
        materials: &[MaterialRequirement],
        phases: &[Phase],
    ) -> CostBreakdown {
        let material_cost: f64 = materials.iter().map(|m| m.cost).sum();
        let labor_cost: f64 = phases.iter().map(|p| p.labor_cost()).sum();

        debug!(
            material_cost = material_cost,
            labor_cost = labor_cost,
            "成本汇总完成"
        );

        CostBreakdown {
            material_cost,
            labor_cost,
            total_cost: material_cost + labor_cost,
        }
    }
}

impl Default for CostAggregator {
    fn default() -> Self {
        Self::new()
    }
}
