// ==========================================
// 住宅建造估算系统 - 材料估算引擎
// ==========================================
// 输入: 项目输入 + 费率配置
// 输出: 固定 5 项材料需求 (Cement, Steel, Sand, Aggregate, Bricks)
// ==========================================
// 规则: 数量 = ceil(总面积 × 单位用量)
//       费用 = 数量 × 单价; 砖按每千块计价, 数量不缩放
// ==========================================

use crate::config::CostConfig;
use crate::domain::material::MaterialRequirement;
use crate::domain::project::ProjectInputs;
use crate::domain::types::MaterialKind;
use tracing::debug;

// ==========================================
// MaterialEstimator - 材料估算引擎
// ==========================================
pub struct MaterialEstimator {
    // 无状态引擎
}

impl MaterialEstimator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算材料需求
    ///
    /// # 返回
    /// 按固定顺序排列的 5 项材料
    pub fn compute_materials(
        &self,
        inputs: &ProjectInputs,
        config: &CostConfig,
    ) -> Vec<MaterialRequirement> {
        let total_area = inputs.total_area();

        let materials: Vec<MaterialRequirement> = MaterialKind::ALL
            .iter()
            .map(|kind| self.estimate(*kind, total_area, config))
            .collect();

        debug!(
            total_area = total_area,
            material_cost = materials.iter().map(|m| m.cost).sum::<f64>(),
            "材料估算完成"
        );

        materials
    }

    fn estimate(
        &self,
        kind: MaterialKind,
        total_area: f64,
        config: &CostConfig,
    ) -> MaterialRequirement {
        let quantity = (total_area * kind.yield_per_sq_ft()).ceil() as i64;
        let rate = config.rate_for(kind);

        let cost = match kind {
            MaterialKind::Bricks => (quantity as f64 / 1000.0) * rate,
            _ => quantity as f64 * rate,
        };

        MaterialRequirement {
            material_name: kind.as_str().to_string(),
            quantity,
            unit: kind.unit().to_string(),
            cost,
            phase: kind.phase_label().to_string(),
        }
    }
}

impl Default for MaterialEstimator {
    fn default() -> Self {
        Self::new()
    }
}
