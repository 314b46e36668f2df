// ==========================================
// 住宅建造估算系统 - 材料需求领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MaterialRequirement - 材料需求
// ==========================================
// 派生值: 由总面积和单价计算, 不单独修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub material_name: String, // 材料名称
    pub quantity: i64,         // 数量 (向上取整)
    pub unit: String,          // 单位
    pub cost: f64,             // 费用
    pub phase: String,         // 阶段标签 (如 "Foundation & Structure")
}

impl MaterialRequirement {
    /// 阶段标签是否覆盖指定阶段 (子串匹配)
    pub fn applies_to(&self, phase_name: &str) -> bool {
        self.phase.contains(phase_name)
    }
}
