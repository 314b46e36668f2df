// ==========================================
// 住宅建造估算系统 - 成本与工期压缩领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CostBreakdown - 成本汇总
// ==========================================
// 每次调用重新计算, 不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64, // material_cost + labor_cost
}

// ==========================================
// CompressionResult - 工期压缩模拟结果
// ==========================================
// 临时结果, 按需计算, 不持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub new_cost: f64,
    pub cost_increase: f64,
    pub percentage_increase: f64, // 成本增幅 (%)
    pub workforce_increase: f64,  // 人力增幅 (%)
    pub risks: Vec<String>,       // 风险提示 (有序)
}
