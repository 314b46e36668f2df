// ==========================================
// 住宅建造估算系统 - 工期压缩模拟引擎
// ==========================================
// 输入: 原工期, 目标工期, 原总成本
// 输出: 新成本 / 成本增幅 / 人力增幅 / 风险提示
// ==========================================
// 规则: 压缩比 = 目标 / 原工期, 人力倍数 = 1 / 压缩比
//       加班成本 = 原成本 × 0.3 × (1 - 压缩比)
//       增员成本 = 原成本 × 0.4 × (人力倍数 - 1)
// 注: 目标 >= 原工期时不报错, 结果视为"未压缩"
// ==========================================

use crate::domain::cost::CompressionResult;
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, warn};

const OVERTIME_FACTOR: f64 = 0.3;
const EXTRA_WORKFORCE_FACTOR: f64 = 0.4;

/// 压缩比低于此值: 严重风险
pub const SEVERE_RATIO: f64 = 0.7;
/// 压缩比低于此值: 中等风险
pub const MODERATE_RATIO: f64 = 0.85;
/// 人力倍数高于此值: 现场拥挤风险
pub const CONGESTION_MULTIPLIER: f64 = 1.5;

pub const SEVERE_RISKS: [&str; 3] = [
    "Severe timeline compression may compromise quality",
    "Worker fatigue and safety concerns",
    "Material procurement challenges",
];

pub const MODERATE_RISKS: [&str; 3] = [
    "Moderate risk of quality issues",
    "Increased overtime requirements",
    "Coordination complexity increases",
];

pub const CONGESTION_RISKS: [&str; 2] = [
    "Significant workforce increase required",
    "Site congestion and management challenges",
];

// ==========================================
// CompressionSimulator - 工期压缩模拟引擎
// ==========================================
pub struct CompressionSimulator {
    // 无状态引擎
}

impl CompressionSimulator {
    pub fn new() -> Self {
        Self {}
    }

    /// 模拟工期压缩
    ///
    /// # 返回
    /// - Err(InvalidInput): 工期非正 / 成本非有限或为负
    /// - Err(DivisionByZero): 原成本为 0
    pub fn simulate_compression(
        &self,
        original_timeline: i32,
        new_timeline: i32,
        original_cost: f64,
    ) -> EngineResult<CompressionResult> {
        if original_timeline <= 0 {
            return Err(EngineError::invalid_input(
                "original_timeline",
                format!("原工期必须为正数, 实际为 {}", original_timeline),
            ));
        }
        if new_timeline <= 0 {
            return Err(EngineError::invalid_input(
                "new_timeline",
                format!("目标工期必须为正数, 实际为 {}", new_timeline),
            ));
        }
        if !original_cost.is_finite() || original_cost < 0.0 {
            return Err(EngineError::invalid_input(
                "original_cost",
                format!("原成本必须为非负有限数, 实际为 {}", original_cost),
            ));
        }
        if original_cost == 0.0 {
            warn!("原成本为 0, 无法计算成本增幅");
            return Err(EngineError::DivisionByZero {
                context: "percentage_increase = cost_increase / original_cost".to_string(),
            });
        }

        if new_timeline >= original_timeline {
            warn!(
                original_timeline = original_timeline,
                new_timeline = new_timeline,
                "目标工期未缩短, 视为未压缩"
            );
        }

        let compression_ratio = f64::from(new_timeline) / f64::from(original_timeline);
        let workforce_multiplier = 1.0 / compression_ratio;
        let efficiency_loss = 1.0 - compression_ratio;

        let overtime_cost = original_cost * OVERTIME_FACTOR * efficiency_loss;
        let additional_workforce_cost =
            original_cost * EXTRA_WORKFORCE_FACTOR * (workforce_multiplier - 1.0);

        let new_cost = original_cost + overtime_cost + additional_workforce_cost;
        let cost_increase = new_cost - original_cost;
        let percentage_increase = cost_increase / original_cost * 100.0;

        let risks = self.assess_risks(compression_ratio, workforce_multiplier);

        debug!(
            compression_ratio = compression_ratio,
            workforce_multiplier = workforce_multiplier,
            cost_increase = cost_increase,
            risks = risks.len(),
            "工期压缩模拟完成"
        );

        Ok(CompressionResult {
            new_cost,
            cost_increase,
            percentage_increase,
            workforce_increase: (workforce_multiplier - 1.0) * 100.0,
            risks,
        })
    }

    /// 风险提示: 压缩比分档 + 人力倍数独立追加
    fn assess_risks(&self, compression_ratio: f64, workforce_multiplier: f64) -> Vec<String> {
        let mut risks: Vec<String> = Vec::new();

        if compression_ratio < SEVERE_RATIO {
            risks.extend(SEVERE_RISKS.iter().map(|r| r.to_string()));
        } else if compression_ratio < MODERATE_RATIO {
            risks.extend(MODERATE_RISKS.iter().map(|r| r.to_string()));
        }

        if workforce_multiplier > CONGESTION_MULTIPLIER {
            risks.extend(CONGESTION_RISKS.iter().map(|r| r.to_string()));
        }

        risks
    }
}

impl Default for CompressionSimulator {
    fn default() -> Self {
        Self::new()
    }
}
