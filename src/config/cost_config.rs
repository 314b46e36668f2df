// ==========================================
// 住宅建造估算系统 - 费率配置
// ==========================================
// 职责: 工种日薪 + 材料单价
// 红线: 默认配置为不可变值, 覆写通过 merge 生成新值, 不原地修改
// 存储: project_rate 表 (key-value, 见 config_keys)
// ==========================================

use crate::domain::types::{MaterialKind, WorkerType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// 费率配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("缺少费率配置: {key}")]
    Missing { key: String },

    #[error("费率必须为正数: {key}={value}")]
    NonPositiveRate { key: String, value: f64 },

    #[error("未知费率键: {0}")]
    UnknownKey(String),
}

// ==========================================
// 费率键
// ==========================================
pub mod config_keys {
    // 日薪
    pub const MASON_WAGE: &str = "mason_wage";
    pub const LABOR_WAGE: &str = "labor_wage";
    pub const ELECTRICIAN_WAGE: &str = "electrician_wage";
    pub const PLUMBER_WAGE: &str = "plumber_wage";

    // 材料单价
    pub const CEMENT_RATE: &str = "cement_rate";
    pub const STEEL_RATE: &str = "steel_rate";
    pub const SAND_RATE: &str = "sand_rate";
    pub const AGGREGATE_RATE: &str = "aggregate_rate";
    pub const BRICK_RATE: &str = "brick_rate"; // 每千块

    pub const ALL: [&str; 9] = [
        MASON_WAGE,
        LABOR_WAGE,
        ELECTRICIAN_WAGE,
        PLUMBER_WAGE,
        CEMENT_RATE,
        STEEL_RATE,
        SAND_RATE,
        AGGREGATE_RATE,
        BRICK_RATE,
    ];
}

// ==========================================
// CostConfig - 完整费率表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    // ===== 日薪 (每人每天) =====
    pub mason_wage: f64,
    pub labor_wage: f64,
    pub electrician_wage: f64,
    pub plumber_wage: f64,

    // ===== 材料单价 =====
    pub cement_rate: f64,    // 每袋
    pub steel_rate: f64,     // 每 kg
    pub sand_rate: f64,      // 每 m³
    pub aggregate_rate: f64, // 每 m³
    pub brick_rate: f64,     // 每千块
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            mason_wage: 800.0,
            labor_wage: 600.0,
            electrician_wage: 1000.0,
            plumber_wage: 1000.0,
            cement_rate: 400.0,
            steel_rate: 60.0,
            sand_rate: 1500.0,
            aggregate_rate: 1800.0,
            brick_rate: 6000.0,
        }
    }
}

impl CostConfig {
    /// 工种日薪
    pub fn wage_for(&self, worker_type: WorkerType) -> f64 {
        match worker_type {
            WorkerType::Mason => self.mason_wage,
            WorkerType::Labor => self.labor_wage,
            WorkerType::Electrician => self.electrician_wage,
            WorkerType::Plumber => self.plumber_wage,
        }
    }

    /// 材料单价 (砖为每千块)
    pub fn rate_for(&self, kind: MaterialKind) -> f64 {
        match kind {
            MaterialKind::Cement => self.cement_rate,
            MaterialKind::Steel => self.steel_rate,
            MaterialKind::Sand => self.sand_rate,
            MaterialKind::Aggregate => self.aggregate_rate,
            MaterialKind::Bricks => self.brick_rate,
        }
    }

    /// 叠加覆写, 返回新的配置
    pub fn merge(&self, overrides: &CostConfigOverride) -> CostConfig {
        CostConfig {
            mason_wage: overrides.mason_wage.unwrap_or(self.mason_wage),
            labor_wage: overrides.labor_wage.unwrap_or(self.labor_wage),
            electrician_wage: overrides.electrician_wage.unwrap_or(self.electrician_wage),
            plumber_wage: overrides.plumber_wage.unwrap_or(self.plumber_wage),
            cement_rate: overrides.cement_rate.unwrap_or(self.cement_rate),
            steel_rate: overrides.steel_rate.unwrap_or(self.steel_rate),
            sand_rate: overrides.sand_rate.unwrap_or(self.sand_rate),
            aggregate_rate: overrides.aggregate_rate.unwrap_or(self.aggregate_rate),
            brick_rate: overrides.brick_rate.unwrap_or(self.brick_rate),
        }
    }

    /// 校验全部费率为有限正数
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.to_rate_table() {
            check_rate(&key, value)?;
        }
        Ok(())
    }

    /// 从 key-value 费率表严格构造 (缺项即失败, 不回落默认值)
    pub fn from_rate_table(table: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        if let Some(unknown) = table
            .keys()
            .find(|k| !config_keys::ALL.contains(&k.as_str()))
        {
            return Err(ConfigError::UnknownKey(unknown.clone()));
        }

        let get = |key: &str| -> Result<f64, ConfigError> {
            let value = table.get(key).copied().ok_or_else(|| ConfigError::Missing {
                key: key.to_string(),
            })?;
            check_rate(key, value)?;
            Ok(value)
        };

        Ok(Self {
            mason_wage: get(config_keys::MASON_WAGE)?,
            labor_wage: get(config_keys::LABOR_WAGE)?,
            electrician_wage: get(config_keys::ELECTRICIAN_WAGE)?,
            plumber_wage: get(config_keys::PLUMBER_WAGE)?,
            cement_rate: get(config_keys::CEMENT_RATE)?,
            steel_rate: get(config_keys::STEEL_RATE)?,
            sand_rate: get(config_keys::SAND_RATE)?,
            aggregate_rate: get(config_keys::AGGREGATE_RATE)?,
            brick_rate: get(config_keys::BRICK_RATE)?,
        })
    }

    /// 导出为 key-value 费率表
    pub fn to_rate_table(&self) -> BTreeMap<String, f64> {
        [
            (config_keys::MASON_WAGE, self.mason_wage),
            (config_keys::LABOR_WAGE, self.labor_wage),
            (config_keys::ELECTRICIAN_WAGE, self.electrician_wage),
            (config_keys::PLUMBER_WAGE, self.plumber_wage),
            (config_keys::CEMENT_RATE, self.cement_rate),
            (config_keys::STEEL_RATE, self.steel_rate),
            (config_keys::SAND_RATE, self.sand_rate),
            (config_keys::AGGREGATE_RATE, self.aggregate_rate),
            (config_keys::BRICK_RATE, self.brick_rate),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

// ==========================================
// CostConfigOverride - 部分覆写
// ==========================================
// 未指定的字段沿用基础配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfigOverride {
    pub mason_wage: Option<f64>,
    pub labor_wage: Option<f64>,
    pub electrician_wage: Option<f64>,
    pub plumber_wage: Option<f64>,
    pub cement_rate: Option<f64>,
    pub steel_rate: Option<f64>,
    pub sand_rate: Option<f64>,
    pub aggregate_rate: Option<f64>,
    pub brick_rate: Option<f64>,
}

impl CostConfigOverride {
    fn entries(&self) -> [(&'static str, Option<f64>); 9] {
        [
            (config_keys::MASON_WAGE, self.mason_wage),
            (config_keys::LABOR_WAGE, self.labor_wage),
            (config_keys::ELECTRICIAN_WAGE, self.electrician_wage),
            (config_keys::PLUMBER_WAGE, self.plumber_wage),
            (config_keys::CEMENT_RATE, self.cement_rate),
            (config_keys::STEEL_RATE, self.steel_rate),
            (config_keys::SAND_RATE, self.sand_rate),
            (config_keys::AGGREGATE_RATE, self.aggregate_rate),
            (config_keys::BRICK_RATE, self.brick_rate),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_none())
    }

    /// 校验已指定的费率
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.entries() {
            if let Some(value) = value {
                check_rate(key, value)?;
            }
        }
        Ok(())
    }
}

fn check_rate(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositiveRate {
            key: key.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let config = CostConfig::default();
        assert_eq!(config.wage_for(WorkerType::Mason), 800.0);
        assert_eq!(config.wage_for(WorkerType::Plumber), 1000.0);
        assert_eq!(config.rate_for(MaterialKind::Bricks), 6000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_leaves_base_untouched() {
        let base = CostConfig::default();
        let overrides = CostConfigOverride {
            cement_rate: Some(450.0),
            labor_wage: Some(650.0),
            ..Default::default()
        };

        let merged = base.merge(&overrides);

        assert_eq!(merged.cement_rate, 450.0);
        assert_eq!(merged.labor_wage, 650.0);
        assert_eq!(merged.steel_rate, base.steel_rate);
        assert_eq!(base, CostConfig::default());
    }

    #[test]
    fn test_override_rejects_non_positive() {
        let overrides = CostConfigOverride {
            sand_rate: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            overrides.validate(),
            Err(ConfigError::NonPositiveRate {
                key: "sand_rate".to_string(),
                value: 0.0
            })
        );
        assert!(CostConfigOverride::default().is_empty());
    }

    #[test]
    fn test_override_from_partial_json() {
        let overrides: CostConfigOverride =
            serde_json::from_str(r#"{"steel_rate": 72.5}"#).unwrap();
        assert_eq!(overrides.steel_rate, Some(72.5));
        assert!(overrides.mason_wage.is_none());

        let unknown = serde_json::from_str::<CostConfigOverride>(r#"{"tile_rate": 10}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_rate_table_roundtrip_and_missing_key() {
        let config = CostConfig::default();
        let mut table = config.to_rate_table();
        assert_eq!(CostConfig::from_rate_table(&table), Ok(config));

        table.remove(config_keys::BRICK_RATE);
        assert_eq!(
            CostConfig::from_rate_table(&table),
            Err(ConfigError::Missing {
                key: "brick_rate".to_string()
            })
        );
    }
}
