// ==========================================
// 住宅建造估算系统 - 项目领域模型
// ==========================================
// ProjectInputs: 单次计算的三项输入 (不可变)
// Project: 持久化的项目记录 (归属用户)
// ==========================================

use crate::domain::types::ProjectStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ProjectInputs - 项目输入
// ==========================================
// 工期单位统一为"周"; 仅人工天数按 周×6 换算
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    pub built_up_area: f64,    // 单层建筑面积 (sq ft)
    pub number_of_floors: u32, // 楼层数
    pub project_timeline: i32, // 总工期 (周)
}

impl ProjectInputs {
    pub fn new(built_up_area: f64, number_of_floors: u32, project_timeline: i32) -> Self {
        Self {
            built_up_area,
            number_of_floors,
            project_timeline,
        }
    }

    /// 总建筑面积 = 单层面积 × 楼层数
    pub fn total_area(&self) -> f64 {
        self.built_up_area * f64::from(self.number_of_floors)
    }
}

// ==========================================
// Project - 项目记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,              // 项目ID (UUID)
    pub user_id: String,         // 归属用户
    pub project_name: String,    // 项目名称

    // ===== 输入 =====
    pub built_up_area: f64,
    pub number_of_floors: u32,
    pub project_timeline: i32,

    // ===== 结果 =====
    pub total_cost: f64,         // 材料 + 人工
    pub status: ProjectStatus,

    // ===== 元数据 =====
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Project {
    pub fn inputs(&self) -> ProjectInputs {
        ProjectInputs::new(
            self.built_up_area,
            self.number_of_floors,
            self.project_timeline,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_area_multiplies_floors() {
        let inputs = ProjectInputs::new(1000.0, 2, 24);
        assert_eq!(inputs.total_area(), 2000.0);
    }
}
