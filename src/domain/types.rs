// ==========================================
// 住宅建造估算系统 - 领域类型定义
// ==========================================
// 固定集合: 施工阶段 / 工种 / 材料 / 楼层位置 / 项目状态
// 序列化格式与数据库存储一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 施工阶段 (Phase Name)
// ==========================================
// 固定顺序: Foundation → Structure → Roofing → Finishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    Foundation, // 基础
    Structure,  // 主体结构
    Roofing,    // 屋面
    Finishing,  // 装修收尾
}

impl PhaseName {
    /// 全部阶段 (按施工顺序)
    pub const ALL: [PhaseName; 4] = [
        PhaseName::Foundation,
        PhaseName::Structure,
        PhaseName::Roofing,
        PhaseName::Finishing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseName::Foundation => "Foundation",
            PhaseName::Structure => "Structure",
            PhaseName::Roofing => "Roofing",
            PhaseName::Finishing => "Finishing",
        }
    }

    /// 阶段序号 (1-4)
    pub fn order(&self) -> i32 {
        match self {
            PhaseName::Foundation => 1,
            PhaseName::Structure => 2,
            PhaseName::Roofing => 3,
            PhaseName::Finishing => 4,
        }
    }

    /// 从存储字符串解析 (未知名称返回 None)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Foundation" => Some(PhaseName::Foundation),
            "Structure" => Some(PhaseName::Structure),
            "Roofing" => Some(PhaseName::Roofing),
            "Finishing" => Some(PhaseName::Finishing),
            _ => None,
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 工种 (Worker Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkerType {
    Mason,       // 瓦工
    Labor,       // 普工
    Electrician, // 电工
    Plumber,     // 水管工
}

impl WorkerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerType::Mason => "Mason",
            WorkerType::Labor => "Labor",
            WorkerType::Electrician => "Electrician",
            WorkerType::Plumber => "Plumber",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Mason" => Some(WorkerType::Mason),
            "Labor" => Some(WorkerType::Labor),
            "Electrician" => Some(WorkerType::Electrician),
            "Plumber" => Some(WorkerType::Plumber),
            _ => None,
        }
    }
}

impl fmt::Display for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 材料种类 (Material Kind)
// ==========================================
// 输出顺序固定: Cement, Steel, Sand, Aggregate, Bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Cement,
    Steel,
    Sand,
    Aggregate,
    Bricks,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 5] = [
        MaterialKind::Cement,
        MaterialKind::Steel,
        MaterialKind::Sand,
        MaterialKind::Aggregate,
        MaterialKind::Bricks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Cement => "Cement",
            MaterialKind::Steel => "Steel",
            MaterialKind::Sand => "Sand",
            MaterialKind::Aggregate => "Aggregate",
            MaterialKind::Bricks => "Bricks",
        }
    }

    /// 计量单位
    pub fn unit(&self) -> &'static str {
        match self {
            MaterialKind::Cement => "bags",
            MaterialKind::Steel => "kg",
            MaterialKind::Sand | MaterialKind::Aggregate => "m³",
            MaterialKind::Bricks => "units",
        }
    }

    /// 每平方英尺用量 (固定, 不可配置)
    pub fn yield_per_sq_ft(&self) -> f64 {
        match self {
            MaterialKind::Cement => 0.4,
            MaterialKind::Steel => 4.0,
            MaterialKind::Sand => 0.05,
            MaterialKind::Aggregate => 0.06,
            MaterialKind::Bricks => 8.0,
        }
    }

    /// 阶段标签 (可能跨多个阶段, 排程时按子串匹配)
    pub fn phase_label(&self) -> &'static str {
        match self {
            MaterialKind::Cement | MaterialKind::Sand | MaterialKind::Aggregate => {
                "Foundation & Structure"
            }
            MaterialKind::Steel => "Structure",
            MaterialKind::Bricks => "Structure & Finishing",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 楼层位置 (Floor Position)
// ==========================================
// 单层建筑: 首层判定优先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloorPosition {
    Ground, // 首层
    Middle, // 中间层
    Top,    // 顶层
}

impl FloorPosition {
    /// 按楼层号判定位置 (floor_number 从 1 开始)
    pub fn of(floor_number: u32, number_of_floors: u32) -> Self {
        if floor_number == 1 {
            FloorPosition::Ground
        } else if floor_number == number_of_floors {
            FloorPosition::Top
        } else {
            FloorPosition::Middle
        }
    }
}

impl fmt::Display for FloorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorPosition::Ground => write!(f, "GROUND"),
            FloorPosition::Middle => write!(f, "MIDDLE"),
            FloorPosition::Top => write!(f, "TOP"),
        }
    }
}

// ==========================================
// 项目状态 (Project Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,      // 草稿 (新建默认)
    InProgress, // 施工中
    Completed,  // 已完工
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "DRAFT",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Some(ProjectStatus::Draft),
            "IN_PROGRESS" => Some(ProjectStatus::InProgress),
            "COMPLETED" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_matches_all() {
        for (idx, phase) in PhaseName::ALL.iter().enumerate() {
            assert_eq!(phase.order(), idx as i32 + 1);
            assert_eq!(PhaseName::parse(phase.as_str()), Some(*phase));
        }
        assert_eq!(PhaseName::parse("Landscaping"), None);
    }

    #[test]
    fn test_floor_position_single_floor_is_ground() {
        assert_eq!(FloorPosition::of(1, 1), FloorPosition::Ground);
        assert_eq!(FloorPosition::of(1, 3), FloorPosition::Ground);
        assert_eq!(FloorPosition::of(2, 3), FloorPosition::Middle);
        assert_eq!(FloorPosition::of(3, 3), FloorPosition::Top);
    }

    #[test]
    fn test_project_status_roundtrip_case_insensitive() {
        assert_eq!(ProjectStatus::parse("in_progress"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::parse("ARCHIVED"), None);
    }
}
