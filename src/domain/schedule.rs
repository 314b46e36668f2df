// ==========================================
// 住宅建造估算系统 - 周计划领域模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// WeeklyScheduleEntry - 周计划条目
// ==========================================
// 每个 (阶段, 阶段内周) 一条; 按阶段顺序、周顺序输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    pub week_number: i32,                          // 全局周号 (从 1 开始)
    pub phase_name: String,                        // 所属阶段
    pub tasks: Vec<String>,                        // 本周任务 (3 项)
    pub workforce_required: BTreeMap<String, i64>, // 工种 → 人数
    pub materials_needed: BTreeMap<String, i64>,   // 材料 → 本周用量
}
