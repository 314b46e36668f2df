// ==========================================
// 住宅建造估算系统 - 户型建议领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// LayoutConfig - 房间配置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub kitchen: u32,
    pub living_room: u32,
    pub dining_room: u32,
    pub balconies: u32,
    pub utilities: u32,
}

impl LayoutConfig {
    /// 七类房间合计
    pub fn total_rooms(&self) -> u32 {
        self.bedrooms
            + self.bathrooms
            + self.kitchen
            + self.living_room
            + self.dining_room
            + self.balconies
            + self.utilities
    }
}

// ==========================================
// LayoutSuggestion - 单层户型建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSuggestion {
    pub floor_number: u32,
    pub total_rooms: u32,
    pub layout_config: LayoutConfig,
    pub suggestions: String,
}
