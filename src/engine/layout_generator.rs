// ==========================================
// 住宅建造估算系统 - 户型建议引擎
// ==========================================
// 输入: 项目输入 (仅用单层面积与楼层数)
// 输出: 每层一条户型建议, 楼层号 1..=楼层数
// ==========================================
// 规则: 房间配置按单层面积档位选择 (非总面积)
//       小户型首层不设阳台
//       建议文本按楼层位置 (首层/中间层/顶层), 首层判定优先
// ==========================================

use crate::domain::layout::{LayoutConfig, LayoutSuggestion};
use crate::domain::project::ProjectInputs;
use crate::domain::types::FloorPosition;
use tracing::debug;

const GROUND_FLOOR_TEXT: &str = "Ground floor optimized for common areas. Consider placing living room, dining room, and kitchen with easy access. Include a guest bedroom if space permits. Ensure proper ventilation and natural lighting.";

const TOP_FLOOR_TEXT: &str = "Top floor ideal for private spaces. Position bedrooms to maximize privacy and natural light. Consider a terrace or extended balcony space. Master bedroom can have attached bathroom and balcony access.";

const MIDDLE_FLOOR_TEXT: &str = "Mid-floor layout balanced for bedrooms and family spaces. Optimize room placement for cross-ventilation. Consider positioning bathrooms centrally to reduce plumbing costs.";

// ==========================================
// 面积档位 (固定查找表)
// ==========================================
struct AreaTier {
    /// 单层面积上限 (不含)
    upper_bound: f64,
    rooms: LayoutConfig,
    /// 首层阳台数
    ground_floor_balconies: u32,
}

const AREA_TIERS: [AreaTier; 4] = [
    AreaTier {
        upper_bound: 800.0,
        rooms: LayoutConfig {
            bedrooms: 2,
            bathrooms: 1,
            kitchen: 1,
            living_room: 1,
            dining_room: 0,
            balconies: 1,
            utilities: 1,
        },
        ground_floor_balconies: 0,
    },
    AreaTier {
        upper_bound: 1500.0,
        rooms: LayoutConfig {
            bedrooms: 3,
            bathrooms: 2,
            kitchen: 1,
            living_room: 1,
            dining_room: 1,
            balconies: 1,
            utilities: 1,
        },
        ground_floor_balconies: 0,
    },
    AreaTier {
        upper_bound: 2500.0,
        rooms: LayoutConfig {
            bedrooms: 4,
            bathrooms: 3,
            kitchen: 1,
            living_room: 1,
            dining_room: 1,
            balconies: 2,
            utilities: 1,
        },
        ground_floor_balconies: 2,
    },
    AreaTier {
        upper_bound: f64::INFINITY,
        rooms: LayoutConfig {
            bedrooms: 5,
            bathrooms: 4,
            kitchen: 1,
            living_room: 2,
            dining_room: 1,
            balconies: 2,
            utilities: 2,
        },
        ground_floor_balconies: 2,
    },
];

// ==========================================
// LayoutGenerator - 户型建议引擎
// ==========================================
pub struct LayoutGenerator {
    // 无状态引擎
}

impl LayoutGenerator {
    pub fn new() -> Self {
        Self {}
    }

    /// 按面积档位与楼层位置确定房间配置
    pub fn room_program(&self, built_up_area: f64, position: FloorPosition) -> LayoutConfig {
        let tier = AREA_TIERS
            .iter()
            .find(|t| built_up_area < t.upper_bound)
            .unwrap_or(&AREA_TIERS[AREA_TIERS.len() - 1]);

        let mut rooms = tier.rooms;
        if position == FloorPosition::Ground {
            rooms.balconies = tier.ground_floor_balconies;
        }
        rooms
    }

    /// 楼层位置对应的建议文本
    pub fn suggestion_text(&self, position: FloorPosition) -> &'static str {
        match position {
            FloorPosition::Ground => GROUND_FLOOR_TEXT,
            FloorPosition::Top => TOP_FLOOR_TEXT,
            FloorPosition::Middle => MIDDLE_FLOOR_TEXT,
        }
    }

    /// 生成各层户型建议
    pub fn generate_layouts(&self, inputs: &ProjectInputs) -> Vec<LayoutSuggestion> {
        let layouts: Vec<LayoutSuggestion> = (1..=inputs.number_of_floors)
            .map(|floor_number| {
                let position = FloorPosition::of(floor_number, inputs.number_of_floors);
                let layout_config = self.room_program(inputs.built_up_area, position);

                LayoutSuggestion {
                    floor_number,
                    total_rooms: layout_config.total_rooms(),
                    layout_config,
                    suggestions: self.suggestion_text(position).to_string(),
                }
            })
            .collect();

        debug!(floors = layouts.len(), "户型建议生成完成");

        layouts
    }
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_tier_ground_has_no_balcony() {
        let generator = LayoutGenerator::new();
        let layouts = generator.generate_layouts(&ProjectInputs::new(750.0, 2, 20));

        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].layout_config.balconies, 0);
        assert_eq!(layouts[0].total_rooms, 6);
        assert_eq!(layouts[1].layout_config.balconies, 1);
        assert_eq!(layouts[1].total_rooms, 7);
        assert!(layouts[1].suggestions.starts_with("Top floor"));
    }

    #[test]
    fn test_tier_boundaries_are_exclusive() {
        let generator = LayoutGenerator::new();

        let at_800 = generator.room_program(800.0, FloorPosition::Middle);
        assert_eq!(at_800.bedrooms, 3);
        assert_eq!(at_800.dining_room, 1);

        let at_1500 = generator.room_program(1500.0, FloorPosition::Ground);
        assert_eq!(at_1500.bedrooms, 4);
        assert_eq!(at_1500.balconies, 2);

        let at_2500 = generator.room_program(2500.0, FloorPosition::Top);
        assert_eq!(at_2500.bedrooms, 5);
        assert_eq!(at_2500.living_room, 2);
        assert_eq!(at_2500.utilities, 2);
        assert_eq!(at_2500.total_rooms(), 17);
    }

    #[test]
    fn test_single_floor_uses_ground_text() {
        let generator = LayoutGenerator::new();
        let layouts = generator.generate_layouts(&ProjectInputs::new(1200.0, 1, 20));

        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].suggestions, GROUND_FLOOR_TEXT);
        assert_eq!(layouts[0].layout_config.balconies, 0);
    }

    #[test]
    fn test_middle_floors() {
        let generator = LayoutGenerator::new();
        let layouts = generator.generate_layouts(&ProjectInputs::new(2000.0, 4, 40));

        let floors: Vec<u32> = layouts.iter().map(|l| l.floor_number).collect();
        assert_eq!(floors, vec![1, 2, 3, 4]);
        assert_eq!(layouts[1].suggestions, MIDDLE_FLOOR_TEXT);
        assert_eq!(layouts[2].suggestions, MIDDLE_FLOOR_TEXT);
        assert_eq!(layouts[3].suggestions, TOP_FLOOR_TEXT);
        for layout in &layouts {
            assert_eq!(layout.total_rooms, layout.layout_config.total_rooms());
            assert_eq!(layout.total_rooms, 13);
        }
    }
}
