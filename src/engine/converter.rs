// ==========================================
// 备餐排单系统 - 缩水与单位换算
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 4.4 Shrink & Unit Converter
// 职责: 熟重计算 + 磅/盎司显示串,纯函数无状态
// ==========================================

use crate::domain::types::OUNCES_PER_POUND;

pub struct UnitConverter;

impl UnitConverter {
    /// 缩水调整后的熟重（两位小数）
    ///
    /// cooked = round(final × (1 + shrink_pct / 100), 2)
    /// shrink_pct 为蛋白信息表提供的常量,失重蛋白为负值。
    pub fn cooked_weight_oz(final_weight_oz: f64, shrink_pct: f64) -> f64 {
        let cooked = final_weight_oz * (1.0 + shrink_pct / 100.0);
        (cooked * 100.0).round() / 100.0
    }

    /// 盎司 → 磅+盎司显示串
    ///
    /// # 规则
    /// - lbs = floor(oz / 16), remainder = ceil(oz mod 16)
    /// - remainder == 16 进位: lbs + 1, remainder = 0
    /// - 磅数恰为 1 时单数 "lb",否则 "lbs"
    /// - 格式: "<lbs>lb(s) <remainder>oz"
    pub fn format_lbs_oz(oz: f64) -> String {
        let mut lbs = (oz / OUNCES_PER_POUND).floor() as i64;
        let mut remainder = (oz.rem_euclid(OUNCES_PER_POUND)).ceil() as i64;

        // ceil 顶到整磅时进位,显示串不允许出现 16oz
        if remainder == 16 {
            lbs += 1;
            remainder = 0;
        }

        let unit = if lbs == 1 { "lb" } else { "lbs" };
        format!("{}{} {}oz", lbs, unit, remainder)
    }
}
