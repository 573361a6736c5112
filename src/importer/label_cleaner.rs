// ==========================================
// 备餐排单系统 - 标签清洗器实现
// ==========================================
// 依据: Field_Mapping_Spec_v1.1.md - 6. 标签标准化规则
// 职责: 口味标签标准化 / 蛋白代码折叠 / 容器规格提取
// ==========================================

use crate::domain::types::{ContainerSize, OUNCES_PER_POUND};
use regex::Regex;
use std::sync::LazyLock;

// 容器规格模式: "<数字> lb|lbs" 或 "<数字>oz"（大小写不敏感,允许空格）
static WEIGHT_UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(lbs?|oz)\b").expect("容器规格正则非法")
});

pub struct LabelCleaner;

impl LabelCleaner {
    /// 口味标签标准化
    ///
    /// # 规则
    /// - 空串 / "100% PLAIN-PLAIN" → "COMPETITOR-PREP (100% PLAIN-PLAIN)"
    /// - "SPICY BISON" → "SPICY BEEF BISON"
    /// - 其余原样透传
    pub fn canonical_flavor_label(raw: &str) -> String {
        match raw.trim() {
            "" | "100% PLAIN-PLAIN" => "COMPETITOR-PREP (100% PLAIN-PLAIN)".to_string(),
            "SPICY BISON" => "SPICY BEEF BISON".to_string(),
            other => other.to_string(),
        }
    }

    /// 蛋白标签折叠为蛋白代码
    ///
    /// # 规则
    /// - 双词特例（Beef Bison / Egg Whites / Mahi Mahi）
    ///   → 首词小写 + 次词首字母大写 驼峰拼接（beefBison）
    /// - 其余标签整体小写
    /// - 空标签 → None（纯素餐信号,不是错误）
    pub fn protein_code_from_label(label: Option<&str>) -> Option<String> {
        let label = label.map(str::trim).filter(|l| !l.is_empty())?;

        let code = match label {
            "Beef Bison" | "Egg Whites" | "Mahi Mahi" => {
                let mut words = label.split_whitespace();
                // 双词特例,两段必然存在
                let first = words.next().unwrap_or_default().to_lowercase();
                let second = words.next().unwrap_or_default();
                let mut chars = second.chars();
                let capitalized = match chars.next() {
                    Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                    None => String::new(),
                };
                format!("{}{}", first, capitalized)
            }
            other => other.to_lowercase(),
        };
        Some(code)
    }

    /// 从商品描述提取容器规格与本行总净重
    ///
    /// # 规则
    /// - "<数字> lb|lbs" → (bulk, 16 × 磅数 × 数量)
    /// - 盎司值 ∈ {2.5, 4, 6, 8, 10} → (对应规格, 盎司 × 数量)
    /// - 其它盎司值 → "unexpected container size: X"
    /// - 无匹配 → "could not extract container size"
    ///
    /// # 返回
    /// Err 为行级问题描述串,由标准化器并入该行 OrderError。
    pub fn parse_container(
        description: &str,
        quantity: u32,
    ) -> Result<(ContainerSize, f64), String> {
        let captures = WEIGHT_UNIT_PATTERN
            .captures(description)
            .ok_or_else(|| "could not extract container size".to_string())?;

        // 正则保证第 1 组为合法数字
        let value: f64 = captures[1].parse().map_err(|_| {
            format!("unexpected container size: {}", &captures[1])
        })?;
        let unit = captures[2].to_lowercase();

        // 零重量规格（"0 lbs" / "0oz"）不构成合法订单行
        if value == 0.0 {
            return Err(format!("unexpected container size: {}{}", &captures[1], unit));
        }

        if unit.starts_with("lb") {
            let weight = OUNCES_PER_POUND * value * f64::from(quantity);
            return Ok((ContainerSize::Bulk, weight));
        }

        match ContainerSize::from_ounces(value) {
            Some(size) => Ok((size, value * f64::from(quantity))),
            None => Err(format!("unexpected container size: {}oz", &captures[1])),
        }
    }
}
