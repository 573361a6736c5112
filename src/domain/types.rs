// ==========================================
// 备餐排单系统 - 领域类型定义
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 0.2 容器规格体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 业务常量
// ==========================================

/// 每磅盎司数（单位换算基准）
pub const OUNCES_PER_POUND: f64 = 16.0;

/// 鸡肉蛋白代码（跨口味复用规则的目标蛋白）
pub const CHICKEN_CODE: &str = "chicken";

/// 原味鸡肉口味代码（可跨口味复用的备货来源）
pub const PLAIN_FLAVOR_CODE: &str = "plain";

/// 允许复用原味鸡肉备货的成品口味（二次分配目标）
pub const CHICKEN_REUSE_FLAVORS: [&str; 3] = ["sriracha", "bbq", "teriyaki"];

/// 红薯蛋白代码（分配时允许超出需求的松弛规则）
pub const YAMS_CODE: &str = "yams";

// ==========================================
// 容器规格 (Container Size)
// ==========================================
// 红线: 枚举制,固定五档盎司规格 + 散装
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    #[serde(rename = "2.5oz")]
    Oz2_5,
    #[serde(rename = "4oz")]
    Oz4,
    #[serde(rename = "6oz")]
    Oz6,
    #[serde(rename = "8oz")]
    Oz8,
    #[serde(rename = "10oz")]
    Oz10,
    #[serde(rename = "bulk")]
    Bulk,
}

impl ContainerSize {
    /// 从盎司数值解析固定规格（散装不经此路径）
    ///
    /// # 返回
    /// - Some(size): 命中五档固定规格之一
    /// - None: 非法规格,由调用方上报行级错误
    pub fn from_ounces(oz: f64) -> Option<Self> {
        // 规格值来自上传描述文本,精度固定为一位小数
        match (oz * 10.0).round() as i64 {
            25 => Some(ContainerSize::Oz2_5),
            40 => Some(ContainerSize::Oz4),
            60 => Some(ContainerSize::Oz6),
            80 => Some(ContainerSize::Oz8),
            100 => Some(ContainerSize::Oz10),
            _ => None,
        }
    }

    /// 单份净重（盎司）；散装无固定单份重量
    pub fn unit_ounces(&self) -> Option<f64> {
        match self {
            ContainerSize::Oz2_5 => Some(2.5),
            ContainerSize::Oz4 => Some(4.0),
            ContainerSize::Oz6 => Some(6.0),
            ContainerSize::Oz8 => Some(8.0),
            ContainerSize::Oz10 => Some(10.0),
            ContainerSize::Bulk => None,
        }
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerSize::Oz2_5 => write!(f, "2.5oz"),
            ContainerSize::Oz4 => write!(f, "4oz"),
            ContainerSize::Oz6 => write!(f, "6oz"),
            ContainerSize::Oz8 => write!(f, "8oz"),
            ContainerSize::Oz10 => write!(f, "10oz"),
            ContainerSize::Bulk => write!(f, "bulk"),
        }
    }
}
