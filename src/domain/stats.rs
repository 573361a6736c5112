// ==========================================
// 备餐排单系统 - 运行统计与报表实体
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 3. 数据模型
// 红线: 统计只由订单推导,与分配结果无关
// ==========================================

use crate::domain::meal::Meal;
use crate::domain::order::OrderError;
use crate::domain::types::ContainerSize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// OrderStatistics - 订单统计
// ==========================================

/// 单次运行的聚合计数（每次运行从订单重算）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatistics {
    /// 订单数（去重客户数）
    pub orders: u32,

    /// 餐数（全部订单行数量之和）
    pub meals: u32,

    /// 纯素餐数
    pub veggie_meals: u32,

    /// 答谢袋数（每客户每满 14 餐一袋,向上取整）
    pub thank_you_bags: u32,

    /// 分容器规格的餐数
    pub containers: BTreeMap<ContainerSize, u32>,
}

// ==========================================
// OrderReport - 运行报表
// ==========================================

/// 一次完整运行的报表（交外部渲染层/持久层,引擎不落库）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReport {
    /// 运行 id
    pub run_id: Uuid,

    /// 报表生成时间
    pub generated_at: DateTime<Utc>,

    /// 聚合统计
    pub statistics: OrderStatistics,

    /// 成品列表（蛋白→口味排序）
    pub meals: Vec<Meal>,

    /// 行级校验错误列表
    pub errors: Vec<OrderError>,

    /// 本次运行消耗的备货 id（升序,调用方据此落库置不可用）
    pub consumed_backstock_ids: Vec<i64>,
}
