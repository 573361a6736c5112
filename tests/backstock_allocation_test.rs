// ==========================================
// 备货分配业务特例集成测试
// ==========================================
// 测试目标: 鸡肉跨口味复用 / 红薯松弛 / 池共享顺序消耗
// ==========================================

use chrono::Utc;
use meal_prep_engine::config::{
    canonical_fields, EngineConfig, FlavorEntry, FlavorMap, HeaderMap, ProteinInfo, ProteinTable,
    ReferenceTables,
};
use meal_prep_engine::domain::BackstockRow;
use meal_prep_engine::engine::RunOrchestrator;
use meal_prep_engine::UploadRow;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

// ==========================================
// 测试辅助函数
// ==========================================

fn create_test_tables() -> ReferenceTables {
    let mut mappings = HashMap::new();
    mappings.insert("First Name".to_string(), canonical_fields::FIRST_NAME.to_string());
    mappings.insert("Last Name".to_string(), canonical_fields::LAST_NAME.to_string());
    mappings.insert("Item".to_string(), canonical_fields::ITEM_DESCRIPTION.to_string());
    mappings.insert("Qty".to_string(), canonical_fields::QUANTITY.to_string());
    mappings.insert("Flavor".to_string(), canonical_fields::FLAVOR_LABEL.to_string());
    mappings.insert("Protein".to_string(), canonical_fields::PROTEIN_LABEL.to_string());

    let mut flavors = HashMap::new();
    for (label, code) in [
        ("COMPETITOR-PREP (100% PLAIN-PLAIN)", "plain"),
        ("SRIRACHA", "sriracha"),
        ("BBQ", "bbq"),
        ("TERIYAKI", "teriyaki"),
    ] {
        flavors.insert(
            label.to_string(),
            FlavorEntry {
                code: code.to_string(),
                label: label.to_string(),
            },
        );
    }

    let mut proteins = HashMap::new();
    proteins.insert(
        "chicken".to_string(),
        ProteinInfo {
            label: "Chicken".to_string(),
            shrink_pct: -25.0,
            lbs_per_unit: 40.0,
            flavor_keyed: true,
        },
    );
    proteins.insert(
        "yams".to_string(),
        ProteinInfo {
            label: "Yams".to_string(),
            shrink_pct: -15.0,
            lbs_per_unit: 3.0,
            flavor_keyed: false,
        },
    );

    ReferenceTables {
        header_map: HeaderMap { mappings },
        flavor_map: FlavorMap { entries: flavors },
        protein_table: ProteinTable { entries: proteins },
    }
}

fn create_row(item: &str, qty: &str, flavor: &str, protein: &str) -> HashMap<String, String> {
    let mut row = HashMap::new();
    row.insert("First Name".to_string(), "Ada".to_string());
    row.insert("Last Name".to_string(), "Lovelace".to_string());
    row.insert("Item".to_string(), item.to_string());
    row.insert("Qty".to_string(), qty.to_string());
    row.insert("Flavor".to_string(), flavor.to_string());
    row.insert("Protein".to_string(), protein.to_string());
    row
}

fn create_backstock(id: i64, protein: &str, flavor: Option<&str>, weight_oz: f64) -> BackstockRow {
    BackstockRow {
        id,
        protein_code: protein.to_string(),
        flavor_code: flavor.map(str::to_string),
        weight_oz,
        available: true,
        created_at: Utc::now(),
    }
}

fn run(
    rows: Vec<HashMap<String, String>>,
    backstock: &[BackstockRow],
    seed: u64,
) -> meal_prep_engine::OrderReport {
    let rows: Vec<UploadRow> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, fields)| UploadRow {
            line_number: idx + 1,
            fields,
        })
        .collect();
    let orchestrator = RunOrchestrator::new(EngineConfig::default());
    let mut rng = StdRng::seed_from_u64(seed);
    orchestrator
        .run(&rows, &create_test_tables(), backstock, &mut rng)
        .unwrap()
}

// ==========================================
// 鸡肉跨口味复用
// ==========================================

#[test]
fn test_plain_chicken_reused_for_sriracha_after_primary_pass() {
    let rows = vec![create_row("Chicken Bowl 10oz", "1", "SRIRACHA", "Chicken")];
    let backstock = vec![
        create_backstock(1, "chicken", Some("sriracha"), 2.0),
        create_backstock(2, "chicken", Some("plain"), 4.0),
        create_backstock(3, "chicken", Some("plain"), 4.0),
    ];

    let report = run(rows, &backstock, 9);
    let meal = &report.meals[0];

    // 主遍吃掉口味内 2oz,复用遍从原味批次补 {4,4}=8
    assert_eq!(meal.original_weight_oz, 10.0);
    assert_eq!(meal.backstock_weight_oz, 10.0);
    assert_eq!(meal.final_weight_oz, 0.0);
    assert_eq!(report.consumed_backstock_ids, vec![1, 2, 3]);
}

#[test]
fn test_plain_lots_not_reused_when_flavor_fully_covered() {
    let rows = vec![create_row("Chicken Bowl 4oz", "1", "BBQ", "Chicken")];
    let backstock = vec![
        create_backstock(1, "chicken", Some("bbq"), 4.0),
        create_backstock(2, "chicken", Some("plain"), 4.0),
    ];

    let report = run(rows, &backstock, 9);
    let meal = &report.meals[0];

    // 口味内已吃满,待烹为零,复用遍不得触发
    assert_eq!(meal.final_weight_oz, 0.0);
    assert_eq!(report.consumed_backstock_ids, vec![1]);
}

#[test]
fn test_primary_plain_key_wins_pool_over_reuse_pass() {
    // plain 与 sriracha 两键都可认领唯一的原味批次,
    // 主遍的 plain 键先行,复用遍只能空手而归
    let rows = vec![
        create_row("Chicken Bowl 4oz", "1", "", "Chicken"),
        create_row("Chicken Bowl 4oz", "1", "SRIRACHA", "Chicken"),
    ];
    let backstock = vec![create_backstock(1, "chicken", Some("plain"), 4.0)];

    let report = run(rows, &backstock, 9);

    let plain = report
        .meals
        .iter()
        .find(|m| m.flavor_code == "plain")
        .unwrap();
    let sriracha = report
        .meals
        .iter()
        .find(|m| m.flavor_code == "sriracha")
        .unwrap();

    assert_eq!(plain.backstock_weight_oz, 4.0);
    assert_eq!(sriracha.backstock_weight_oz, 0.0);
    assert_eq!(sriracha.final_weight_oz, 4.0);
    // 同一 id 全运行只消耗一次
    assert_eq!(report.consumed_backstock_ids, vec![1]);
}

#[test]
fn test_reuse_not_extended_to_plain_or_unlisted_flavors() {
    // 复用白名单只有 sriracha/bbq/teriyaki,其余口味不补原味批次
    let rows = vec![create_row("Chicken Bowl 4oz", "1", "", "Chicken")];
    let backstock = vec![create_backstock(1, "chicken", Some("bbq"), 4.0)];

    let report = run(rows, &backstock, 9);
    let meal = &report.meals[0];

    assert_eq!(meal.flavor_code, "plain");
    assert_eq!(meal.backstock_weight_oz, 0.0);
    assert_eq!(meal.final_weight_oz, 4.0);
    assert!(report.consumed_backstock_ids.is_empty());
}

// ==========================================
// 红薯松弛
// ==========================================

#[test]
fn test_yams_allocated_with_slack_above_requirement() {
    let rows = vec![create_row("Candied Yams 6oz", "2", "", "Yams")];
    // 需求 12,松弛后 17: 14oz 整份零售装可用,避免新开一份
    let backstock = vec![create_backstock(1, "yams", None, 14.0)];

    let report = run(rows, &backstock, 9);
    let meal = &report.meals[0];

    assert_eq!(meal.original_weight_oz, 12.0);
    assert_eq!(meal.backstock_weight_oz, 14.0);
    // 超额部分为业务容忍的用后剩余,待烹重量下限为零
    assert_eq!(meal.final_weight_oz, 0.0);
    assert_eq!(report.consumed_backstock_ids, vec![1]);
}

#[test]
fn test_yams_slack_bounded_at_five_ounces() {
    let rows = vec![create_row("Candied Yams 6oz", "2", "", "Yams")];
    // 18oz 超出 需求+5,不可选
    let backstock = vec![create_backstock(1, "yams", None, 18.0)];

    let report = run(rows, &backstock, 9);
    let meal = &report.meals[0];

    assert_eq!(meal.backstock_weight_oz, 0.0);
    assert_eq!(meal.final_weight_oz, 12.0);
    assert!(report.consumed_backstock_ids.is_empty());
}

#[test]
fn test_non_yams_protein_gets_no_slack() {
    let rows = vec![create_row("Chicken Bowl 4oz", "3", "", "Chicken")];
    // 需求 12,13oz 批次超重不可选
    let backstock = vec![create_backstock(1, "chicken", Some("plain"), 13.0)];

    let report = run(rows, &backstock, 9);

    assert_eq!(report.meals[0].backstock_weight_oz, 0.0);
    assert!(report.consumed_backstock_ids.is_empty());
}
