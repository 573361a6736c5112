// ==========================================
// 备餐排单系统 - 文件解析器实现
// ==========================================
// 依据: 设计冻结文档 - 阶段 0: 文件读取与解析
// 支持: CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// UploadRow - 上传行
// ==========================================

/// 一条上传数据行（携带文件内真实行号）
///
/// 行号以数据行计,1 起,不含表头；空白行被跳过后行号不连续,
/// 下游错误上报必须引用此行号而非切片下标,否则与文件对不上。
#[derive(Debug, Clone)]
pub struct UploadRow {
    /// 文件内数据行号（1 起,不含表头）
    pub line_number: usize,

    /// 表头 → 单元格值
    pub fields: HashMap<String, String>,
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析上传的 CSV 文件为原始行记录
    ///
    /// # 返回
    /// 每行一个 UploadRow；表头与值均去首尾空白,
    /// 完全空白的行跳过（其行号保留为空档,不重排）。
    pub fn parse_to_raw_rows(file_path: &Path) -> ImportResult<Vec<UploadRow>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 打开 CSV 文件
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;

            // 文件内真实行号: 解析器位置信息含表头行,减一得数据行号；
            // 位置缺失时退回切片下标（csv crate 对内存读取器必有位置,保险而已）
            let line_number = record
                .position()
                .map(|p| (p.line() as usize).saturating_sub(1))
                .unwrap_or(idx + 1);

            let mut fields = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行（行号空档保留）
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(UploadRow {
                line_number,
                fields,
            });
        }

        Ok(rows)
    }
}
