// ==========================================
// 球衣号码对账系统 - 文件写出
// ==========================================
// 输出格式: 一律 CSV（与输入格式无关）
// 写盘策略: 全部产物先写入同目录临时文件，全部就绪后再逐个替换
// ==========================================

use crate::domain::table::Table;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_io_trait::TableWriter;
use csv::WriterBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

// ==========================================
// CSV Writer 实现
// ==========================================
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn serialize_table(&self, table: &Table) -> ImportResult<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| ImportError::FileWriteError(e.to_string()))
    }
}

// ==========================================
// OutputStager - 产物暂存与提交
// ==========================================
pub struct OutputStager {
    output_dir: PathBuf,
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl OutputStager {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            staged: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 将一个产物写入临时文件，返回其最终路径
    pub fn stage(&mut self, file_name: &str, bytes: &[u8]) -> ImportResult<PathBuf> {
        if !self.output_dir.is_dir() {
            return Err(ImportError::FileWriteError(format!(
                "输出目录不存在: {}",
                self.output_dir.display()
            )));
        }

        let target = self.output_dir.join(file_name);
        let mut temp = NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| ImportError::FileWriteError(e.to_string()))?;
        temp.write_all(bytes)
            .and_then(|_| temp.flush())
            .map_err(|e| ImportError::FileWriteError(e.to_string()))?;

        debug!(target = %target.display(), bytes = bytes.len(), "产物已暂存");
        self.staged.push((temp, target.clone()));
        Ok(target)
    }

    /// 提交全部暂存产物（rename 到最终路径）
    pub fn commit(self) -> ImportResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());
        for (temp, target) in self.staged {
            temp.persist(&target)
                .map_err(|e| ImportError::FileWriteError(format!("{}: {}", target.display(), e.error)))?;
            written.push(target);
        }
        info!(files = written.len(), "输出文件已写入");
        Ok(written)
    }
}
