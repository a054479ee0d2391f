// ==========================================
// 球衣号码对账 API
// ==========================================
// 职责: 读入两张表 → 对账 → 三个产物一并写出
// 规则: 任何结构性失败都发生在写盘之前；产物全部就绪才落盘
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ReconcileConfig, RunConfig};
use crate::engine::orchestrator::{ReconcileOrchestrator, ReconcileOutcome};
use crate::engine::report_builder::report_table;
use crate::importer::{CsvWriter, OutputStager, TableWriter, UniversalFileParser};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// 输出文件路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub vendor: PathBuf,
    pub roster: PathBuf,
    pub report: PathBuf,
}

/// 运行结果摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// 本次运行ID（日志追溯）
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    /// 目标商品订单数
    pub orders: usize,
    pub kept: usize,
    pub changed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub conflicts: usize,
    pub outputs: OutputPaths,
}

/// 对账API
pub struct ReconcileApi {
    config: ReconcileConfig,
}

impl ReconcileApi {
    pub fn new(config: ReconcileConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// 执行一次对账（随机源取自配置）
    pub fn run(&self, run: &RunConfig) -> ApiResult<RunSummary> {
        let mut rng = self.config.build_rng();
        self.run_with_rng(run, &mut rng)
    }

    /// 执行一次对账（调用方注入随机源）
    #[instrument(skip(self, run, rng), fields(run_id = tracing::field::Empty))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        run: &RunConfig,
        rng: &mut R,
    ) -> ApiResult<RunSummary> {
        let start_time = Instant::now();
        let started_at = Utc::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        info!(
            vendor = %run.vendor_path.display(),
            roster = %run.roster_path.display(),
            "开始对账"
        );

        let result = self.execute(run, rng);
        let (outcome, outputs) = match result {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "对账失败，未写出任何文件");
                return Err(e);
            }
        };

        let counts = outcome.counts;
        let summary = RunSummary {
            run_id,
            started_at,
            elapsed_ms: start_time.elapsed().as_millis() as i64,
            orders: outcome.orders,
            kept: counts.kept,
            changed: counts.changed,
            skipped: counts.skipped,
            errors: counts.errors,
            conflicts: counts.conflicts,
            outputs,
        };
        info!(elapsed_ms = summary.elapsed_ms, "对账完成");
        Ok(summary)
    }

    fn execute<R: Rng + ?Sized>(
        &self,
        run: &RunConfig,
        rng: &mut R,
    ) -> ApiResult<(ReconcileOutcome, OutputPaths)> {
        if same_file(&run.vendor_path, &run.roster_path) {
            return Err(ApiError::InvalidInput(
                "订单表与名册不能是同一个文件".to_string(),
            ));
        }

        // === 步骤 1: 读入（全部读完再开始决策） ===
        let parser = UniversalFileParser;
        let vendor = parser.parse(&run.vendor_path)?;
        let roster = parser.parse(&run.roster_path)?;

        // === 步骤 2: 对账 ===
        let outcome = ReconcileOrchestrator::new(&self.config).execute(vendor, roster, rng)?;

        // === 步骤 3: 序列化全部产物 ===
        let writer = CsvWriter;
        let vendor_bytes = writer.serialize_table(&outcome.vendor)?;
        let roster_bytes = writer.serialize_table(&outcome.roster)?;
        let report_bytes = writer.serialize_table(&report_table(&outcome.report))?;

        // === 步骤 4: 暂存 + 提交 ===
        let names = &self.config.outputs;
        let mut stager = OutputStager::new(run.resolved_output_dir());
        let outputs = OutputPaths {
            vendor: stager.stage(&names.vendor_file, &vendor_bytes)?,
            roster: stager.stage(&names.roster_file, &roster_bytes)?,
            report: stager.stage(&names.report_file, &report_bytes)?,
        };
        stager.commit()?;

        Ok((outcome, outputs))
    }
}

/// 两个路径是否指向同一文件（均存在时按规范化路径比较）
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
