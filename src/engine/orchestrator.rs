// ==========================================
// 球衣号码对账系统 - 对账编排器
// ==========================================
// 流程: 列校验 → 订单提取 → 名册索引 → 逐单决策写回 → 重号终检 → 报告
// 红线: 纯内存批处理，单线程按订单行序执行，不做任何文件 I/O
// ==========================================

use crate::config::ReconcileConfig;
use crate::domain::report::ReportEntry;
use crate::domain::table::Table;
use crate::engine::assignment_resolver::AssignmentResolver;
use crate::engine::duplicate_auditor::DuplicateAuditor;
use crate::engine::report_builder::{ReportBuilder, StatusCounts};
use crate::engine::roster_index::RosterIndex;
use crate::importer::column_map::{RosterColumns, VendorColumns};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::OrderExtractor;
use rand::Rng;
use tracing::{debug, info};

// ==========================================
// ReconcileOutcome - 对账结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub vendor: Table,
    pub roster: Table,
    pub report: Vec<ReportEntry>,
    pub counts: StatusCounts,
    /// 目标商品订单数
    pub orders: usize,
}

// ==========================================
// ReconcileOrchestrator - 对账编排器
// ==========================================
pub struct ReconcileOrchestrator {
    extractor: OrderExtractor,
    resolver: AssignmentResolver,
    auditor: DuplicateAuditor,
}

impl ReconcileOrchestrator {
    pub fn new(config: &ReconcileConfig) -> Self {
        Self {
            extractor: OrderExtractor::new(config.target_product.clone()),
            resolver: AssignmentResolver::new(config.number_pool, config.ambiguous_match),
            auditor: DuplicateAuditor,
        }
    }

    /// 执行完整对账流程
    ///
    /// # 参数
    /// - vendor: 订单表（按值传入，原地改写后交还）
    /// - roster: 名册（同上）
    /// - rng: 冲突改号随机源（测试传入固定种子）
    ///
    /// # 返回
    /// - Err: 仅结构性错误（缺列）
    pub fn execute<R: Rng + ?Sized>(
        &self,
        mut vendor: Table,
        roster: Table,
        rng: &mut R,
    ) -> ImportResult<ReconcileOutcome> {
        // ==========================================
        // 步骤1: 列校验（任何写回之前）
        // ==========================================
        let vendor_cols = VendorColumns::resolve(&vendor)?;
        let roster_cols = RosterColumns::resolve(&roster)?;

        // ==========================================
        // 步骤2: 订单提取
        // ==========================================
        let orders = self.extractor.extract_orders(&vendor, &vendor_cols);
        info!(
            vendor_rows = vendor.len(),
            roster_rows = roster.len(),
            orders = orders.len(),
            product = %self.extractor.target_product(),
            "开始执行对账流程"
        );

        // ==========================================
        // 步骤3: 名册索引（只构建一次）
        // ==========================================
        let mut index = RosterIndex::build(roster, roster_cols);

        // ==========================================
        // 步骤4: 逐单决策 + 写回
        // ==========================================
        let mut report = ReportBuilder::new();
        for order in &orders {
            let decision =
                self.resolver
                    .resolve_order(order, &mut index, &mut vendor, &vendor_cols, rng);
            report.record_decision(&decision);
        }
        debug!(decisions = orders.len(), "逐单决策完成");

        // ==========================================
        // 步骤5: 重号终检
        // ==========================================
        for conflict in self.auditor.audit(&index) {
            report.record_conflict(&conflict);
        }

        let counts = report.counts();
        info!(
            kept = counts.kept,
            changed = counts.changed,
            skipped = counts.skipped,
            errors = counts.errors,
            conflicts = counts.conflicts,
            "对账流程完成"
        );

        Ok(ReconcileOutcome {
            vendor,
            roster: index.into_table(),
            report: report.into_entries(),
            counts,
            orders: orders.len(),
        })
    }
}

/// 便捷入口: resolve(vendor, roster, config) → (更新后订单表, 更新后名册, 报告)
///
/// 随机源由配置的种子决定（无种子则取系统熵）
pub fn resolve(
    vendor: Table,
    roster: Table,
    config: &ReconcileConfig,
) -> ImportResult<ReconcileOutcome> {
    let mut rng = config.build_rng();
    ReconcileOrchestrator::new(config).execute(vendor, roster, &mut rng)
}
