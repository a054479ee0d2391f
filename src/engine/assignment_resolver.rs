// ==========================================
// 球衣号码对账系统 - 号码分配决策器
// ==========================================
// 职责: 逐单判定 KEPT / CHANGED / SKIPPED / ERROR，并写回两张表
// 红线: 每个决策必须输出 reason；ERROR 不写回任何表
// 顺序: 严格按订单行序、单线程执行（后单可见前单写入）
// ==========================================

use crate::config::NumberPool;
use crate::domain::order::OrderRecord;
use crate::domain::table::Table;
use crate::domain::types::{
    jersey_display_value, AmbiguousMatchPolicy, AssignmentStatus, FinalNumber,
};
use crate::engine::roster_index::{parse_jersey, RosterIndex};
use crate::importer::column_map::VendorColumns;
use crate::importer::data_cleaner::NameNormalizer;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const REASON_NOT_FOUND: &str = "Player not found in Team Assignment Sheet";
pub const REASON_NO_NUMBER: &str = "No number provided in order";
pub const REASON_AVAILABLE: &str = "Ordered number available";

// ==========================================
// Decision - 单个订单的决策结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub order_row: usize,
    pub roster_row: Option<usize>,
    pub display_name: String,
    pub team: Option<String>,
    pub ordered: Option<u32>,
    pub final_number: FinalNumber,
    pub status: AssignmentStatus,
    pub reason: String,
}

impl Decision {
    /// 写回表格的文本；ERROR 返回 None（不写回）
    pub fn written_value(&self) -> Option<String> {
        match self.status {
            AssignmentStatus::Error | AssignmentStatus::Conflict => None,
            status => Some(jersey_display_value(status, self.final_number)),
        }
    }
}

// ==========================================
// AssignmentResolver - 分配决策器
// ==========================================
pub struct AssignmentResolver {
    pool: NumberPool,
    ambiguous_match: AmbiguousMatchPolicy,
}

impl AssignmentResolver {
    pub fn new(pool: NumberPool, ambiguous_match: AmbiguousMatchPolicy) -> Self {
        Self {
            pool,
            ambiguous_match,
        }
    }

    /// 从号码池中排除已占号码后均匀随机抽取一个
    ///
    /// # 返回
    /// - Some(n): 抽中号码
    /// - None: 号码池耗尽
    pub fn draw_replacement<R: Rng + ?Sized>(
        &self,
        taken: &BTreeSet<u32>,
        rng: &mut R,
    ) -> Option<u32> {
        let eligible: Vec<u32> = self
            .pool
            .numbers()
            .filter(|n| !taken.contains(n))
            .collect();
        eligible.choose(rng).copied()
    }

    /// 判定单个订单（不写回）
    pub fn decide<R: Rng + ?Sized>(
        &self,
        order: &OrderRecord,
        index: &RosterIndex,
        rng: &mut R,
    ) -> Decision {
        let display_name = order.display_name();
        let match_first = NameNormalizer::match_key(&order.first_name);
        let match_last = NameNormalizer::match_key(&order.last_name);

        // 规则 1: 名册查找
        let candidates = index.matches(&match_first, &match_last);
        let roster_row = match candidates {
            [] => return self.error_decision(order, display_name, REASON_NOT_FOUND.to_string()),
            [first, rest @ ..] => {
                if !rest.is_empty() {
                    warn!(
                        player = %display_name,
                        rows = candidates.len(),
                        policy = %self.ambiguous_match,
                        "名册存在同名球员"
                    );
                    if self.ambiguous_match == AmbiguousMatchPolicy::Error {
                        let reason = format!(
                            "Ambiguous match: {} roster rows named {}",
                            candidates.len(),
                            display_name
                        );
                        return self.error_decision(order, display_name, reason);
                    }
                }
                *first
            }
        };

        let team = index
            .entry(roster_row)
            .map(|e| e.team.clone())
            .unwrap_or_default();

        // 规则 2: 已占号码（排除本人）
        let taken = index.taken_numbers(&team, roster_row);

        let (status, final_number, reason) = match order.requested_number {
            // 规则 3: 订单无号码
            None => (
                AssignmentStatus::Skipped,
                FinalNumber::Absent,
                REASON_NO_NUMBER.to_string(),
            ),
            // 规则 4: 原号可用
            Some(requested) if !taken.contains(&requested) => {
                if !self.pool.contains(requested) {
                    debug!(requested, pool = %self.pool, "订单号码不在号码池内，按原号保留");
                }
                (
                    AssignmentStatus::Kept,
                    FinalNumber::Number(requested),
                    REASON_AVAILABLE.to_string(),
                )
            }
            // 规则 5: 冲突改号
            Some(requested) => {
                let mut reason = format!("Conflict: #{} taken on {}", requested, team);
                // 优先避开本人原号；仅剩原号可用时才退回原号
                let current = parse_jersey(index.jersey(roster_row)).filter(|n| !taken.contains(n));
                let drawn = match current {
                    Some(own) => {
                        let mut avoid = taken.clone();
                        avoid.insert(own);
                        self.draw_replacement(&avoid, rng)
                            .or_else(|| self.pool.contains(own).then_some(own))
                    }
                    None => self.draw_replacement(&taken, rng),
                };
                let final_number = match drawn {
                    Some(n) => FinalNumber::Number(n),
                    None => {
                        warn!(team = %team, pool = %self.pool, "号码池已耗尽");
                        reason.push_str(&format!("; no free number in {}", self.pool));
                        FinalNumber::NotAvailable
                    }
                };
                (AssignmentStatus::Changed, final_number, reason)
            }
        };

        Decision {
            order_row: order.row_index,
            roster_row: Some(roster_row),
            display_name,
            team: Some(team),
            ordered: order.requested_number,
            final_number,
            status,
            reason,
        }
    }

    /// 判定并立即写回订单表与名册
    pub fn resolve_order<R: Rng + ?Sized>(
        &self,
        order: &OrderRecord,
        index: &mut RosterIndex,
        vendor: &mut Table,
        vendor_cols: &VendorColumns,
        rng: &mut R,
    ) -> Decision {
        let decision = self.decide(order, index, rng);

        if let (Some(value), Some(roster_row)) = (decision.written_value(), decision.roster_row) {
            vendor.set_cell(decision.order_row, vendor_cols.options_detail, value.clone());
            index.assign_jersey(roster_row, value);
        }

        match decision.status {
            AssignmentStatus::Error => warn!(
                row = decision.order_row,
                player = %decision.display_name,
                reason = %decision.reason,
                "订单未能匹配"
            ),
            status => debug!(
                row = decision.order_row,
                player = %decision.display_name,
                status = %status,
                final_number = %decision.final_number,
                "订单已判定"
            ),
        }

        decision
    }

    fn error_decision(&self, order: &OrderRecord, display_name: String, reason: String) -> Decision {
        Decision {
            order_row: order.row_index,
            roster_row: None,
            display_name,
            team: None,
            ordered: order.requested_number,
            final_number: FinalNumber::NotAvailable,
            status: AssignmentStatus::Error,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::column_map::{roster, RosterColumns};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn index_of(rows: &[(&str, &str, &str, &str)]) -> RosterIndex {
        let table = Table::with_rows(
            vec![
                roster::FIRST_NAME.to_string(),
                roster::LAST_NAME.to_string(),
                roster::TEAM_NAME.to_string(),
                roster::JERSEY.to_string(),
            ],
            rows.iter()
                .map(|(f, l, t, j)| vec![f.to_string(), l.to_string(), t.to_string(), j.to_string()])
                .collect(),
        );
        let cols = RosterColumns::resolve(&table).unwrap();
        RosterIndex::build(table, cols)
    }

    fn order(first: &str, last: &str, requested: Option<u32>) -> OrderRecord {
        OrderRecord {
            row_index: 0,
            first_name: first.to_string(),
            last_name: last.to_string(),
            requested_number: requested,
        }
    }

    fn resolver() -> AssignmentResolver {
        AssignmentResolver::new(NumberPool::default(), AmbiguousMatchPolicy::FirstMatch)
    }

    #[test]
    fn test_kept_when_number_free() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "3"), ("Bo", "Kim", "Sharks", "8")]);
        let mut rng = StdRng::seed_from_u64(1);

        let d = resolver().decide(&order("Ann", "Lee", Some(7)), &index, &mut rng);

        assert_eq!(d.status, AssignmentStatus::Kept);
        assert_eq!(d.final_number, FinalNumber::Number(7));
        assert_eq!(d.team.as_deref(), Some("Sharks"));
        assert_eq!(d.written_value().as_deref(), Some("7"));
    }

    #[test]
    fn test_own_number_is_not_a_conflict() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "7")]);
        let mut rng = StdRng::seed_from_u64(1);

        let d = resolver().decide(&order("Ann", "Lee", Some(7)), &index, &mut rng);
        assert_eq!(d.status, AssignmentStatus::Kept);
    }

    #[test]
    fn test_changed_draws_from_free_pool() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "3"), ("Bo", "Kim", "Sharks", "7")]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let d = resolver().decide(&order("Ann", "Lee", Some(7)), &index, &mut rng);

            assert_eq!(d.status, AssignmentStatus::Changed);
            assert_eq!(d.reason, "Conflict: #7 taken on Sharks");
            let n = d.final_number.number().expect("应抽中号码");
            assert!((1..=100).contains(&n));
            assert_ne!(n, 7);
        }
    }

    #[test]
    fn test_changed_exhausted_pool() {
        let index = index_of(&[("Ann", "Lee", "Sharks", ""), ("Bo", "Kim", "Sharks", "2")]);
        let resolver = AssignmentResolver::new(
            NumberPool { min: 1, max: 2 },
            AmbiguousMatchPolicy::FirstMatch,
        );
        let mut rng = StdRng::seed_from_u64(3);

        // 1 空闲
        let d = resolver.decide(&order("Ann", "Lee", Some(2)), &index, &mut rng);
        assert_eq!(d.final_number, FinalNumber::Number(1));

        let index = index_of(&[
            ("Ann", "Lee", "Sharks", ""),
            ("Bo", "Kim", "Sharks", "2"),
            ("Cy", "Day", "Sharks", "1"),
        ]);
        let d = resolver.decide(&order("Ann", "Lee", Some(2)), &index, &mut rng);
        assert_eq!(d.status, AssignmentStatus::Changed);
        assert_eq!(d.final_number, FinalNumber::NotAvailable);
        assert!(d.reason.contains("no free number in 1-2"));
        assert_eq!(d.written_value().as_deref(), Some("CHANGED: N/A"));
    }

    #[test]
    fn test_skipped_without_number() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "3")]);
        let mut rng = StdRng::seed_from_u64(1);

        let d = resolver().decide(&order("Ann", "Lee", None), &index, &mut rng);

        assert_eq!(d.status, AssignmentStatus::Skipped);
        assert_eq!(d.final_number.number(), None);
        assert_eq!(d.written_value().as_deref(), Some(""));
    }

    #[test]
    fn test_error_when_not_found() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "3")]);
        let mut rng = StdRng::seed_from_u64(1);

        let d = resolver().decide(&order("Zed", "Null", Some(4)), &index, &mut rng);

        assert_eq!(d.status, AssignmentStatus::Error);
        assert_eq!(d.reason, REASON_NOT_FOUND);
        assert_eq!(d.written_value(), None);
        assert_eq!(d.ordered, Some(4));
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let index = index_of(&[(" ANN", "lee ", "Sharks", "3")]);
        let mut rng = StdRng::seed_from_u64(1);

        let d = resolver().decide(&order("ann", "LEE", Some(9)), &index, &mut rng);
        assert_eq!(d.status, AssignmentStatus::Kept);
        assert_eq!(d.roster_row, Some(0));
    }

    #[test]
    fn test_ambiguous_policy_error() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "3"), ("Ann", "Lee", "Rays", "4")]);
        let mut rng = StdRng::seed_from_u64(1);

        let first = resolver().decide(&order("Ann", "Lee", Some(9)), &index, &mut rng);
        assert_eq!(first.roster_row, Some(0));

        let strict = AssignmentResolver::new(NumberPool::default(), AmbiguousMatchPolicy::Error);
        let d = strict.decide(&order("Ann", "Lee", Some(9)), &index, &mut rng);
        assert_eq!(d.status, AssignmentStatus::Error);
        assert_eq!(d.reason, "Ambiguous match: 2 roster rows named Ann Lee");
    }

    #[test]
    fn test_changed_avoids_own_current_number() {
        let index = index_of(&[("Ann", "Lee", "Sharks", "3"), ("Bo", "Kim", "Sharks", "7")]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let d = resolver().decide(&order("Ann", "Lee", Some(7)), &index, &mut rng);
            assert_ne!(d.final_number, FinalNumber::Number(3));
        }

        // 仅剩原号时退回原号
        let resolver = AssignmentResolver::new(
            NumberPool { min: 1, max: 2 },
            AmbiguousMatchPolicy::FirstMatch,
        );
        let index = index_of(&[("Ann", "Lee", "Sharks", "1"), ("Bo", "Kim", "Sharks", "2")]);
        let mut rng = StdRng::seed_from_u64(1);
        let d = resolver.decide(&order("Ann", "Lee", Some(2)), &index, &mut rng);
        assert_eq!(d.status, AssignmentStatus::Changed);
        assert_eq!(d.final_number, FinalNumber::Number(1));
    }

    #[test]
    fn test_draw_is_reproducible_with_seed() {
        let taken = BTreeSet::from([1, 2, 3]);
        let a = resolver().draw_replacement(&taken, &mut StdRng::seed_from_u64(42));
        let b = resolver().draw_replacement(&taken, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_covers_pool_uniformly_enough() {
        let resolver = AssignmentResolver::new(
            NumberPool { min: 1, max: 4 },
            AmbiguousMatchPolicy::FirstMatch,
        );
        let taken = BTreeSet::from([2]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            seen.insert(resolver.draw_replacement(&taken, &mut rng).unwrap());
        }
        assert_eq!(seen, BTreeSet::from([1, 3, 4]));
    }
}
