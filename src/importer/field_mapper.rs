// ==========================================
// 球衣号码对账系统 - 订单提取器
// ==========================================
// 职责: 订单表行 → OrderRecord
// 流程: 商品名过滤 → 姓名去标签 → 号码提取
// ==========================================

use crate::domain::order::OrderRecord;
use crate::domain::table::Table;
use crate::importer::column_map::VendorColumns;
use crate::importer::data_cleaner::NameNormalizer;
use tracing::debug;

const NUMBER_LABEL: &str = "Player Number";

pub struct OrderExtractor {
    target_product: String,
}

impl OrderExtractor {
    pub fn new(target_product: impl Into<String>) -> Self {
        Self {
            target_product: target_product.into(),
        }
    }

    pub fn target_product(&self) -> &str {
        &self.target_product
    }

    /// 商品名精确匹配（大小写敏感，忽略首尾空白）
    pub fn is_target_order(&self, product_name: &str) -> bool {
        product_name.trim() == self.target_product
    }

    /// 从 "[Player Number : 52]" 形式的文本中提取号码
    ///
    /// # 规则
    /// - 标签 "Player Number" 大小写敏感，冒号两侧允许空白
    /// - 取第一处成功匹配的数字串
    /// - 数字超出 u32 范围视为无号码
    ///
    /// # 注意
    /// 写回的 "CHANGED: N" 标记不符合此格式，重跑时这些行会变为 SKIPPED
    pub fn extract_number(raw: Option<&str>) -> Option<u32> {
        let raw = raw?;
        for (pos, _) in raw.match_indices(NUMBER_LABEL) {
            let rest = raw[pos + NUMBER_LABEL.len()..].trim_start();
            let rest = match rest.strip_prefix(':') {
                Some(r) => r.trim_start(),
                None => continue,
            };

            let digits_len = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if digits_len == 0 {
                continue;
            }

            return rest[..digits_len].parse::<u32>().ok();
        }
        None
    }

    /// 提取全部目标商品订单（按订单表行序）
    pub fn extract_orders(&self, vendor: &Table, cols: &VendorColumns) -> Vec<OrderRecord> {
        let mut orders = Vec::new();
        for row_index in 0..vendor.len() {
            if !self.is_target_order(vendor.cell(row_index, cols.product_name)) {
                continue;
            }

            let order = OrderRecord {
                row_index,
                first_name: NameNormalizer::normalize_label(Some(
                    vendor.cell(row_index, cols.first_name),
                )),
                last_name: NameNormalizer::normalize_label(Some(
                    vendor.cell(row_index, cols.last_name),
                )),
                requested_number: Self::extract_number(Some(
                    vendor.cell(row_index, cols.options_detail),
                )),
            };
            debug!(
                row = row_index,
                player = %order.display_name(),
                requested = ?order.requested_number,
                "提取订单"
            );
            orders.push(order);
        }
        orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::column_map::vendor;

    #[test]
    fn test_extract_number() {
        assert_eq!(OrderExtractor::extract_number(Some("[Player Number : 52]")), Some(52));
        assert_eq!(OrderExtractor::extract_number(Some("Player Number:7")), Some(7));
        assert_eq!(
            OrderExtractor::extract_number(Some("Size: YM, Player Number  :  09")),
            Some(9)
        );
    }

    #[test]
    fn test_extract_number_absent() {
        assert_eq!(OrderExtractor::extract_number(None), None);
        assert_eq!(OrderExtractor::extract_number(Some("")), None);
        assert_eq!(OrderExtractor::extract_number(Some("[Size : YL]")), None);
        // 大小写敏感
        assert_eq!(OrderExtractor::extract_number(Some("player number : 5")), None);
        // 冒号后无数字
        assert_eq!(OrderExtractor::extract_number(Some("Player Number : TBD")), None);
    }

    #[test]
    fn test_extract_number_first_valid_occurrence() {
        assert_eq!(
            OrderExtractor::extract_number(Some("Player Number : ?; Player Number : 12")),
            Some(12)
        );
    }

    #[test]
    fn test_changed_marker_is_not_an_order_number() {
        assert_eq!(OrderExtractor::extract_number(Some("CHANGED: 42")), None);
    }

    #[test]
    fn test_is_target_order_exact() {
        let extractor = OrderExtractor::new("GSSA Purple Game Jersey");
        assert!(extractor.is_target_order("GSSA Purple Game Jersey"));
        assert!(!extractor.is_target_order("gssa purple game jersey"));
        assert!(!extractor.is_target_order("GSSA Purple Game Jersey - Youth"));
        assert!(extractor.is_target_order("  GSSA Purple Game Jersey "));
    }

    #[test]
    fn test_extract_orders_filters_and_cleans() {
        let headers = vec![
            vendor::PRODUCT_NAME.to_string(),
            vendor::OPTIONS_DETAIL.to_string(),
            vendor::FIRST_NAME.to_string(),
            vendor::LAST_NAME.to_string(),
        ];
        let row = |p: &str, o: &str, f: &str, l: &str| {
            vec![p.to_string(), o.to_string(), f.to_string(), l.to_string()]
        };
        let table = Table::with_rows(
            headers,
            vec![
                row("Socks", "[Size : M]", "Player First Name : X", "Player Last Name : Y"),
                row(
                    "GSSA Purple Game Jersey",
                    "[Player Number : 7]",
                    "Player First Name : Ann",
                    "Player Last Name : Lee",
                ),
            ],
        );
        let cols = VendorColumns::resolve(&table).unwrap();

        let orders = OrderExtractor::new("GSSA Purple Game Jersey").extract_orders(&table, &cols);

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].row_index, 1);
        assert_eq!(orders[0].first_name, "Ann");
        assert_eq!(orders[0].last_name, "Lee");
        assert_eq!(orders[0].requested_number, Some(7));
    }
}
