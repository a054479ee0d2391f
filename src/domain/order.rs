// ==========================================
// 球衣号码对账系统 - 订单领域模型
// ==========================================
// 用途: 由订单表目标商品行派生，单次运行内只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// OrderRecord - 订单记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub row_index: usize,              // 来源订单行（0 起，数据行）
    pub first_name: String,            // 去标签后的名
    pub last_name: String,             // 去标签后的姓
    pub requested_number: Option<u32>, // 订单号码（无法解析时为 None）
}

impl OrderRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
