// ==========================================
// 球衣号码对账系统 - 姓名清洗器
// ==========================================
// 职责: 订单姓名去标签 / 名册姓名生成匹配键
// 注意: 两者不是同一函数，订单文本需要去标签，名册文本不需要
// ==========================================

pub struct NameNormalizer;

impl NameNormalizer {
    /// 去除 "Player First Name :" / "Player Last Name :" 标签并 TRIM
    ///
    /// # 规则
    /// - 标签大小写不敏感，单词与冒号之间允许任意空白
    /// - 文本中所有出现的标签都会被去除
    /// - None → 空串
    ///
    /// # 示例
    /// ```
    /// use jersey_reconcile::importer::NameNormalizer;
    /// assert_eq!(NameNormalizer::normalize_label(Some("Player First Name : Ann")), "Ann");
    /// ```
    pub fn normalize_label(raw: Option<&str>) -> String {
        let raw = match raw {
            Some(v) => v,
            None => return String::new(),
        };

        let mut cleaned = String::with_capacity(raw.len());
        let mut rest = raw;
        while !rest.is_empty() {
            if let Some(consumed) = Self::match_label(rest) {
                rest = &rest[consumed..];
                continue;
            }
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                cleaned.push(ch);
            }
            rest = chars.as_str();
        }

        cleaned.trim().to_string()
    }

    /// 匹配键: TRIM + 小写
    pub fn match_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(value: &str) -> Option<&str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// 在文本开头匹配标签；返回标签（含尾随空白）所占字节数
    fn match_label(text: &str) -> Option<usize> {
        let rest = strip_prefix_ignore_case(text, "player")?.trim_start();
        let rest = strip_prefix_ignore_case(rest, "first")
            .or_else(|| strip_prefix_ignore_case(rest, "last"))?
            .trim_start();
        let rest = strip_prefix_ignore_case(rest, "name")?.trim_start();
        let rest = rest.strip_prefix(':')?.trim_start();
        Some(text.len() - rest.len())
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}
