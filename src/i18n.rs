// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use jersey_reconcile::i18n::t_with_args;
/// let msg = t_with_args("run.outputs", &[("path", "/tmp/Process_Report.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，测试默认并行执行，这里串行化
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_per_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let msg = t_with_args("run.failed", &[("error", "缺少列")]);
        assert_eq!(msg, "对账失败: 缺少列");

        set_locale("en");
        let msg = t_with_args("run.failed", &[("error", "missing column")]);
        assert_eq!(msg, "Reconciliation failed: missing column");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("run.outputs", &[("path", "/tmp/roster.csv")]);
        assert_eq!(msg, "Written: /tmp/roster.csv");

        set_locale("zh-CN");
        let msg = t_with_args(
            "run.completed",
            &[
                ("kept", "3"),
                ("changed", "1"),
                ("skipped", "0"),
                ("errors", "2"),
                ("conflicts", "0"),
            ],
        );
        assert!(msg.contains("保留 3"));
        assert!(msg.contains("错误 2"));

        set_locale("en");
    }
}
