// ==========================================
// 球衣号码对账系统 - 命令行入口
// ==========================================
// 用法: jersey-reconcile --vendor <订单表> --roster <名册> [选项]
// 产物: 更新后订单表 / 更新后名册 / 处理报告（CSV）
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use jersey_reconcile::config::{ConfigManager, RunConfig};
use jersey_reconcile::i18n::{set_locale, t_with_args};
use jersey_reconcile::{logging, ReconcileApi};
use std::path::PathBuf;

/// 订单表与球队名册的球衣号码对账
#[derive(Parser, Debug)]
#[command(name = "jersey-reconcile")]
#[command(about = "Reconcile ordered jersey numbers against team rosters")]
#[command(version)]
struct Args {
    /// 订单导出表（CSV / Excel）
    #[arg(long, env = "JERSEY_VENDOR")]
    vendor: PathBuf,

    /// 球队名册（CSV / Excel）
    #[arg(long, env = "JERSEY_ROSTER")]
    roster: PathBuf,

    /// 输出目录（默认与订单表同目录）
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// 配置文件（JSON）
    #[arg(long, env = "JERSEY_CONFIG")]
    config: Option<PathBuf>,

    /// 覆盖目标商品名
    #[arg(long)]
    product: Option<String>,

    /// 覆盖号码池上限
    #[arg(long)]
    pool_max: Option<u32>,

    /// 固定随机种子（可复现改号）
    #[arg(long)]
    seed: Option<u64>,

    /// 输出语言
    #[arg(long, default_value = "en")]
    locale: String,

    /// 以 JSON 打印运行摘要
    #[arg(long)]
    json: bool,

    /// 日志使用 JSON 行格式
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    set_locale(&args.locale);

    tracing::info!("{} v{}", jersey_reconcile::APP_NAME, jersey_reconcile::VERSION);

    // === 配置: 文件 → 命令行覆盖 ===
    let mut config = ConfigManager::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(product) = args.product {
        config.target_product = product;
    }
    if let Some(max) = args.pool_max {
        config.number_pool.max = max;
    }
    if let Some(seed) = args.seed {
        config.rng_seed = Some(seed);
    }

    let mut run = RunConfig::new(args.vendor, args.roster);
    if let Some(dir) = args.output_dir {
        run = run.with_output_dir(dir);
    }

    let api = ReconcileApi::new(config).context("Invalid configuration")?;
    if !args.json {
        let vendor = run.vendor_path.display().to_string();
        let roster = run.roster_path.display().to_string();
        println!(
            "{}",
            t_with_args("run.started", &[("vendor", &vendor), ("roster", &roster)])
        );
    }
    let summary = match api.run(&run) {
        Ok(summary) => summary,
        Err(e) => {
            let error = e.to_string();
            eprintln!("{}", t_with_args("run.failed", &[("error", &error)]));
            return Err(e.into());
        }
    };

    if args.json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
        println!("{}", text);
        return Ok(());
    }

    let kept = summary.kept.to_string();
    let changed = summary.changed.to_string();
    let skipped = summary.skipped.to_string();
    let errors = summary.errors.to_string();
    let conflicts = summary.conflicts.to_string();
    println!(
        "{}",
        t_with_args(
            "run.completed",
            &[
                ("kept", &kept),
                ("changed", &changed),
                ("skipped", &skipped),
                ("errors", &errors),
                ("conflicts", &conflicts),
            ],
        )
    );
    for path in [
        &summary.outputs.vendor,
        &summary.outputs.roster,
        &summary.outputs.report,
    ] {
        let shown = path.display().to_string();
        println!("{}", t_with_args("run.outputs", &[("path", &shown)]));
    }

    Ok(())
}
