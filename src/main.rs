// ==========================================
// 杯子钥匙扣运营看板 - 开发入口
// ==========================================
// 用法:
//   cargo run -- [orders.json]
// 传入订单导出文件时打印订单汇总；总是打印当前生产跟踪进度
// ==========================================

use anyhow::{anyhow, Context};
use cup_keychain_ops::app::{get_default_db_path, AppState};
use cup_keychain_ops::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", cup_keychain_ops::APP_NAME);
    tracing::info!("系统版本: {}", cup_keychain_ops::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    if let Some(orders_path) = std::env::args().nth(1) {
        let text = std::fs::read_to_string(&orders_path)
            .with_context(|| format!("无法读取订单文件: {}", orders_path))?;
        let summary = state.dashboard_api.paste_orders(&text)?;

        println!("订单数: {}", summary.order_count);
        println!("销售额: ${:.2}", summary.financial.total_sales);
        println!("客单价: ${:.2}", summary.financial.average_order_value);
        for sku in summary.sku_stats.iter().take(10) {
            println!("  {:<28} {:>5}", sku.display, sku.quantity);
        }
        if !summary.pieces_required.is_empty() {
            println!("Owala 零件需求:");
            for piece in &summary.pieces_required {
                println!("  {:<28} {:>5}", piece.name, piece.quantity);
            }
        }
    }

    let progress = state.tracker_api.progress()?;
    println!(
        "生产计划 {}: {}/{} ({:.1}%)",
        progress.plan,
        progress.total_completed,
        progress.total_cups,
        progress.percent_complete()
    );
    for variant in &progress.variants {
        println!(
            "  {:<8} {:>4}/{:<4} 剩余 {}",
            variant.name,
            variant.completed,
            variant.total,
            variant.remaining()
        );
    }

    Ok(())
}
