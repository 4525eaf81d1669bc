use anyhow::Result;
use golden_gen::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let report = App::initialize(config).await?.run().await?;

    if let Some(message) = report.save_error {
        eprintln!("{}", message);
    }

    Ok(())
}
