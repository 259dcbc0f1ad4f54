use clap::Parser;

use redlink::config::{Args, StaticConfig};
use redlink::runtime::run_server;
use redlink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    let mut config = StaticConfig::load(args.config.as_deref())?;
    config.apply_args(&args);

    // guard 必须存活到进程结束，保证日志刷新
    let _guard = init_logging(&config.logging)?;

    run_server(config).await
}
