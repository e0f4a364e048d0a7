mod api;
mod cli;
mod error;
mod logging;
mod operations;
mod storage;
mod summary;

use clap::Parser;

use cli::Cli;

fn main() {
    logging::init_logging();

    // 解析命令行参数
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
