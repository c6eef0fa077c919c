use clap::Parser;
use access_key_display::{cli::Cli, start};

#[async_std::main]
async fn main() {

	// --- Initialize environmental variables and settings ---
	dotenv::dotenv().ok();
	pretty_env_logger::init();

	let cli = Cli::parse();

	if let Err(e) = start(cli).await {
		log::error!("{}", e);
		std::process::exit(1);
	}
}
