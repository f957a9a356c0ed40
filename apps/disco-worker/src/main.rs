use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = disco_worker::Args::parse();

	disco_worker::run(args).await
}
