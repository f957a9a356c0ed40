use disco_domain::timeframe::Timeframe;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Trending computation failed for {timeframe}: {message}")]
	Trending { timeframe: Timeframe, message: String },
	#[error(transparent)]
	Domain(#[from] disco_domain::Error),
	#[error(transparent)]
	Storage(#[from] disco_storage::Error),
}
