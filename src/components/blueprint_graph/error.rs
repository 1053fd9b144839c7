#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid graph payload: {0}")]
	Payload(#[from] serde_json::Error),
	#[error("invalid config value for `{field}`: {reason}")]
	InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
