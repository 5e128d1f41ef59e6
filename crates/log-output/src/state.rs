use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::UpstreamClient;

/// What `GET /log` reports when the information file cannot be read.
pub(crate) const FILE_NOT_FOUND: &str = "file not found";

/// Shared state of the log-output handlers.
#[derive(Debug, Clone)]
pub struct AppState {
	pub(crate) file_content: Arc<str>,
	pub(crate) message: Arc<str>,

	/// Generated once per process.
	pub(crate) token: Uuid,

	pub(crate) upstream: UpstreamClient,
}

impl AppState {
	/// Creates a new [`AppState`] with a fresh token.
	pub fn new(
		file_content: impl Into<Arc<str>>,
		message: impl Into<Arc<str>>,
		upstream: UpstreamClient,
	) -> Self {
		Self {
			file_content: file_content.into(),
			message: message.into(),
			token: Uuid::new_v4(),
			upstream,
		}
	}

	/// The token included in every `GET /log` response.
	pub fn token(&self) -> Uuid {
		self.token
	}
}

/// Reads the information file.
///
/// Any error is logged and replaced with the text `file not found`.
#[instrument(level = "debug")]
pub async fn read_information_file(path: &Path) -> String {
	match tokio::fs::read_to_string(path).await {
		Ok(content) => content,
		Err(error) => {
			warn!(%error, path = %path.display(), "failed to read information file");
			String::from(FILE_NOT_FOUND)
		}
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	#[tokio::test]
	async fn missing_file_is_reported_as_not_found() {
		let path = PathBuf::from("/this/path/does/not/exist/information.txt");

		assert_eq!(read_information_file(&path).await, FILE_NOT_FOUND);
	}

	#[tokio::test]
	async fn reads_file_content() -> anyhow::Result<()> {
		let path = std::env::temp_dir().join(format!("information-{}.txt", Uuid::new_v4()));
		tokio::fs::write(&path, "this text is from a file\n").await?;

		let content = read_information_file(&path).await;
		tokio::fs::remove_file(&path).await?;

		assert_eq!(content, "this text is from a file\n");

		Ok(())
	}
}
