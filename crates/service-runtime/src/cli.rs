//! Command line arguments shared by every service binary.

use std::path::PathBuf;

/// Arguments every binary accepts.
///
/// Flatten this into the binary's own [`clap::Parser`].
#[derive(Debug, Default, clap::Args)]
pub struct RuntimeArgs {
	/// Load environment variables from a custom `.env` file.
	#[arg(long, value_name = "FILE")]
	pub env_file: Option<PathBuf>,
}

impl RuntimeArgs {
	/// Loads environment variables from a `.env` file.
	///
	/// If `--env-file` was passed, that file must exist. Otherwise a `.env`
	/// file in the working directory is loaded if there is one.
	pub fn load_env_file(&self) -> Result<(), dotenvy::Error> {
		if let Some(path) = self.env_file.as_deref() {
			dotenvy::from_filename(path)?;
			return Ok(());
		}

		match dotenvy::dotenv() {
			Ok(_) => Ok(()),
			Err(error) if error.not_found() => {
				debug!("no `.env` file found");
				Ok(())
			}
			Err(error) => Err(error),
		}
	}
}
