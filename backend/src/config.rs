use std::env;
use std::io;
use std::path::PathBuf;

/// Runtime configuration for the service.
///
/// Everything is derived from two environment variables with defaults
/// matching the development layout:
/// - `PORT` (default `8080`)
/// - `DATA_DIR` (default `./data`) — sqlite file and rendition tree live here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    /// Upper bound for an uploaded file, in bytes.
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        AppConfig {
            port,
            data_dir,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("db.sqlite")
    }

    pub fn svg_dir(&self) -> PathBuf {
        self.data_dir.join("logos").join("svg")
    }

    pub fn png_dir(&self) -> PathBuf {
        self.data_dir.join("logos").join("png")
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.data_dir.join("logos").join("temp")
    }

    /// Create the data directory tree. Called once at startup.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for dir in [
            self.data_dir.as_path(),
            &self.svg_dir(),
            &self.png_dir(),
            &self.temp_dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Config rooted at an arbitrary directory, for tests.
    #[cfg(test)]
    pub fn rooted_at(dir: &std::path::Path) -> Self {
        AppConfig {
            port: 0,
            data_dir: dir.to_path_buf(),
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}
