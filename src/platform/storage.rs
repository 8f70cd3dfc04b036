//! Best score storage backends

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use crate::persistence::{BestScoreRecord, BestScoreStore, StoreError};

    /// Best score kept in a small JSON file
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        /// Environment variable overriding [`FileStore::DEFAULT_PATH`]
        pub const ENV_PATH: &'static str = "LASER_SWITCH_SAVE";
        pub const DEFAULT_PATH: &'static str = "laser-switch-best.json";

        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Store at the path named by the environment, or the default
        pub fn from_env() -> Self {
            let path = std::env::var_os(Self::ENV_PATH)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH));
            Self::new(path)
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BestScoreStore for FileStore {
        fn get_best(&self) -> Result<u32, StoreError> {
            match fs::read_to_string(&self.path) {
                Ok(json) => Ok(BestScoreRecord::from_json(&json)?.best),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
                Err(err) => Err(err.into()),
            }
        }

        fn set_best(&mut self, best: u32) -> Result<(), StoreError> {
            let json = BestScoreRecord::new(best).to_json()?;
            // Write then rename so a crash never leaves a half-written record
            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            log::debug!("Best score {} saved to {}", best, self.path.display());
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        use tempfile::{TempDir, tempdir};

        /// Save file path inside a fresh temp dir; the dir lives as long as the guard
        fn scratch_path() -> (TempDir, PathBuf) {
            let dir = tempdir().expect("failed to create temp directory");
            let path = dir.path().join("best.json");
            (dir, path)
        }

        #[test]
        fn test_missing_file_reads_zero() {
            let (_dir, path) = scratch_path();
            assert_eq!(FileStore::new(&path).get_best().unwrap(), 0);
        }

        #[test]
        fn test_write_then_read() {
            let (_dir, path) = scratch_path();
            let mut store = FileStore::new(&path);
            store.set_best(17).unwrap();
            assert_eq!(store.get_best().unwrap(), 17);
            assert!(!path.with_extension("json.tmp").exists());

            // A second handle sees the same value
            assert_eq!(FileStore::new(&path).get_best().unwrap(), 17);
        }

        #[test]
        fn test_corrupt_file_is_an_error() {
            let (_dir, path) = scratch_path();
            fs::write(&path, "{ best: ").unwrap();
            assert!(matches!(
                FileStore::new(&path).get_best(),
                Err(StoreError::Malformed(_))
            ));
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::persistence::{BestScoreStore, StoreError};

    /// Best score kept in `localStorage` as a plain integer string
    #[derive(Debug, Clone, Default)]
    pub struct LocalStore;

    impl LocalStore {
        /// LocalStorage key
        const STORAGE_KEY: &'static str = "laser-switch-best";

        pub fn new() -> Self {
            Self
        }

        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StoreError::Unavailable("localStorage not available".into()))
        }
    }

    impl BestScoreStore for LocalStore {
        fn get_best(&self) -> Result<u32, StoreError> {
            let storage = Self::storage()?;
            let value = storage
                .get_item(Self::STORAGE_KEY)
                .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
            match value {
                Some(text) => text
                    .trim()
                    .parse()
                    .map_err(|_| StoreError::Malformed(text.clone())),
                None => Ok(0),
            }
        }

        fn set_best(&mut self, best: u32) -> Result<(), StoreError> {
            let storage = Self::storage()?;
            storage
                .set_item(Self::STORAGE_KEY, &best.to_string())
                .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
            log::info!("Best score saved ({})", best);
            Ok(())
        }
    }
}
