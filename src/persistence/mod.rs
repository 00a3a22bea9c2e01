use std::{
    env,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use crate::core::WkError;

const APP_NAME: &str = "wkstats";
const DATA_DIR_ENV: &str = "WKSTATS_DATA_DIR";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join(APP_NAME),
        None => PathBuf::from("."),
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), WkError> {
    save_json_in(&get_app_data_dir(), data, filename)
}

pub fn save_json_in<T: Serialize>(dir: &Path, data: &T, filename: &str) -> Result<(), WkError> {
    fs::create_dir_all(dir)?;
    let file_path = dir.join(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    info!("Data saved to: {}", file_path.display());
    Ok(())
}

/// A missing file is not an error: it yields `T::default()`.
pub fn load_json<T: DeserializeOwned + Default>(filename: &str) -> Result<T, WkError> {
    load_json_in(&get_app_data_dir(), filename)
}

pub fn load_json_in<T: DeserializeOwned + Default>(dir: &Path, filename: &str) -> Result<T, WkError> {
    let file_path = dir.join(filename);

    if !file_path.exists() {
        debug!("No data at {}, using defaults", file_path.display());
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    load_json_or_default_in(&get_app_data_dir(), filename)
}

pub fn load_json_or_default_in<T: DeserializeOwned + Default>(dir: &Path, filename: &str) -> T {
    match load_json_in::<T>(dir, filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

pub fn delete_data_file(filename: &str) -> Result<(), WkError> {
    delete_data_file_in(&get_app_data_dir(), filename)
}

pub fn delete_data_file_in(dir: &Path, filename: &str) -> Result<(), WkError> {
    let file_path = dir.join(filename);
    if file_path.exists() {
        fs::remove_file(&file_path)?;
        info!("Deleted: {}", file_path.display());
    }
    Ok(())
}

pub fn data_file_exists(filename: &str) -> bool {
    data_file_exists_in(&get_app_data_dir(), filename)
}

pub fn data_file_exists_in(dir: &Path, filename: &str) -> bool {
    dir.join(filename).exists()
}
