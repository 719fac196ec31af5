use crate::domain::port::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// JSONファイルストア
/// すべてのキーを1つのJSONオブジェクトとしてファイルに保存する
/// 書き込みは一時ファイルへの書き出しとリネームで置き換える
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// ファイルを開いて内容を読み込む
    /// ファイルが存在しない場合は空のストアになる
    ///
    /// # Arguments
    /// * `path` - 保存先ファイルのパス
    ///
    /// # Returns
    /// * `Ok(JsonFileStore)` - 読み込み成功
    /// * `Err(StorageError::OpenFailed)` - 読み込めない、またはJSONとして解析できない
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                StorageError::OpenFailed(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::OpenFailed(format!("{}: {}", path.display(), e)));
            }
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// 保存先ファイルのパスを取得
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_values(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_file(&self, values: &BTreeMap<String, String>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(values)?;
        let temp_path = self.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock_values().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.lock_values();
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());

        self.write_file(&next).map_err(|e| {
            StorageError::WriteFailed(format!("{}: {}", self.path.display(), e))
        })?;

        *values = next;
        Ok(())
    }
}
