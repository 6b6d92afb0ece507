use std::path::PathBuf;

/// 保存ファイルのパスを指定する環境変数
pub const DATA_FILE_ENV: &str = "LIBRARY_DATA_FILE";

/// 環境変数が未設定の場合の保存ファイル
pub const DEFAULT_DATA_FILE: &str = "library.json";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
}

impl AppConfig {
    /// プロセスの環境変数から読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込む（テストで環境変数を汚さないため）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = lookup(DATA_FILE_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        Self {
            data_file: PathBuf::from(data_file),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}
