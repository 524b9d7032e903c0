use thiserror::Error;

#[derive(Error, Debug)]
pub enum KarteError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("登録エラー: {0}")]
    Validation(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です（png/jpg/jpeg のみ）: {0}")]
    UnsupportedPhoto(String),

    #[error("CSV読み書きエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, KarteError>;
