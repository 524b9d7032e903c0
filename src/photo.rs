//! 写真ファイルの取り込み
//!
//! 来店履歴に添付する写真を写真フォルダへ複製する。ファイル名は
//! `{名前}_{来店日YYYYMMDD}_{元ファイル名}`。同名ができた場合は
//! 黙って上書きする。削除された履歴の写真は残る（掃除しない）。

use std::path::{Path, PathBuf};

use crate::error::{KarteError, Result};

const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "PNG", "JPG", "JPEG"];

/// 写真フォルダを作成する（起動時に呼ぶ）
pub fn ensure_photo_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// 拡張子がpng/jpg/jpegか
pub fn is_photo_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            PHOTO_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

/// 保存先のファイル名を組み立てる
pub fn photo_file_name(customer_name: &str, visit_date: &str, original: &str) -> String {
    format!("{}_{}_{}", customer_name, visit_date.replace('-', ""), original)
}

/// 写真を写真フォルダへ複製し、保存先パス（文字列）を返す
pub fn import_photo(
    photo_dir: &Path,
    customer_name: &str,
    visit_date: &str,
    source: &Path,
) -> Result<String> {
    if !source.exists() {
        return Err(KarteError::FileNotFound(source.display().to_string()));
    }
    if !is_photo_file(source) {
        return Err(KarteError::UnsupportedPhoto(source.display().to_string()));
    }

    let original = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let dest: PathBuf = photo_dir.join(photo_file_name(customer_name, visit_date, &original));
    std::fs::copy(source, &dest)?;

    Ok(dest.to_string_lossy().to_string())
}

/// 保存済みパスの写真がまだ存在するか（履歴表示用）
pub fn photo_exists(stored_path: &str) -> bool {
    !stored_path.is_empty() && Path::new(stored_path).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_photo_file() {
        assert!(is_photo_file(Path::new("nail.png")));
        assert!(is_photo_file(Path::new("nail.JPG")));
        assert!(is_photo_file(Path::new("photos/nail.jpeg")));
        assert!(!is_photo_file(Path::new("nail.gif")));
        assert!(!is_photo_file(Path::new("nail.txt")));
        assert!(!is_photo_file(Path::new("nail")));
    }

    #[test]
    fn test_photo_file_name() {
        assert_eq!(
            photo_file_name("山田花子", "2024-03-01", "nail.png"),
            "山田花子_20240301_nail.png"
        );
    }

    #[test]
    fn test_photo_exists_empty_path() {
        assert!(!photo_exists(""));
        assert!(!photo_exists("photos/そんな写真はない.png"));
    }
}
