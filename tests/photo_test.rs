//! 写真取り込みテスト
//!
//! 写真フォルダへの複製と命名規則を検証

use salon_karte::error::KarteError;
use salon_karte::photo;
use std::path::Path;
use tempfile::tempdir;

/// 取り込みで `{名前}_{来店日YYYYMMDD}_{元ファイル名}` に複製される
#[test]
fn test_import_photo_copies_with_pattern() {
    let dir = tempdir().expect("Failed to create temp dir");
    let photo_dir = dir.path().join("photos");
    photo::ensure_photo_dir(&photo_dir).expect("フォルダ作成失敗");

    let source = dir.path().join("nail.png");
    std::fs::write(&source, b"dummy png").expect("書き込み失敗");

    let stored = photo::import_photo(&photo_dir, "山田花子", "2024-03-01", &source)
        .expect("取り込み失敗");

    assert!(stored.ends_with("山田花子_20240301_nail.png"));
    assert!(Path::new(&stored).exists());
    assert_eq!(std::fs::read(&stored).expect("読み込み失敗"), b"dummy png");
}

/// 元ファイルが無い場合はエラー
#[test]
fn test_import_photo_missing_source() {
    let dir = tempdir().expect("Failed to create temp dir");
    let photo_dir = dir.path().join("photos");
    photo::ensure_photo_dir(&photo_dir).expect("フォルダ作成失敗");

    let result = photo::import_photo(
        &photo_dir,
        "山田花子",
        "2024-03-01",
        Path::new("/nonexistent/nail.png"),
    );
    assert!(matches!(result, Err(KarteError::FileNotFound(_))));
}

/// png/jpg/jpeg 以外は拒否される
#[test]
fn test_import_photo_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let photo_dir = dir.path().join("photos");
    photo::ensure_photo_dir(&photo_dir).expect("フォルダ作成失敗");

    let source = dir.path().join("nail.gif");
    std::fs::write(&source, b"dummy gif").expect("書き込み失敗");

    let result = photo::import_photo(&photo_dir, "山田花子", "2024-03-01", &source);
    assert!(matches!(result, Err(KarteError::UnsupportedPhoto(_))));
}

/// 同名になる取り込みは黙って上書きする
#[test]
fn test_import_photo_same_name_overwrites() {
    let dir = tempdir().expect("Failed to create temp dir");
    let photo_dir = dir.path().join("photos");
    photo::ensure_photo_dir(&photo_dir).expect("フォルダ作成失敗");

    let source = dir.path().join("nail.jpg");

    std::fs::write(&source, b"first").expect("書き込み失敗");
    let first = photo::import_photo(&photo_dir, "山田花子", "2024-03-01", &source)
        .expect("取り込み失敗");

    std::fs::write(&source, b"second").expect("書き込み失敗");
    let second = photo::import_photo(&photo_dir, "山田花子", "2024-03-01", &source)
        .expect("取り込み失敗");

    assert_eq!(first, second);
    assert_eq!(std::fs::read(&second).expect("読み込み失敗"), b"second");
}
