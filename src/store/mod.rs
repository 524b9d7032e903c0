//! 顧客・来店履歴の永続化層
//!
//! 2つのCSVファイル（customers.csv / visits.csv）をそれぞれ丸ごと
//! 読み込み・丸ごと書き戻しする。追記はしない。
//!
//! - ファイルが無ければ空のストアとして開始（初回起動）
//! - 保存は毎回ヘッダ行＋全レコードの書き直し
//! - 書き込みは一時ファイル経由で、完了後にリネームで置き換える

pub mod customer;
pub mod visit;

pub use customer::{age, Customer, CustomerStore};
pub use visit::{Visit, VisitStore};

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// CSVから全レコードを読み込む。ファイルが無ければ空のVec。
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// ヘッダ行＋全レコードでCSVを書き直す。
///
/// レコードが0件でもヘッダ行だけのファイルを書く。
pub(crate) fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}
