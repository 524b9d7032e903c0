//! 来店履歴ストア
//!
//! 来店レコードは顧客を名前（文字列）で参照する。登録時に顧客の実在は
//! 確認しない。顧客削除時に `cascade_delete` で同名の履歴をまとめて
//! 消すのが、2ファイル間で守る唯一の整合性。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// visits.csv のヘッダ（列順固定）
pub const VISIT_FIELDS: [&str; 5] = ["名前", "来店日", "写真", "メモ", "メニュー"];

/// 来店1件。フィールドはCSVの列にそのまま対応する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// 顧客の名前（値参照、存在チェックなし）
    #[serde(rename = "名前")]
    pub customer_name: String,
    /// YYYY-MM-DD
    #[serde(rename = "来店日")]
    pub date: String,
    /// 写真ファイルのパス（無ければ空文字列）
    #[serde(rename = "写真")]
    pub photo: String,
    #[serde(rename = "メモ")]
    pub memo: String,
    /// メニュー（選択肢から選ぶが自由入力で上書き可）
    #[serde(rename = "メニュー")]
    pub menu: String,
}

/// 来店レコードのコレクション。1つのCSVファイルに対応する。
pub struct VisitStore {
    path: PathBuf,
    records: Vec<Visit>,
}

impl VisitStore {
    /// CSVを読み込んでストアを開く。ファイルが無ければ空のストア。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = super::read_rows(&path)?;
        Ok(Self { path, records })
    }

    /// 全レコードをCSVへ書き戻す
    pub fn save(&self) -> Result<()> {
        super::write_rows(&self.path, &VISIT_FIELDS, &self.records)
    }

    pub fn records(&self) -> &[Visit] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Visit> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 末尾に追加し、追加位置のインデックスを返す
    pub fn add(&mut self, visit: Visit) -> usize {
        self.records.push(visit);
        self.records.len() - 1
    }

    /// 指定位置のレコードを差し替える。位置が範囲外なら何もしない。
    pub fn update(&mut self, index: usize, visit: Visit) {
        if let Some(slot) = self.records.get_mut(index) {
            *slot = visit;
        }
    }

    /// 指定位置のレコードを取り除く
    pub fn remove(&mut self, index: usize) -> Option<Visit> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// 名前の完全一致で履歴を引く（登録順のまま）
    pub fn find_by_customer(&self, name: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, v)| v.customer_name == name)
            .map(|(i, _)| i)
            .collect()
    }

    /// 全履歴を来店日の降順に並べたインデックス列。
    /// 日付はISO文字列のまま比較する。同日は登録順を保つ。
    pub fn by_date_desc(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.records.len()).collect();
        indices.sort_by(|&a, &b| self.records[b].date.cmp(&self.records[a].date));
        indices
    }

    /// 指定顧客の履歴を来店日の降順で返す
    pub fn find_by_customer_desc(&self, name: &str) -> Vec<usize> {
        let mut indices = self.find_by_customer(name);
        indices.sort_by(|&a, &b| self.records[b].date.cmp(&self.records[a].date));
        indices
    }

    /// 同名の履歴をすべて削除し、削除件数を返す。
    /// 顧客削除時に呼ぶこと。
    pub fn cascade_delete(&mut self, name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|v| v.customer_name != name);
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(name: &str, date: &str) -> Visit {
        Visit {
            customer_name: name.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    fn store(visits: Vec<Visit>) -> VisitStore {
        VisitStore {
            path: PathBuf::from("unused.csv"),
            records: visits,
        }
    }

    #[test]
    fn test_by_date_desc() {
        let store = store(vec![
            visit("山田", "2024-01-10"),
            visit("鈴木", "2024-03-05"),
            visit("山田", "2024-02-20"),
        ]);

        let order = store.by_date_desc();
        let dates: Vec<&str> = order.iter().map(|&i| store.get(i).unwrap().date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-02-20", "2024-01-10"]);
    }

    #[test]
    fn test_by_date_desc_same_day_keeps_insertion_order() {
        let store = store(vec![
            visit("午前", "2024-02-20"),
            visit("午後", "2024-02-20"),
        ]);

        let order = store.by_date_desc();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_find_by_customer_exact_match() {
        let store = store(vec![
            visit("山田", "2024-01-10"),
            visit("山田花子", "2024-01-11"),
            visit("山田", "2024-01-12"),
        ]);

        assert_eq!(store.find_by_customer("山田"), vec![0, 2]);
        assert_eq!(store.find_by_customer("山田花子"), vec![1]);
        assert!(store.find_by_customer("鈴木").is_empty());
    }

    #[test]
    fn test_find_by_customer_desc() {
        let store = store(vec![
            visit("山田", "2024-01-10"),
            visit("山田", "2024-03-05"),
            visit("鈴木", "2024-04-01"),
        ]);

        let order = store.find_by_customer_desc("山田");
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_cascade_delete() {
        let mut store = store(vec![
            visit("山田", "2024-01-10"),
            visit("鈴木", "2024-01-11"),
            visit("山田", "2024-01-12"),
        ]);

        let removed = store.cascade_delete("山田");
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().customer_name, "鈴木");

        // 該当なしは0件
        assert_eq!(store.cascade_delete("山田"), 0);
    }
}
