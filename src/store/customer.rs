//! 顧客ストア
//!
//! 名前をキー代わりに使うが一意性は強制しない。同名の顧客が並んだ場合、
//! 名前で引く操作（検索・来店履歴の一括削除）は該当する全レコードに及ぶ。

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{KarteError, Result};

/// customers.csv のヘッダ（列順固定）
pub const CUSTOMER_FIELDS: [&str; 5] = ["名前", "電話番号", "生年月日", "ジェル", "メモ"];

/// 顧客1件。フィールドはCSVの列にそのまま対応する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "名前")]
    pub name: String,
    #[serde(rename = "電話番号")]
    pub phone: String,
    /// YYYY-MM-DD
    #[serde(rename = "生年月日")]
    pub birthdate: String,
    /// 使用ジェル（", " 区切り、未選択は空文字列）
    #[serde(rename = "ジェル")]
    pub gels: String,
    #[serde(rename = "メモ")]
    pub memo: String,
}

impl Customer {
    /// ジェル列をリストに分解（空文字列は空リスト）
    pub fn gel_list(&self) -> Vec<String> {
        self.gels
            .split(", ")
            .filter(|g| !g.is_empty())
            .map(|g| g.to_string())
            .collect()
    }

    /// ジェルのリストを ", " 区切りで格納する
    pub fn set_gels<S: AsRef<str>>(&mut self, gels: &[S]) {
        self.gels = gels
            .iter()
            .map(|g| g.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
    }

    /// 必須項目（名前・電話番号）のチェック
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(KarteError::Validation("名前と電話番号は必須です".into()));
        }
        Ok(())
    }
}

/// 顧客レコードのコレクション。1つのCSVファイルに対応する。
///
/// レコードはインデックスで指す。編集・削除は検索等で得た
/// インデックスに対して行い、変更後に `save` で書き戻す。
pub struct CustomerStore {
    path: PathBuf,
    records: Vec<Customer>,
}

impl CustomerStore {
    /// CSVを読み込んでストアを開く。ファイルが無ければ空のストア。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = super::read_rows(&path)?;
        Ok(Self { path, records })
    }

    /// 全レコードをCSVへ書き戻す
    pub fn save(&self) -> Result<()> {
        super::write_rows(&self.path, &CUSTOMER_FIELDS, &self.records)
    }

    pub fn records(&self) -> &[Customer] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 末尾に追加し、追加位置のインデックスを返す。
    /// 必須項目が欠けていればエラーで、何も追加しない。
    pub fn add(&mut self, customer: Customer) -> Result<usize> {
        customer.validate()?;
        self.records.push(customer);
        Ok(self.records.len() - 1)
    }

    /// 指定位置のレコードを差し替える
    pub fn update(&mut self, index: usize, customer: Customer) -> Result<()> {
        customer.validate()?;
        match self.records.get_mut(index) {
            Some(slot) => {
                *slot = customer;
                Ok(())
            }
            None => Err(KarteError::Validation(format!(
                "顧客が見つかりません（{}番目）",
                index
            ))),
        }
    }

    /// 指定位置のレコードを取り除き、取り除いたレコードを返す。
    /// 来店履歴の一括削除（`VisitStore::cascade_delete`）は呼び出し側で行う。
    pub fn remove(&mut self, index: usize) -> Option<Customer> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// 名前の部分一致で検索し、該当インデックスを返す。
    /// 空のキーワードは何にもマッチしない。
    pub fn search(&self, keyword: &str) -> Vec<usize> {
        if keyword.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.contains(keyword))
            .map(|(i, _)| i)
            .collect()
    }
}

/// 生年月日（YYYY-MM-DD）から今日時点の年齢を計算する。
/// 空・不正な日付は None（画面では「不明」と表示）。
pub fn age(birthdate: &str) -> Option<i32> {
    age_at(birthdate, Local::now().date_naive())
}

fn age_at(birthdate: &str, today: NaiveDate) -> Option<i32> {
    let birth = NaiveDate::parse_from_str(birthdate.trim(), "%Y-%m-%d").ok()?;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_birthday_passed() {
        assert_eq!(age_at("1990-03-10", date("2024-06-01")), Some(34));
    }

    #[test]
    fn test_age_birthday_not_yet() {
        assert_eq!(age_at("1990-09-10", date("2024-06-01")), Some(33));
    }

    #[test]
    fn test_age_on_birthday() {
        assert_eq!(age_at("1990-06-01", date("2024-06-01")), Some(34));
    }

    #[test]
    fn test_age_day_before_birthday() {
        assert_eq!(age_at("1990-06-02", date("2024-06-01")), Some(33));
    }

    #[test]
    fn test_age_invalid_input() {
        assert_eq!(age("不明"), None);
        assert_eq!(age(""), None);
        assert_eq!(age("2024/01/01"), None);
        assert_eq!(age("1990-13-40"), None);
    }

    #[test]
    fn test_gel_list_roundtrip() {
        let mut customer = Customer::default();
        customer.set_gels(&["RICH GEL", "para gel"]);
        assert_eq!(customer.gels, "RICH GEL, para gel");
        assert_eq!(customer.gel_list(), vec!["RICH GEL", "para gel"]);
    }

    #[test]
    fn test_gel_list_empty() {
        let mut customer = Customer::default();
        customer.set_gels::<&str>(&[]);
        assert_eq!(customer.gels, "");
        assert!(customer.gel_list().is_empty());
    }

    #[test]
    fn test_validate_requires_name_and_phone() {
        let customer = Customer {
            name: "山田".into(),
            phone: "".into(),
            ..Default::default()
        };
        assert!(customer.validate().is_err());

        let customer = Customer {
            name: "".into(),
            phone: "090-0000-0000".into(),
            ..Default::default()
        };
        assert!(customer.validate().is_err());
    }

    #[test]
    fn test_search_empty_keyword_matches_nothing() {
        let mut store = CustomerStore {
            path: PathBuf::from("unused.csv"),
            records: Vec::new(),
        };
        store
            .add(Customer {
                name: "山田花子".into(),
                phone: "090-0000-0000".into(),
                ..Default::default()
            })
            .unwrap();

        assert!(store.search("").is_empty());
        assert_eq!(store.search("山田"), vec![0]);
        assert_eq!(store.search("花"), vec![0]);
        assert!(store.search("鈴木").is_empty());
    }
}
