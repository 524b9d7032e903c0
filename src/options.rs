//! 選択肢マスタ
//!
//! 画面で提示する固定リスト。メニューは自由入力で上書きできるため、
//! 保存値がこのリストに含まれる保証はない。

/// 使用ジェルの選択肢
pub const GEL_OPTIONS: &[&str] = &[
    "RICH GEL",
    "グレースジェルベース",
    "NAIL MEIYIZI",
    "RAINEY",
    "AKO ALICE NAIL",
    "para gel",
];

/// 施術メニューの選択肢
pub const MENU_OPTIONS: &[&str] = &[
    "ワンカラー",
    "フレンチ",
    "定額コース",
    "シンプルコース",
    "ゴージャスコース",
    "マグネット",
    "マグネットフレンチ",
    "チークカラー",
    "ガラス・ミラーフレンチ",
];
