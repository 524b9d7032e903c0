use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salon-karte")]
#[command(about = "ネイルサロン顧客管理ツール", long_about = None)]
pub struct Cli {
    /// サブコマンド省略時は対話式の管理画面を開く
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// データフォルダ（customers.csv / visits.csv / photos/ の置き場所）
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式の管理画面を開く
    Start,

    /// 顧客一覧を表示
    List,

    /// 顧客を検索して表示
    Search {
        /// 検索キーワード（名前の部分一致）
        #[arg(required = true)]
        keyword: String,
    },

    /// 来店履歴を表示（来店日の降順）
    History {
        /// 顧客名で絞り込み（完全一致）
        #[arg(short, long)]
        name: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// データフォルダを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
