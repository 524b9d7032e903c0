use clap::Parser;
use salon_karte::{cli, config, error, store, ui};

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use store::{age, CustomerStore, VisitStore};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        // コマンドライン指定はこの実行だけの上書き（保存しない）
        config.data_dir = dir;
    }

    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => {
            println!("💅 ネイルサロン顧客管理");
            ui::run_session(&config)?;
        }

        Commands::List => {
            println!("📋 顧客一覧\n");

            let customers = CustomerStore::open(config.customers_path())?;
            if customers.is_empty() {
                println!("顧客が登録されていません");
            }
            for customer in customers.records() {
                println!("{}（{}）", customer.name, customer.phone);
                println!(
                    "  🎂 {}（{}） / 💅 {}",
                    customer.birthdate,
                    age_label(&customer.birthdate),
                    customer.gels
                );
            }
        }

        Commands::Search { keyword } => {
            println!("🔍 顧客検索: {}\n", keyword);

            let customers = CustomerStore::open(config.customers_path())?;
            let visits = VisitStore::open(config.visits_path())?;

            let matches = customers.search(&keyword);
            if matches.is_empty() {
                println!("該当する顧客がいません");
            }
            for &i in &matches {
                let customer = &customers.records()[i];
                let visit_count = visits.find_by_customer(&customer.name).len();
                println!("{}（{}）", customer.name, customer.phone);
                println!(
                    "  🎂 {}（{}） / 💅 {} / 来店 {}回",
                    customer.birthdate,
                    age_label(&customer.birthdate),
                    customer.gels,
                    visit_count
                );
                if !customer.memo.is_empty() {
                    println!("  📝 {}", customer.memo);
                }
            }
        }

        Commands::History { name } => {
            println!("📸 来店履歴\n");

            let visits = VisitStore::open(config.visits_path())?;
            let ordered = match &name {
                Some(n) => visits.find_by_customer_desc(n),
                None => visits.by_date_desc(),
            };

            if ordered.is_empty() {
                println!("来店履歴がありません");
            }
            for &i in &ordered {
                let visit = &visits.records()[i];
                println!(
                    "🗓️ {} | {} - {}",
                    visit.date, visit.customer_name, visit.menu
                );
                if !visit.memo.is_empty() {
                    println!("  📝 {}", visit.memo);
                }
                if !visit.photo.is_empty() {
                    println!("  📷 {}", visit.photo);
                }
            }
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データフォルダを設定しました");
            }

            if show {
                println!("設定:");
                println!("  データフォルダ: {}", config.data_dir.display());
                println!("  顧客ファイル: {}", config.customers_path().display());
                println!("  履歴ファイル: {}", config.visits_path().display());
                println!("  写真フォルダ: {}", config.photos_dir().display());
            }
        }
    }

    Ok(())
}

fn age_label(birthdate: &str) -> String {
    match age(birthdate) {
        Some(a) => format!("{}歳", a),
        None => "不明".to_string(),
    }
}
