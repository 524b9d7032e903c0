//! 対話式の管理画面
//!
//! ホーム / 新規登録 / 会員検索 / 顧客一覧 / 来店履歴 の5画面を
//! 端末上のページ遷移として実装する。ページと検索キーワードは
//! `UiState` として明示的に持ち回る。
//!
//! ストアはセッション開始時に一度だけ読み込み、終了まで保持する。
//! 変更のある操作は毎回その場でCSVへ書き戻す（同時に複数の
//! セッションを開く運用は想定しない）。

use chrono::{Local, NaiveDate};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::path::Path;

use crate::config::Config;
use crate::error::{KarteError, Result};
use crate::options::{GEL_OPTIONS, MENU_OPTIONS};
use crate::photo;
use crate::store::{age, Customer, CustomerStore, Visit, VisitStore};

/// 画面の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Register,
    Search,
    List,
    History,
    Quit,
}

/// 画面遷移の状態
#[derive(Debug, Clone)]
pub struct UiState {
    pub page: Page,
    pub search_keyword: String,
}

impl UiState {
    fn home() -> Self {
        Self {
            page: Page::Home,
            search_keyword: String::new(),
        }
    }

    fn page(page: Page) -> Self {
        Self {
            page,
            search_keyword: String::new(),
        }
    }

    fn search(keyword: String) -> Self {
        Self {
            page: Page::Search,
            search_keyword: keyword,
        }
    }
}

/// セッション本体
pub fn run_session(config: &Config) -> Result<()> {
    photo::ensure_photo_dir(&config.photos_dir())?;

    let mut customers = CustomerStore::open(config.customers_path())?;
    let mut visits = VisitStore::open(config.visits_path())?;

    let photo_dir = config.photos_dir();
    let mut state = UiState::home();
    loop {
        state = match state.page {
            Page::Home => home_page()?,
            Page::Register => register_page(&mut customers)?,
            Page::Search => search_page(&state, &mut customers, &mut visits, &photo_dir)?,
            Page::List => list_page(&customers)?,
            Page::History => history_page(&visits)?,
            Page::Quit => break,
        };
    }

    println!("👋 終了します");
    Ok(())
}

// --------------------- トップページ ---------------------

fn home_page() -> Result<UiState> {
    println!();
    let items = [
        "➕ 新規登録",
        "🔍 会員検索",
        "📋 顧客一覧",
        "📸 来店履歴",
        "終了",
    ];
    let choice = Select::new()
        .with_prompt("メニューを選択してください")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    Ok(match choice {
        0 => UiState::page(Page::Register),
        1 => UiState::page(Page::Search),
        2 => UiState::page(Page::List),
        3 => UiState::page(Page::History),
        _ => UiState::page(Page::Quit),
    })
}

// --------------------- 新規顧客登録 ---------------------

fn register_page(customers: &mut CustomerStore) -> Result<UiState> {
    println!("\n➕ 新規顧客登録");

    let name: String = Input::new()
        .with_prompt("名前")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let phone: String = Input::new()
        .with_prompt("電話番号")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let birthdate = prompt_date("生年月日", "")?;
    let gels = prompt_gels(&[])?;
    let memo: String = Input::new()
        .with_prompt("メモ")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let mut customer = Customer {
        name: name.trim().to_string(),
        phone: phone.trim().to_string(),
        birthdate,
        gels: String::new(),
        memo,
    };
    customer.set_gels(&gels);
    let registered_name = customer.name.clone();

    match customers.add(customer) {
        Ok(_) => {
            customers.save()?;
            println!("✔ {} さんを登録しました", registered_name);
            Ok(UiState::search(registered_name))
        }
        Err(KarteError::Validation(msg)) => {
            println!("⚠ {}", msg);
            Ok(UiState::page(Page::Register))
        }
        Err(e) => Err(e),
    }
}

// --------------------- 顧客検索 ---------------------

fn search_page(
    state: &UiState,
    customers: &mut CustomerStore,
    visits: &mut VisitStore,
    photo_dir: &Path,
) -> Result<UiState> {
    println!("\n🔍 顧客検索");

    let keyword: String = Input::new()
        .with_prompt("検索キーワード")
        .with_initial_text(state.search_keyword.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let keyword = keyword.trim().to_string();

    let matches = customers.search(&keyword);
    if matches.is_empty() {
        println!("該当する顧客がいません");
        return Ok(UiState::home());
    }

    // 複数ヒット時は対象を選んでもらう（同名の顧客も別レコードとして並ぶ）
    let index = if matches.len() == 1 {
        matches[0]
    } else {
        let labels: Vec<String> = matches
            .iter()
            .map(|&i| {
                let c = &customers.records()[i];
                format!("{}（{}）", c.name, c.phone)
            })
            .collect();
        let pick = Select::new()
            .with_prompt("顧客を選択")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        matches[pick]
    };

    customer_menu(index, keyword, customers, visits, photo_dir)
}

/// 選択した顧客に対する操作メニュー。削除したらホームへ戻る。
fn customer_menu(
    index: usize,
    keyword: String,
    customers: &mut CustomerStore,
    visits: &mut VisitStore,
    photo_dir: &Path,
) -> Result<UiState> {
    loop {
        let customer = match customers.get(index) {
            Some(c) => c.clone(),
            None => return Ok(UiState::home()),
        };
        show_profile(&customer);

        let items = [
            "✏️ 顧客情報を編集",
            "📌 来店履歴を登録",
            "🗓️ 来店履歴を見る",
            "🗑️ 顧客を削除",
            "🏠 トップに戻る",
        ];
        let choice = Select::new()
            .with_prompt("操作を選択")
            .items(&items)
            .default(4)
            .interact()
            .map_err(prompt_err)?;

        match choice {
            0 => edit_customer(index, customers)?,
            1 => register_visit(&customer.name, visits, photo_dir)?,
            2 => browse_visits(&customer.name, visits)?,
            3 => {
                if delete_customer(index, customers, visits)? {
                    return Ok(UiState::home());
                }
            }
            _ => return Ok(UiState::search(keyword)),
        }
    }
}

fn show_profile(customer: &Customer) {
    let age_label = match age(&customer.birthdate) {
        Some(a) => format!("{}歳", a),
        None => "不明".to_string(),
    };
    println!("\n{}（{}）", customer.name, customer.phone);
    println!("  🎂 生年月日: {}（{}）", customer.birthdate, age_label);
    println!("  💅 使用ジェル: {}", customer.gels);
    println!("  📝 メモ: {}", customer.memo);
}

fn edit_customer(index: usize, customers: &mut CustomerStore) -> Result<()> {
    let current = match customers.get(index) {
        Some(c) => c.clone(),
        None => return Ok(()),
    };

    let name: String = Input::new()
        .with_prompt("名前")
        .with_initial_text(current.name.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let phone: String = Input::new()
        .with_prompt("電話番号")
        .with_initial_text(current.phone.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let birthdate = prompt_date("生年月日", &current.birthdate)?;
    let gels = prompt_gels(&current.gel_list())?;
    let memo: String = Input::new()
        .with_prompt("メモ")
        .with_initial_text(current.memo.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let mut updated = Customer {
        name: name.trim().to_string(),
        phone: phone.trim().to_string(),
        birthdate,
        gels: String::new(),
        memo,
    };
    updated.set_gels(&gels);

    match customers.update(index, updated) {
        Ok(()) => {
            customers.save()?;
            println!("✔ 保存しました");
        }
        Err(KarteError::Validation(msg)) => println!("⚠ {}", msg),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn delete_customer(
    index: usize,
    customers: &mut CustomerStore,
    visits: &mut VisitStore,
) -> Result<bool> {
    let name = match customers.get(index) {
        Some(c) => c.name.clone(),
        None => return Ok(false),
    };

    let yes = Confirm::new()
        .with_prompt(format!("{} さんを削除しますか？（来店履歴も消えます）", name))
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    if !yes {
        return Ok(false);
    }

    if let Some(removed) = customers.remove(index) {
        customers.save()?;
        let count = visits.cascade_delete(&removed.name);
        visits.save()?;
        println!(
            "✔ {} さんのデータを削除しました（来店履歴 {}件）",
            removed.name, count
        );
        return Ok(true);
    }
    Ok(false)
}

// --------------------- 来店履歴 ---------------------

fn register_visit(customer_name: &str, visits: &mut VisitStore, photo_dir: &Path) -> Result<()> {
    println!("\n📌 来店履歴の登録");

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let date = prompt_date("来店日", &today)?;

    let menu_choice = Select::new()
        .with_prompt("メニュー")
        .items(MENU_OPTIONS)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let menu = MENU_OPTIONS[menu_choice].to_string();

    let memo: String = Input::new()
        .with_prompt("来店メモ")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let photo_input: String = Input::new()
        .with_prompt("写真ファイルのパス（任意、空欄でスキップ）")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let photo_path = if photo_input.trim().is_empty() {
        String::new()
    } else {
        match photo::import_photo(photo_dir, customer_name, &date, Path::new(photo_input.trim())) {
            Ok(path) => {
                println!("✔ 写真を保存しました: {}", path);
                path
            }
            Err(e) => {
                println!("⚠ {}", e);
                println!("  写真なしで登録を続けます");
                String::new()
            }
        }
    };

    visits.add(Visit {
        customer_name: customer_name.to_string(),
        date,
        photo: photo_path,
        memo,
        menu,
    });
    visits.save()?;
    println!("✔ 来店履歴を保存しました");
    Ok(())
}

fn browse_visits(customer_name: &str, visits: &mut VisitStore) -> Result<()> {
    loop {
        let ordered = visits.find_by_customer_desc(customer_name);
        if ordered.is_empty() {
            println!("来店履歴がありません");
            return Ok(());
        }

        let mut labels: Vec<String> = ordered
            .iter()
            .map(|&i| {
                let v = &visits.records()[i];
                format!("🗓️ {} - {}", v.date, v.menu)
            })
            .collect();
        labels.push("戻る".to_string());

        let choice = Select::new()
            .with_prompt("来店履歴を選択")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()
            .map_err(prompt_err)?;
        if choice == labels.len() - 1 {
            return Ok(());
        }

        visit_menu(ordered[choice], visits)?;
    }
}

fn visit_menu(index: usize, visits: &mut VisitStore) -> Result<()> {
    let visit = match visits.get(index) {
        Some(v) => v.clone(),
        None => return Ok(()),
    };

    println!("\n🗓️ {} - {}", visit.date, visit.menu);
    println!("  📝 メモ: {}", visit.memo);
    if photo::photo_exists(&visit.photo) {
        println!("  📷 写真: {}", visit.photo);
    } else {
        println!("  📁 写真なし");
    }

    let items = ["✏️ 更新", "❌ 削除", "戻る"];
    let choice = Select::new()
        .with_prompt("操作を選択")
        .items(&items)
        .default(2)
        .interact()
        .map_err(prompt_err)?;

    match choice {
        0 => {
            // メニューはここでは自由入力（選択肢の外の値もそのまま保存される）
            let menu: String = Input::new()
                .with_prompt("メニュー")
                .with_initial_text(visit.menu.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;
            let memo: String = Input::new()
                .with_prompt("メモ")
                .with_initial_text(visit.memo.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let mut updated = visit.clone();
            updated.menu = menu.trim().to_string();
            updated.memo = memo.trim().to_string();
            visits.update(index, updated);
            visits.save()?;
            println!("✔ 来店履歴を更新しました");
        }
        1 => {
            let yes = Confirm::new()
                .with_prompt("この来店履歴を削除しますか？")
                .default(false)
                .interact()
                .map_err(prompt_err)?;
            if yes {
                visits.remove(index);
                visits.save()?;
                println!("✔ 来店履歴を削除しました");
            }
        }
        _ => {}
    }
    Ok(())
}

// --------------------- 顧客一覧 ---------------------

fn list_page(customers: &CustomerStore) -> Result<UiState> {
    println!("\n📋 顧客一覧");

    if customers.is_empty() {
        println!("顧客が登録されていません");
        return Ok(UiState::home());
    }

    for customer in customers.records() {
        println!("{}", customer.name);
        println!(
            "  📞 {} / 🎂 {} / 💅 {}",
            customer.phone, customer.birthdate, customer.gels
        );
    }

    let mut labels: Vec<String> = customers.records().iter().map(|c| c.name.clone()).collect();
    labels.push("🏠 トップに戻る".to_string());

    let choice = Select::new()
        .with_prompt("顧客を選ぶと検索へ移動")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()
        .map_err(prompt_err)?;

    if choice == labels.len() - 1 {
        Ok(UiState::home())
    } else {
        Ok(UiState::search(labels[choice].clone()))
    }
}

// --------------------- 来店履歴一覧 ---------------------

fn history_page(visits: &VisitStore) -> Result<UiState> {
    println!("\n📸 来店履歴一覧");

    let ordered = visits.by_date_desc();
    if ordered.is_empty() {
        println!("来店履歴がありません");
        return Ok(UiState::home());
    }

    let mut labels: Vec<String> = Vec::new();
    for &i in &ordered {
        let v = &visits.records()[i];
        println!("{} | 🗓️ {} - 💅 {}", v.customer_name, v.date, v.menu);
        if !v.memo.is_empty() {
            println!("  📝 {}", v.memo);
        }
        if photo::photo_exists(&v.photo) {
            println!("  📷 {}", v.photo);
        } else {
            println!("  📁 写真なし");
        }
        labels.push(format!("{} | {} - {}", v.customer_name, v.date, v.menu));
    }
    labels.push("🏠 トップに戻る".to_string());

    let choice = Select::new()
        .with_prompt("顧客を選ぶと検索へ移動")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()
        .map_err(prompt_err)?;

    if choice == labels.len() - 1 {
        Ok(UiState::home())
    } else {
        let v = &visits.records()[ordered[choice]];
        Ok(UiState::search(v.customer_name.clone()))
    }
}

// --------------------- 入力ヘルパー ---------------------

fn prompt_err(e: dialoguer::Error) -> KarteError {
    KarteError::Prompt(e.to_string())
}

/// YYYY-MM-DD形式の日付入力（正しい形式になるまで再入力）
fn prompt_date(prompt: &str, initial: &str) -> Result<String> {
    let text: String = Input::new()
        .with_prompt(format!("{}（YYYY-MM-DD）", prompt))
        .with_initial_text(initial.to_string())
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok() {
                Ok(())
            } else {
                Err("YYYY-MM-DD 形式で入力してください")
            }
        })
        .interact_text()
        .map_err(prompt_err)?;
    Ok(text.trim().to_string())
}

/// ジェルの複数選択。`selected` に入っているものを選択済みで表示する。
fn prompt_gels(selected: &[String]) -> Result<Vec<String>> {
    let defaults: Vec<bool> = GEL_OPTIONS
        .iter()
        .map(|g| selected.iter().any(|s| s == g))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("使用ジェル（スペースで選択、Enterで確定）")
        .items(GEL_OPTIONS)
        .defaults(&defaults)
        .interact()
        .map_err(prompt_err)?;

    Ok(chosen
        .into_iter()
        .map(|i| GEL_OPTIONS[i].to_string())
        .collect())
}
