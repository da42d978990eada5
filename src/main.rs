//! hanja - 한자 검색/학습 도구 CLI

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hanja_study::app::{now_millis, AppState, ClearOutcome, ResultRow};
use hanja_study::config::{load_config, load_config_from};
use hanja_study::data::{load, Dataset, RecordKey, Source};
use hanja_study::search::{Pagination, RadicalSelection};
use hanja_study::store::{format_label, FileStore, Persisted};

#[derive(Parser)]
#[command(name = "hanja", about = "한자 검색 및 학습 도구", version)]
struct Cli {
    /// 한자 데이터 JSON 파일
    #[arg(long, global = true, conflicts_with = "chunks")]
    data: Option<PathBuf>,

    /// 데이터 조각 디렉토리 (chunks_metadata.json 위치)
    #[arg(long, global = true)]
    chunks: Option<PathBuf>,

    /// 설정 파일 경로
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 조건으로 한자 검색
    Search {
        /// 검색어 (한자, 음, 훈음)
        query: Option<String>,

        /// 교육 수준 (중학교, 고등학교 등)
        #[arg(long)]
        education: Option<String>,

        /// 급수 (여러 번 지정 가능)
        #[arg(long = "grade")]
        grades: Vec<String>,

        /// 장단음
        #[arg(long)]
        length: Option<String>,

        /// 음의 초성 (ㄱ, ㄴ, ...)
        #[arg(long)]
        chosung: Option<char>,

        /// 음 (초성보다 우선)
        #[arg(long)]
        syllable: Option<String>,

        /// 즐겨찾기만
        #[arg(long)]
        favorites_only: bool,

        /// 페이지 번호
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// 초성에 해당하는 음 목록
    Syllables {
        chosung: char,
    },

    /// 즐겨찾기 추가/제거
    Favorite {
        /// 레코드 식별자
        id: RecordKey,
    },

    /// 상세 페이지 열기 (최근 기록에 추가)
    Open {
        id: RecordKey,
    },

    /// 최근 본 한자
    Recent {
        /// 해당 위치(0부터)의 기록 삭제
        #[arg(long)]
        remove: Option<usize>,

        /// 전체 삭제
        #[arg(long)]
        clear: bool,

        /// 확인 없이 삭제
        #[arg(long)]
        yes: bool,
    },

    /// 부수 목록
    Radicals {
        /// 부수 획수
        #[arg(long)]
        stroke: Option<u32>,

        /// 부수/이름 검색어
        #[arg(long)]
        query: Option<String>,
    },

    /// 부수별 한자
    Radical {
        glyph: String,

        /// 즐겨찾기만
        #[arg(long)]
        favorites_only: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// 다크모드 전환
    DarkMode,
}

impl Commands {
    fn needs_data(&self) -> bool {
        !matches!(self, Commands::Recent { .. } | Commands::DarkMode)
    }
}

fn main() -> ExitCode {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    let source = match (&cli.data, &cli.chunks) {
        (Some(file), _) => Source::Json(file.clone()),
        (None, Some(dir)) => Source::Chunks(dir.clone()),
        (None, None) => Source::Chunks(PathBuf::from(".")),
    };

    let dataset = match load(&source, config.xor_key) {
        Ok(dataset) => dataset,
        Err(e) if cli.command.needs_data() => {
            eprintln!("데이터를 불러오지 못했습니다: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            log::info!("데이터 없이 실행: {}", e);
            Dataset::default()
        }
    };

    let store = FileStore::new(config.storage_dir());
    let mut state = AppState::new(dataset, Box::new(store), config);
    run(&mut state, cli.command)
}

fn run(state: &mut AppState, command: Commands) -> ExitCode {
    match command {
        Commands::Search {
            query,
            education,
            grades,
            length,
            chosung,
            syllable,
            favorites_only,
            page,
        } => {
            if let Some(query) = query {
                state.set_search(query);
            }
            if let Some(education) = education {
                state.set_education(education);
            }
            if let Some(length) = length {
                state.set_length(length);
            }
            for grade in &grades {
                state.check_grade(grade, true);
            }
            if !grades.is_empty() {
                state.apply_grades();
            }
            if chosung.is_some() {
                state.select_chosung(chosung);
            }
            if let Some(syllable) = syllable {
                state.select_syllable(&syllable);
            }
            if favorites_only {
                state.toggle_favorites_only();
            }
            state.go_to_page(page);
            print_results(state);
        }
        Commands::Syllables { chosung } => match state.select_chosung(Some(chosung)) {
            Some(syllables) if !syllables.is_empty() => println!("{}", syllables.join(" ")),
            _ => println!("'{}'에 해당하는 음이 없습니다.", chosung),
        },
        Commands::Favorite { id } => {
            if state.dataset().get(&id).is_none() {
                log::warn!("데이터에 없는 식별자: {}", id);
            }
            let result = state.toggle_favorite(id.clone());
            if result.value {
                println!("★ {} 즐겨찾기에 추가했습니다.", id);
            } else {
                println!("☆ {} 즐겨찾기에서 제거했습니다.", id);
            }
            warn_if_not_saved(&result);
        }
        Commands::Open { id } => {
            let Some(result) = state.open_record(&id, now_millis()) else {
                eprintln!("식별자 {}에 해당하는 한자가 없습니다.", id);
                return ExitCode::FAILURE;
            };
            let url = state.dataset().get(&id).and_then(|record| record.safe_url());
            match url {
                Some(url) => println!("{} {}", result.value.label(), url),
                None => println!("{} (링크 없음)", result.value.label()),
            }
            warn_if_not_saved(&result);
        }
        Commands::Recent { remove, clear, yes } => {
            if let Some(index) = remove {
                let result = state.remove_recent(index);
                match &result.value {
                    Some(entry) => println!("삭제: {}", entry.label()),
                    None => println!("{}번 기록이 없습니다.", index),
                }
                warn_if_not_saved(&result);
            } else if clear {
                match state.clear_recent(|count| yes || confirm(count)) {
                    ClearOutcome::Empty => println!("삭제할 기록이 없습니다."),
                    ClearOutcome::Declined => println!("취소했습니다."),
                    ClearOutcome::Cleared(result) => {
                        println!("최근 기록을 모두 삭제했습니다.");
                        warn_if_not_saved(&result);
                    }
                }
            } else {
                print_recent(state);
            }
        }
        Commands::Radicals { stroke, query } => {
            let found = state
                .radicals()
                .find(stroke, query.as_deref().unwrap_or(""));
            if found.is_empty() {
                println!("해당하는 부수가 없습니다.");
            }
            for info in found {
                println!(
                    "{} {}획 {} ({}자)",
                    info.radical, info.strokes, info.name, info.hanja_count
                );
            }
        }
        Commands::Radical {
            glyph,
            favorites_only,
            page,
        } => {
            let selection = RadicalSelection {
                radical: Some(glyph),
                strokes: None,
                favorites_only,
            };
            let (rows, count, pagination) = state.radical_view(&selection, page);
            if rows.is_empty() {
                println!("결과가 없습니다.");
            } else {
                println!("{}자", count);
                print_rows(&rows);
                print_pagination(&pagination);
            }
        }
        Commands::DarkMode => {
            let result = state.toggle_dark_mode();
            println!(
                "다크모드 {} {}",
                if result.value { "켜짐" } else { "꺼짐" },
                state.dark_mode().button_icon()
            );
            warn_if_not_saved(&result);
        }
    }
    ExitCode::SUCCESS
}

fn print_results(state: &AppState) {
    let view = state.view();
    for chip in &view.chips {
        print!("[{}] ", chip);
    }
    if !view.chips.is_empty() {
        println!();
    }
    if view.is_empty() {
        println!("결과가 없습니다.");
        return;
    }
    println!("{}자 ({}행) · 급수: {}", view.character_count, view.total_rows, view.grade_label);
    print_rows(&view.rows);
    print_pagination(&view.pagination);
}

fn print_rows(rows: &[ResultRow<'_>]) {
    for row in rows {
        let record = row.record;
        println!(
            "{} {:<6} {:<16} {:<6} {:<8} {:<4} {}",
            if row.is_favorite { "★" } else { "☆" },
            format_label(&record.character, &record.display_form, &record.position_class),
            record.display_form,
            or_dash(&record.grade),
            or_dash(&record.education_level),
            or_dash(&record.length_class),
            record.key()
        );
    }
}

fn print_pagination(pagination: &Pagination) {
    let pages: Vec<String> = pagination
        .window
        .iter()
        .map(|&page| {
            if page == pagination.current_page {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    println!(
        "{} {} {}  ({}/{})",
        if pagination.has_prev() { "◀" } else { " " },
        pages.join(" "),
        if pagination.has_next() { "▶" } else { " " },
        pagination.current_page,
        pagination.total_pages
    );
}

fn print_recent(state: &AppState) {
    let recent = state.recent();
    if recent.is_empty() {
        println!("최근 본 한자가 없습니다.");
        return;
    }
    for (index, entry) in recent.entries().iter().enumerate() {
        println!("{:>2}. {} {}", index, entry.label(), entry.display_form);
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn confirm(count: usize) -> bool {
    print!("최근 기록 {}개를 모두 삭제할까요? [y/N] ", count);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn warn_if_not_saved<T>(result: &Persisted<T>) {
    if let Some(e) = &result.error {
        eprintln!("⚠️  변경 사항을 저장하지 못했습니다. 다시 실행하면 사라질 수 있습니다.");
        eprintln!("   {}", e);
    }
}
