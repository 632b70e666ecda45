use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use book_publisher::core::{BookRecord, Category, Session, User};
use book_publisher::logger;
use book_publisher::terminal::{StdinCredentialPrompt, TerminalPresenter};
use book_publisher::workflow::GenerationOutcome;
use book_publisher::{AppConfig, AppShell};

#[derive(Parser, Debug)]
#[command(name = "book_publisher", version, about = "도서 등록 / 조회 도구")]
struct Cli {
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 전체 도서 목록
    List,
    /// 도서 상세
    Show { id: String },
    /// 내가 등록한 도서
    Mine {
        #[arg(long)]
        user: String,
    },
    /// 새 도서 등록
    Register {
        #[arg(long)]
        user: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "로맨스")]
        category: Category,
        /// AI 표지 생성
        #[arg(long)]
        cover: bool,
        /// 표지 생성용 API Key (없으면 입력 요청)
        #[arg(long)]
        api_key: Option<String>,
    },
}

fn print_book(book: &BookRecord) {
    println!("[{}] {} ({})", book.id, book.title, book.category);
    if !book.content.is_empty() {
        println!("    {}", book.content);
    }
    if let Some(url) = &book.cover_image_url {
        println!("    표지: {}", url);
    }
}

fn session_for(user: &str) -> Session {
    Session::signed_in(User {
        id: user.to_string(),
        name: None,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    info!("🔌 도서 서버: {}", config.book_api_base_url);

    let presenter = Arc::new(TerminalPresenter::new());
    let mut shell = AppShell::from_config(&config, presenter.clone())
        .context("HTTP 클라이언트 생성 실패")?;
    shell.mount().await;

    match cli.command {
        Command::List => {
            if !shell.store().is_loaded() {
                return Err(anyhow!("서버에서 도서 목록을 가져오지 못했습니다"));
            }
            for book in shell.store().books() {
                print_book(book);
            }
            info!("총 {} 권", shell.store().len());
        }
        Command::Show { id } => {
            let book = shell
                .open_book(&id)
                .ok_or_else(|| anyhow!("도서를 찾을 수 없습니다: {}", id))?;
            print_book(book);
        }
        Command::Mine { user } => {
            let session = session_for(&user);
            for book in shell.open_profile(&session)? {
                print_book(book);
            }
        }
        Command::Register {
            user,
            title,
            content,
            category,
            cover,
            api_key,
        } => {
            let session = session_for(&user);
            let workflow = shell.open_registration(&session)?;
            workflow.set_title(&title).await?;
            workflow.set_content(&content).await?;
            workflow.set_category(category).await?;

            if cover {
                let outcome = match api_key.as_deref() {
                    Some(key) => workflow.submit_credential(key).await,
                    None => workflow.generate_cover(&StdinCredentialPrompt).await,
                };
                match outcome {
                    Ok(GenerationOutcome::CoverReady(url)) => println!("🎨 표지: {}", url),
                    Ok(GenerationOutcome::CredentialRequired) => {
                        println!("API Key 가 없어 표지 없이 등록합니다")
                    }
                    // 표지 실패는 알림으로 끝내고 등록은 계속한다
                    Err(e) => info!("표지 없이 진행: {}", e),
                }
            }

            match shell.complete_registration(&workflow).await? {
                Some(record) => print_book(&record),
                None => println!("등록되었습니다 (서버가 레코드를 돌려주지 않음)"),
            }
            if let Some(route) = presenter.current_route() {
                info!("🎉 등록 완료, 현재 화면: {}", route);
            }
        }
    }

    Ok(())
}
