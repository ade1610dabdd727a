mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::AppConfig;
use controller::AppController;
use model::{AppModel, RecommendationClient, RecommendationSource, Song};
use view::AppView;

const TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = AppConfig::from_env()?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(
        api_url = %config.api_url,
        timeout = ?config.timeout,
        stale_policy = ?config.stale_policy,
        "=== moodify starting ==="
    );

    let client = RecommendationClient::new(config.api_url.clone(), config.timeout)?;

    // `moodify <mood...>` answers once on stdout instead of opening the TUI
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let ok = run_once(&client, &args.join(" "), &mut io::stdout(), &mut io::stderr()).await?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone(), Arc::new(client), config.stale_policy);

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("moodify shutting down");
    Ok(ExitCode::SUCCESS)
}

/// Answer one mood on `out`. A failed request is reported on `err` and
/// returns `false`.
async fn run_once(
    source: &dyn RecommendationSource,
    mood: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let songs = match source.fetch_recommendations(mood).await {
        Ok(songs) => songs,
        Err(e) => {
            tracing::error!(mood, kind = e.kind(), error = %e, "One-shot query failed");
            writeln!(err, "{}", e)?;
            return Ok(false);
        }
    };

    if songs.is_empty() {
        writeln!(out, "No songs found for \"{}\"", mood)?;
    }
    for song in &songs {
        writeln!(out, "{}", format_song_line(song))?;
    }
    Ok(true)
}

fn format_song_line(song: &Song) -> String {
    format!("{} - {} <{}>", song.name, song.artist, song.url)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    let mut revision = model.lock().await.subscribe();
    let mut needs_redraw = true;

    loop {
        model.lock().await.auto_clear_old_notices().await;

        // Redraw only when the model changed or the terminal was resized
        if needs_redraw || revision.has_changed().unwrap_or(true) {
            revision.borrow_and_update();
            needs_redraw = false;

            let (ui_state, query, should_quit) = {
                let model_guard = model.lock().await;
                (
                    model_guard.get_ui_state().await,
                    model_guard.get_query_state().await,
                    model_guard.should_quit().await,
                )
            };

            if should_quit {
                break;
            }

            terminal.draw(|f| {
                AppView::render(f, &ui_state, &query);
            })?;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;
    use url::Url;

    async fn client_for(router: Router) -> RecommendationClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        RecommendationClient::new(base, Some(Duration::from_secs(5))).unwrap()
    }

    async fn answer(client: &RecommendationClient, mood: &str) -> (bool, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = run_once(client, mood, &mut out, &mut err).await.unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_format_song_line() {
        let song = Song {
            name: "Walking on Sunshine".into(),
            artist: "Katrina and the Waves".into(),
            url: "https://example.com/a".into(),
        };
        assert_eq!(
            format_song_line(&song),
            "Walking on Sunshine - Katrina and the Waves <https://example.com/a>"
        );
    }

    #[tokio::test]
    async fn test_run_once_prints_songs() {
        let client = client_for(Router::new().route(
            "/recommend",
            get(|| async {
                Json(json!({"songs":[
                    {"name":"Walking on Sunshine","artist":"Katrina and the Waves","url":"https://example.com/a"},
                    {"name":"Happy","artist":"Pharrell Williams","url":"https://example.com/b"}
                ]}))
            }),
        ))
        .await;

        let (ok, out, err) = answer(&client, "happy").await;
        assert!(ok);
        assert_eq!(
            out,
            "Walking on Sunshine - Katrina and the Waves <https://example.com/a>\n\
             Happy - Pharrell Williams <https://example.com/b>\n"
        );
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_run_once_empty_result() {
        let client = client_for(
            Router::new().route("/recommend", get(|| async { Json(json!({"songs": []})) })),
        )
        .await;

        let (ok, out, err) = answer(&client, "so so").await;
        assert!(ok);
        assert_eq!(out, "No songs found for \"so so\"\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_run_once_service_error_goes_to_stderr() {
        let client = client_for(Router::new().route(
            "/recommend",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error":"boom"}))) }),
        ))
        .await;

        let (ok, out, err) = answer(&client, "happy").await;
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, "boom\n");
    }
}
