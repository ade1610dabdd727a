//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+C / Ctrl+Q quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c' | 'C' | 'q' | 'Q') = key.code {
                model.set_should_quit(true).await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // A notice blocks everything else until dismissed
        if ui_state.notice.is_some() {
            if let KeyCode::Esc | KeyCode::Enter = key.code {
                model.clear_notice().await;
            }
            return Ok(());
        }

        match ui_state.active_section {
            ActiveSection::Input => match key.code {
                KeyCode::Tab | KeyCode::BackTab => model.cycle_section().await,
                KeyCode::Enter => {
                    drop(model);
                    self.submit_mood().await;
                }
                KeyCode::Esc => model.clear_mood().await,
                KeyCode::Backspace => model.backspace_mood().await,
                KeyCode::Char(c) => model.append_to_mood(c).await,
                _ => {}
            },
            ActiveSection::Results => match key.code {
                KeyCode::Up => model.move_selection_up().await,
                KeyCode::Down => model.move_selection_down().await,
                KeyCode::Enter | KeyCode::Char('o' | 'O') => {
                    drop(model);
                    self.open_selected_song().await;
                }
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                    model.set_active_section(ActiveSection::Input).await;
                }
                _ => {}
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};
    use tokio::sync::Mutex;

    use super::*;
    use crate::controller::test_support::{ScriptedSource, song};
    use crate::model::{AppModel, QueryStatus, StalePolicy};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn setup() -> (AppController, Arc<ScriptedSource>, Arc<Mutex<AppModel>>) {
        let model = Arc::new(Mutex::new(AppModel::new()));
        let source = Arc::new(ScriptedSource::default());
        let controller =
            AppController::new(model.clone(), source.clone(), StalePolicy::LastWriteWins)
                .with_link_opener(Arc::new(|_: &str| Ok(())));
        (controller, source, model)
    }

    async fn type_text(controller: &AppController, text: &str) {
        for c in text.chars() {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_typing_edits_mood() {
        let (controller, _source, model) = setup();

        type_text(&controller, "Happyy").await;
        controller.handle_key_event(press(KeyCode::Backspace)).await.unwrap();
        assert_eq!(model.lock().await.get_ui_state().await.mood_input, "Happy");

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert_eq!(model.lock().await.get_ui_state().await.mood_input, "");
    }

    #[tokio::test]
    async fn test_release_events_are_ignored() {
        let (controller, _source, model) = setup();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;

        controller.handle_key_event(key).await.unwrap();
        assert_eq!(model.lock().await.get_ui_state().await.mood_input, "");
    }

    #[tokio::test]
    async fn test_enter_submits_and_focuses_results() {
        let (controller, source, model) = setup();
        let reply = source.expect("sad");

        type_text(&controller, "sad").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        assert_eq!(
            model.lock().await.get_query_state().await.status,
            QueryStatus::Loading
        );

        reply
            .send(Ok(vec![
                song("One", "x", "https://example.com/1"),
                song("Two", "x", "https://example.com/2"),
            ]))
            .unwrap();

        // Let the spawned request task finish
        let mut rx = model.lock().await.subscribe();
        while model.lock().await.get_query_state().await.is_loading() {
            rx.changed().await.unwrap();
        }

        let ui_state = model.lock().await.get_ui_state().await;
        assert_eq!(ui_state.active_section, ActiveSection::Results);

        controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
        assert_eq!(model.lock().await.get_ui_state().await.selected_song, 1);

        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        assert_eq!(
            model.lock().await.get_ui_state().await.active_section,
            ActiveSection::Input
        );
    }

    #[tokio::test]
    async fn test_open_key_uses_link_opener() {
        let (controller, _source, model) = setup();
        let opened = Arc::new(StdMutex::new(Vec::new()));
        let sink = opened.clone();
        let controller = controller.with_link_opener(Arc::new(move |url: &str| {
            sink.lock().unwrap().push(url.to_string());
            Ok(())
        }));

        {
            let model = model.lock().await;
            let id = model.begin_query("happy".into()).await;
            model
                .apply_query_result(
                    id,
                    Ok(vec![song("One", "x", "https://example.com/1")]),
                    StalePolicy::LastWriteWins,
                )
                .await;
            model.set_active_section(ActiveSection::Results).await;
        }

        controller.handle_key_event(press(KeyCode::Char('o'))).await.unwrap();
        assert_eq!(opened.lock().unwrap().as_slice(), ["https://example.com/1"]);
    }

    #[tokio::test]
    async fn test_notice_blocks_until_dismissed() {
        let (controller, _source, model) = setup();
        model.lock().await.set_notice("oops".into()).await;

        type_text(&controller, "abc").await;
        assert_eq!(model.lock().await.get_ui_state().await.mood_input, "");

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        type_text(&controller, "abc").await;
        assert_eq!(model.lock().await.get_ui_state().await.mood_input, "abc");
    }

    #[tokio::test]
    async fn test_ctrl_q_quits_from_any_section() {
        let (controller, _source, model) = setup();
        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        controller.handle_key_event(ctrl('q')).await.unwrap();
        assert!(model.lock().await.should_quit().await);

        let (controller, _source, model) = setup();
        controller.handle_key_event(ctrl('c')).await.unwrap();
        assert!(model.lock().await.should_quit().await);
        assert_eq!(model.lock().await.get_ui_state().await.mood_input, "");
    }
}
