use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::catalog::{self, Mode, TopicDef};
use crate::config::Config;
use crate::event::AppEvent;
use crate::generator::{self, Question, QuestionSource};
use crate::generator::gemini::GeminiClient;
use crate::session::QuizSession;
use crate::stats::UserStats;
use crate::store::json_store::JsonStore;
use crate::sync::SheetClient;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
    ModeSelect,
    TopicSelect,
    Quiz,
    Summary,
}

pub struct App {
    pub screen: Screen,
    pub email_input: LineInput,
    pub email: String,
    /// True while a remote load or push is outstanding.
    pub syncing: bool,
    pub selected_mode: Mode,
    pub mode_selected: usize,
    pub topic_selected: usize,
    pub selected_topic: Option<&'static TopicDef>,
    pub quiz: Option<QuizSession>,
    pub stats: UserStats,
    pub config: Config,
    pub theme: &'static Theme,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    sheet: SheetClient,
    source: Arc<dyn QuestionSource>,
    tx: Sender<AppEvent>,
    /// Bumped on every question request and on quiz discard; stale fetch
    /// results carry an old value and are dropped.
    fetch_seq: u64,
}

impl App {
    pub fn new(config: Config, tx: Sender<AppEvent>) -> Self {
        let store = match JsonStore::new() {
            Ok(store) => Some(store),
            Err(err) => {
                log::warn!("local cache unavailable: {err}");
                None
            }
        };
        let source: Arc<dyn QuestionSource> = Arc::new(GeminiClient::from_config(&config));
        Self::with_parts(config, store, source, tx)
    }

    /// Full constructor; tests inject a tempdir store and a stub source.
    pub fn with_parts(
        config: Config,
        store: Option<JsonStore>,
        source: Arc<dyn QuestionSource>,
        tx: Sender<AppEvent>,
    ) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let sheet = SheetClient::new(config.script_url.clone(), config.request_timeout());

        // A complete cached session skips the login screen entirely.
        let cached = store.as_ref().and_then(|s| s.load_session());
        let cached_email = store.as_ref().and_then(|s| s.load_identity());
        let (screen, email, stats) = match cached {
            Some((email, stats)) => (Screen::Home, email, stats),
            None => (Screen::Login, String::new(), UserStats::default()),
        };
        let email_input = if email.is_empty() {
            LineInput::new(cached_email.as_deref().unwrap_or(""))
        } else {
            LineInput::new(&email)
        };

        Self {
            screen,
            email_input,
            email,
            syncing: false,
            selected_mode: Mode::Quick,
            mode_selected: 0,
            topic_selected: 0,
            selected_topic: None,
            quiz: None,
            stats,
            config,
            theme,
            store,
            should_quit: false,
            sheet,
            source,
            tx,
            fetch_seq: 0,
        }
    }

    // --- Login / home ---

    /// LOGIN -> HOME (guard: non-empty email). Caches the identity, then
    /// kicks off the remote load; the screen switches when the result
    /// arrives so a slow endpoint shows the sync indicator, not a freeze.
    pub fn submit_identity(&mut self) {
        if self.syncing {
            return;
        }
        let email = self.email_input.value().trim().to_string();
        if email.is_empty() {
            return;
        }
        self.email = email.clone();
        if let Some(ref store) = self.store
            && let Err(err) = store.save_identity(&email)
        {
            log::warn!("failed to cache identity: {err}");
        }

        self.syncing = true;
        let sheet = self.sheet.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let loaded = sheet.load(&email);
            let _ = tx.send(AppEvent::RemoteLoaded(loaded));
        });
    }

    /// Remote load finished. Present data replaces and re-caches the local
    /// stats; absent data leaves the cache untouched. Login completes either
    /// way.
    pub fn on_remote_loaded(&mut self, remote: Option<UserStats>) {
        self.syncing = false;
        if let Some(stats) = remote {
            self.stats = stats;
            if let Some(ref store) = self.store
                && let Err(err) = store.save_stats(&self.stats)
            {
                log::warn!("failed to cache remote stats: {err}");
            }
            // Wholesale replacement gets pushed back out, same as any other
            // stats change.
            self.push_remote();
        }
        if self.screen == Screen::Login {
            self.screen = Screen::Home;
        }
    }

    pub fn switch_identity(&mut self) {
        self.screen = Screen::Login;
    }

    pub fn enter_practice(&mut self) {
        self.mode_selected = 0;
        self.screen = Screen::ModeSelect;
    }

    // --- Mode / topic selection ---

    pub fn pick_mode(&mut self, mode: Mode) {
        self.selected_mode = mode;
        self.topic_selected = 0;
        self.screen = Screen::TopicSelect;
    }

    pub fn back_to_mode_select(&mut self) {
        self.screen = Screen::ModeSelect;
    }

    pub fn topics(&self) -> Vec<&'static TopicDef> {
        catalog::topics_for(self.selected_mode)
    }

    pub fn topic_cursor_down(&mut self) {
        let len = self.topics().len();
        if len > 0 {
            self.topic_selected = (self.topic_selected + 1).min(len - 1);
        }
    }

    pub fn topic_cursor_up(&mut self) {
        self.topic_selected = self.topic_selected.saturating_sub(1);
    }

    pub fn start_selected_topic(&mut self) {
        if let Some(&topic) = self.topics().get(self.topic_selected) {
            self.start_quiz(topic);
        }
    }

    // --- Quiz flow ---

    pub fn start_quiz(&mut self, topic: &'static TopicDef) {
        self.selected_topic = Some(topic);
        self.quiz = Some(QuizSession::new(topic.id));
        self.screen = Screen::Quiz;
        self.request_question();
    }

    /// Spawn a question fetch for the active topic. The worker always posts
    /// a question back: a generation failure is mapped to the degraded
    /// placeholder so the quiz loop cannot stall.
    fn request_question(&mut self) {
        let Some(topic) = self.selected_topic else {
            return;
        };
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.question = None;
            quiz.selected = None;
            quiz.loading = true;
        }
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let question = match source.generate(topic) {
                Ok(q) => q,
                Err(err) => {
                    log::warn!("question generation failed for {}: {err}", topic.id);
                    generator::degraded_question(topic)
                }
            };
            let _ = tx.send(AppEvent::QuestionReady {
                seq,
                question: Box::new(question),
            });
        });
    }

    pub fn on_question_ready(&mut self, seq: u64, question: Question) {
        if seq != self.fetch_seq || self.screen != Screen::Quiz {
            return;
        }
        if let Some(quiz) = self.quiz.as_mut()
            && quiz.loading
        {
            quiz.question = Some(question);
            quiz.loading = false;
        }
    }

    /// Commit an answer. Accepted exactly once per question and never while
    /// a fetch is outstanding. The local cache write happens synchronously
    /// before the remote push thread is spawned, so a crash mid-push never
    /// loses the local record.
    pub fn select_option(&mut self, index: usize) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if quiz.loading || quiz.answered() {
            return;
        }
        let Some(question) = quiz.question.as_ref() else {
            return;
        };
        if index >= question.options.len() {
            return;
        }

        quiz.selected = Some(index);
        let correct = !question.degraded && index == question.correct_index;
        quiz.results.push(correct);

        let topic_id = quiz.topic_id;
        self.stats = self.stats.record_answer(topic_id, correct, &self.email);
        if let Some(ref store) = self.store
            && let Err(err) = store.save_stats(&self.stats)
        {
            log::warn!("failed to cache stats: {err}");
        }
        self.push_remote();
    }

    fn push_remote(&mut self) {
        self.syncing = true;
        let sheet = self.sheet.clone();
        let email = self.email.clone();
        let stats = self.stats.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = sheet.save(&email, &stats);
            log::debug!("remote save: {outcome:?}");
            let _ = tx.send(AppEvent::SyncFinished);
        });
    }

    pub fn on_sync_finished(&mut self) {
        self.syncing = false;
    }

    /// Advance past a revealed answer: next question, or the summary after
    /// the last one.
    pub fn advance(&mut self) {
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        if !quiz.answered() {
            return;
        }
        if quiz.is_last() {
            self.screen = Screen::Summary;
        } else {
            if let Some(quiz) = self.quiz.as_mut() {
                quiz.index += 1;
            }
            self.request_question();
        }
    }

    /// QUIZ -> TOPIC_SELECT, discarding the in-flight session. Bumping the
    /// fetch counter orphans any outstanding fetch.
    pub fn exit_quiz(&mut self) {
        self.quiz = None;
        self.fetch_seq += 1;
        self.screen = Screen::TopicSelect;
    }

    pub fn retry_quiz(&mut self) {
        if let Some(topic) = self.selected_topic {
            self.start_quiz(topic);
        }
    }

    pub fn return_to_topics(&mut self) {
        self.quiz = None;
        self.screen = Screen::TopicSelect;
    }
}
