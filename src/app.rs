use ratatui::layout::Rect;
use tokio::task::JoinHandle;
use crate::chat::ChatState;
use crate::config::Config;
use crate::fact::FactClient;
use crate::profile::{Locale, HIGHLIGHTS, SOCIAL_LINKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Links,
    Highlights,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Input => FocusPane::Links,
            FocusPane::Links => FocusPane::Highlights,
            FocusPane::Highlights => FocusPane::Input,
        }
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub locale: Option<Locale>,

    // Chat state
    pub chat: ChatState,
    pub chat_scroll: u16,
    pub chat_height: u16, // inner height of the transcript, set during render
    pub chat_lines: u16,  // wrapped transcript length, set during render
    pub fact_task: Option<JoinHandle<anyhow::Result<String>>>,

    // Selection in the link rows
    pub selected_link: usize,
    pub selected_highlight: usize,

    // Animation state
    pub animation_frame: u8, // 0-2 for the loading dots

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub send_area: Option<Rect>,

    pub fact: FactClient,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let locale = Locale::from_str(&config.locale);
        if locale.is_none() {
            tracing::warn!(locale = %config.locale, "unknown locale, bio will be hidden");
        }

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            focus: FocusPane::Input,
            locale,

            chat: ChatState::new(),
            chat_scroll: 0,
            chat_height: 0,
            chat_lines: 0,
            fact_task: None,

            selected_link: 0,
            selected_highlight: 0,

            animation_frame: 0,

            chat_area: None,
            send_area: None,

            fact: FactClient::new(&config.fact_url),
        }
    }

    /// Submit the current input and start the fact request in the background.
    pub fn send_message(&mut self) {
        if self.fact_task.is_some() || !self.chat.submit() {
            return;
        }

        tracing::info!(messages = self.chat.messages().len(), "message sent, fetching fact");
        self.scroll_chat_to_bottom();

        let fact = self.fact.clone();
        self.fact_task = Some(tokio::spawn(async move { fact.fetch().await }));
    }

    /// Apply the request result if the background task has finished.
    pub async fn poll_fact_task(&mut self) {
        let finished = self
            .fact_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false);

        if finished {
            self.await_fact_task().await;
        }
    }

    /// Wait for the in-flight request, if any, and apply its result.
    pub async fn await_fact_task(&mut self) {
        let Some(task) = self.fact_task.take() else {
            return;
        };

        let outcome = match task.await {
            Ok(result) => result,
            Err(e) => Err(anyhow::anyhow!("fact task failed: {}", e)),
        };
        self.chat.resolve(outcome);

        if self.chat.is_closed() {
            self.input_mode = InputMode::Normal;
        }
        self.scroll_chat_to_bottom();
    }

    pub fn tick_animation(&mut self) {
        if self.chat.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        } else {
            self.animation_frame = 0;
        }
    }

    // Transcript scrolling

    pub fn max_chat_scroll(&self) -> u16 {
        self.chat_lines.saturating_sub(self.chat_height)
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(self.max_chat_scroll());
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    /// Jump to the newest message. The exact offset is clamped on the next render.
    pub fn scroll_chat_to_bottom(&mut self) {
        self.chat_scroll = u16::MAX;
    }

    // Link selection

    pub fn select_next(&mut self) {
        match self.focus {
            FocusPane::Links => {
                self.selected_link = (self.selected_link + 1) % SOCIAL_LINKS.len();
            }
            FocusPane::Highlights => {
                self.selected_highlight = (self.selected_highlight + 1) % HIGHLIGHTS.len();
            }
            FocusPane::Input => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            FocusPane::Links => {
                self.selected_link =
                    (self.selected_link + SOCIAL_LINKS.len() - 1) % SOCIAL_LINKS.len();
            }
            FocusPane::Highlights => {
                self.selected_highlight =
                    (self.selected_highlight + HIGHLIGHTS.len() - 1) % HIGHLIGHTS.len();
            }
            FocusPane::Input => {}
        }
    }

    pub fn selected_url(&self) -> Option<&'static str> {
        match self.focus {
            FocusPane::Links => SOCIAL_LINKS.get(self.selected_link).map(|l| l.href),
            FocusPane::Highlights => HIGHLIGHTS.get(self.selected_highlight).map(|h| h.href),
            FocusPane::Input => None,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
        self.input_mode = if self.focus == FocusPane::Input && self.chat.accepts_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
    }
}
