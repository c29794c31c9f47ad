//! Chat transcript and the submission state machine behind the input box.
//!
//! The widget is cosmetic: the only "reply" it can produce is a canned
//! sentence wrapped around whatever fact the API returned.

use anyhow::Result;

pub const GREETING: &str = "Hello! I am a chatbot made by Josh to answer questions about himself.";
pub const PROMPT: &str = "Go ahead and ask me anything you are curious about!";
pub const REPLY_PREFIX: &str =
    "Unfortunately, Josh has not implemented this chatbot yet. For now, have a cat fact: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Josh,
    You,
}

impl Author {
    pub fn label(&self) -> &'static str {
        match self {
            Author::Josh => "Josh",
            Author::You => "You",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub author: Author,
}

impl Message {
    pub fn josh(text: impl Into<String>) -> Self {
        Self { text: text.into(), author: Author::Josh }
    }

    pub fn you(text: impl Into<String>) -> Self {
        Self { text: text.into(), author: Author::You }
    }
}

pub fn bot_reply(fact: &str) -> String {
    format!("{}{}", REPLY_PREFIX, fact)
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<Message>,
    pub input: String,
    pub cursor: usize, // cursor position in chars
    loading: bool,
    input_disabled: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::josh(GREETING), Message::josh(PROMPT)],
            input: String::new(),
            cursor: 0,
            loading: false,
            input_disabled: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set once after the first successful reply; never cleared.
    pub fn is_closed(&self) -> bool {
        self.input_disabled
    }

    pub fn accepts_input(&self) -> bool {
        !self.loading && !self.input_disabled
    }

    /// Move the typed text into the transcript and mark a request in flight.
    ///
    /// Returns `false` without touching anything while a request is pending
    /// or after the chat has closed. Blank input is sent as-is.
    pub fn submit(&mut self) -> bool {
        if !self.accepts_input() {
            tracing::debug!(loading = self.loading, closed = self.input_disabled, "submit rejected");
            return false;
        }

        let text = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.messages.push(Message::you(text));
        self.loading = true;
        true
    }

    /// Apply the outcome of the fact request started by [`ChatState::submit`].
    pub fn resolve(&mut self, outcome: Result<String>) {
        match outcome {
            Ok(fact) => {
                self.messages.push(Message::josh(bot_reply(&fact)));
                self.input_disabled = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "There was a problem fetching a fact");
            }
        }
        self.loading = false;
    }

    // Input editing

    pub fn insert_char(&mut self, c: char) {
        if !self.accepts_input() {
            return;
        }
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if !self.accepts_input() || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.remove(byte_pos);
    }

    pub fn delete(&mut self) {
        if !self.accepts_input() {
            return;
        }
        if self.cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn typed(text: &str) -> ChatState {
        let mut chat = ChatState::new();
        for c in text.chars() {
            chat.insert_char(c);
        }
        chat
    }

    #[test]
    fn starts_with_two_josh_messages() {
        let chat = ChatState::new();
        assert_eq!(chat.messages().len(), 2);
        assert!(chat.messages().iter().all(|m| m.author == Author::Josh));
        assert!(chat.accepts_input());
        assert!(!chat.is_loading());
    }

    #[test]
    fn submit_appends_exact_text_before_reply() {
        for text in ["hi", "", "   ", "ジョシュ?", "multi word question"] {
            let mut chat = typed(text);
            assert!(chat.submit());

            let last = chat.messages().last().unwrap();
            assert_eq!(last, &Message::you(text));
            assert_eq!(chat.messages().len(), 3);
            assert!(chat.input.is_empty());
            assert_eq!(chat.cursor, 0);
            assert!(chat.is_loading());
        }
    }

    #[test]
    fn successful_reply_closes_chat() {
        let mut chat = typed("hi");
        chat.submit();
        chat.resolve(Ok("Cats have five toes on their front paws.".to_string()));

        let texts: Vec<(Author, &str)> =
            chat.messages().iter().map(|m| (m.author, m.text.as_str())).collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0], (Author::Josh, GREETING));
        assert_eq!(texts[1], (Author::Josh, PROMPT));
        assert_eq!(texts[2], (Author::You, "hi"));
        assert_eq!(texts[3].0, Author::Josh);
        assert!(texts[3].1.starts_with(REPLY_PREFIX));
        assert!(texts[3].1.ends_with("Cats have five toes on their front paws."));

        assert!(!chat.is_loading());
        assert!(chat.is_closed());
        assert!(!chat.accepts_input());
    }

    #[test]
    fn closed_chat_stays_closed() {
        let mut chat = typed("hi");
        chat.submit();
        chat.resolve(Ok("fact".to_string()));

        chat.insert_char('x');
        assert!(chat.input.is_empty());
        assert!(!chat.submit());
        // a stray late failure must not reopen it
        chat.resolve(Err(anyhow!("late")));
        assert!(chat.is_closed());
        assert_eq!(chat.messages().len(), 4);
    }

    #[test]
    fn failed_reply_keeps_input_open() {
        let mut chat = typed("hi");
        chat.submit();
        chat.resolve(Err(anyhow!("Fact request failed with status: 500")));

        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[2], Message::you("hi"));
        assert!(!chat.is_loading());
        assert!(!chat.is_closed());
        assert!(chat.accepts_input());

        // retrying by hand is allowed
        chat.insert_char('?');
        assert!(chat.submit());
        assert_eq!(chat.messages().len(), 4);
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut chat = typed("first");
        assert!(chat.submit());
        chat.input = "second".to_string();
        assert!(!chat.submit());

        let you: Vec<&Message> =
            chat.messages().iter().filter(|m| m.author == Author::You).collect();
        assert_eq!(you, vec![&Message::you("first")]);
        // untouched, so it is still there once the request settles
        assert_eq!(chat.input, "second");
    }

    #[test]
    fn editing_is_utf8_safe() {
        let mut chat = typed("héllo");
        chat.cursor_home();
        chat.cursor_right();
        chat.cursor_right();
        chat.backspace();
        assert_eq!(chat.input, "hllo");
        chat.insert_char('é');
        assert_eq!(chat.input, "héllo");
        chat.cursor_end();
        chat.delete();
        assert_eq!(chat.input, "héllo");
        chat.cursor_left();
        chat.delete();
        assert_eq!(chat.input, "héll");
    }

    #[test]
    fn editing_ignored_while_loading() {
        let mut chat = typed("hi");
        chat.submit();
        chat.insert_char('x');
        chat.backspace();
        assert!(chat.input.is_empty());
    }
}
