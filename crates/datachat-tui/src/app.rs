use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::task::JoinHandle;

use datachat_core::{
    BackendError, Conversation, Envelope, Message, QueryBackend, RenderTree, Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub type QueryTask = JoinHandle<Result<Envelope, BackendError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Conversation and its rendered form (one tree per message, same order)
    pub conversation: Conversation,
    pub renderer: Renderer,
    pub trees: Vec<RenderTree>,
    seen_revision: u64,

    // In-flight request
    pub backend: Arc<dyn QueryBackend>,
    pub backend_label: String,
    pub query_task: Option<QueryTask>,

    // Input state
    pub input_cursor: usize, // cursor position in the input buffer, in chars

    // Chat log scrolling
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations
    pub follow_tail: bool,

    /// Message index shown in the result pane; `None` follows the latest bot reply.
    pub selected_reply: Option<usize>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub result_area: Option<Rect>,
}

impl App {
    pub fn new(backend: Arc<dyn QueryBackend>, backend_label: String, renderer: Renderer) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Editing,

            conversation: Conversation::new(),
            renderer,
            trees: Vec::new(),
            seen_revision: 0,

            backend,
            backend_label,
            query_task: None,

            input_cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            follow_tail: true,

            selected_reply: None,

            animation_frame: 0,

            chat_area: None,
            result_area: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.conversation.is_awaiting()
    }

    /// Submit the input buffer and run the query on a background task.
    pub fn submit_input(&mut self) {
        let Some(request) = self.conversation.begin_from_input() else {
            return;
        };
        self.input_cursor = 0;

        let backend = Arc::clone(&self.backend);
        self.query_task = Some(tokio::spawn(async move { backend.query(&request).await }));
        self.sync();
    }

    /// Collect the background query once it has finished.
    pub async fn poll_query(&mut self) {
        if !self.query_task.as_ref().is_some_and(|task| task.is_finished()) {
            return;
        }
        if let Some(task) = self.query_task.take() {
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(BackendError::Aborted(err.to_string())),
            };
            self.conversation.complete(result);
            self.sync();
        }
    }

    /// Render messages appended since the last call and follow the tail.
    pub fn sync(&mut self) {
        let revision = self.conversation.revision();
        if revision == self.seen_revision {
            return;
        }
        let messages = self.conversation.messages();
        for message in &messages[self.trees.len()..] {
            self.trees.push(self.renderer.render(message));
        }
        self.seen_revision = revision;
        self.follow_tail = true;
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Chat scrolling
    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
        self.follow_tail = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        // Clamped against the content height when drawing
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.chat_scroll = 0;
        self.follow_tail = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }

    /// Indices of bot messages, oldest first.
    fn reply_indices(&self) -> Vec<usize> {
        self.conversation
            .messages()
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_bot())
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the bot message the result pane shows.
    pub fn result_index(&self) -> Option<usize> {
        self.selected_reply.or_else(|| self.reply_indices().last().copied())
    }

    pub fn result_message(&self) -> Option<(&Message, &RenderTree)> {
        let i = self.result_index()?;
        Some((self.conversation.messages().get(i)?, self.trees.get(i)?))
    }

    pub fn select_prev_reply(&mut self) {
        let replies = self.reply_indices();
        let Some(current) = self.result_index() else {
            return;
        };
        if let Some(&prev) = replies.iter().rev().find(|&&i| i < current) {
            self.selected_reply = Some(prev);
        }
    }

    pub fn select_next_reply(&mut self) {
        let replies = self.reply_indices();
        let Some(current) = self.result_index() else {
            return;
        };
        match replies.iter().find(|&&i| i > current) {
            // Back on the newest reply: follow new ones again
            Some(&next) if Some(&next) == replies.last() => self.selected_reply = None,
            Some(&next) => self.selected_reply = Some(next),
            None => self.selected_reply = None,
        }
    }
}
