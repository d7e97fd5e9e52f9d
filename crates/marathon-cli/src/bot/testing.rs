//! In-memory API doubles for bot tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, bail};
use marathon_api::gemini::{GeminiApi, GenerateContentRequest, GenerateContentResponse};
use marathon_api::telegram::{
    Chat, Message, ParseMode, SendMessageParams, TelegramApi, Update, User,
};
use marathon_api::tmdb::{
    SearchMultiParams, TmdbApi, TmdbMediaType, TmdbSearchMultiResponse, TmdbTitleDetails,
};
use tokio::sync::Notify;

/// Something the bot sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    /// `sendMessage`.
    Text {
        chat_id: i64,
        text: String,
        parse_mode: Option<ParseMode>,
    },
    /// `sendDocument`, with the file read at upload time.
    Document {
        chat_id: i64,
        file_name: String,
        content: String,
        caption: Option<String>,
    },
}

impl Sent {
    /// Message text, or the caption of a document.
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            Self::Document { caption, .. } => caption.as_deref().unwrap_or_default(),
        }
    }
}

/// Telegram double: replays queued update batches and records replies.
///
/// Once the queue is empty, `get_updates` signals `drained` and never
/// returns.
#[derive(Debug, Default)]
pub struct MockTelegram {
    updates: Mutex<VecDeque<Vec<Update>>>,
    sent: Mutex<Vec<Sent>>,
    pub drained: Notify,
}

impl MockTelegram {
    pub fn with_updates(batches: Vec<Vec<Update>>) -> Self {
        Self {
            updates: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn reply(chat_id: i64, message_id: usize) -> Message {
        Message {
            message_id: i64::try_from(message_id).unwrap(),
            from: None,
            chat: Chat {
                id: chat_id,
                kind: String::from("private"),
            },
            date: 0,
            text: None,
        }
    }
}

impl TelegramApi for MockTelegram {
    async fn get_me(&self) -> Result<User> {
        Ok(User {
            id: 7_000_001,
            is_bot: true,
            first_name: String::from("MarathonBot"),
            username: Some(String::from("marathon_plan_bot")),
        })
    }

    async fn get_updates(&self, _offset: Option<i64>, _timeout_secs: u32) -> Result<Vec<Update>> {
        let next = self.updates.lock().unwrap().pop_front();
        if let Some(batch) = next {
            return Ok(batch);
        }
        self.drained.notify_one();
        std::future::pending().await
    }

    async fn send_message(&self, params: &SendMessageParams) -> Result<Message> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Text {
            chat_id: params.chat_id,
            text: params.text.clone(),
            parse_mode: params.parse_mode,
        });
        Ok(Self::reply(params.chat_id, sent.len()))
    }

    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<Message> {
        let content = std::fs::read_to_string(path)?;
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Document {
            chat_id,
            file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
            content,
            caption: caption.map(String::from),
        });
        Ok(Self::reply(chat_id, sent.len()))
    }
}

/// TMDB double serving fixture bodies.
#[derive(Debug)]
pub struct MockTmdb {
    search: Option<&'static str>,
    details: &'static str,
    queries: Mutex<Vec<String>>,
}

impl MockTmdb {
    fn new(search: Option<&'static str>, details: &'static str) -> Self {
        Self {
            search,
            details,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Resolves any query to Breaking Bad (62 episodes of 46 min).
    pub fn breaking_bad() -> Self {
        Self::new(
            Some(include_str!(
                "../../../../fixtures/tmdb/search_multi_breaking_bad.json"
            )),
            include_str!("../../../../fixtures/tmdb/tv_details_1396.json"),
        )
    }

    /// Resolves any query to a series without episode data.
    pub fn sparse_series() -> Self {
        Self::new(
            Some(
                r#"{"page":1,"results":[{"id":250307,"media_type":"tv","name":"Serie sin datos"}]}"#,
            ),
            include_str!("../../../../fixtures/tmdb/tv_details_sparse.json"),
        )
    }

    /// Finds nothing.
    pub fn empty() -> Self {
        Self::new(
            Some(include_str!(
                "../../../../fixtures/tmdb/search_multi_empty.json"
            )),
            "{}",
        )
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self::new(None, "{}")
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl TmdbApi for MockTmdb {
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbSearchMultiResponse> {
        self.queries.lock().unwrap().push(params.query.clone());
        let Some(body) = self.search else {
            bail!("request failed: search/multi: connection refused");
        };
        Ok(serde_json::from_str(body)?)
    }

    async fn title_details(
        &self,
        _media_type: TmdbMediaType,
        _id: u64,
        _language: &str,
    ) -> Result<TmdbTitleDetails> {
        Ok(serde_json::from_str(self.details)?)
    }
}

/// Gemini double replaying one fixture.
#[derive(Debug)]
pub struct MockGemini {
    body: &'static str,
}

impl MockGemini {
    pub const fn ok() -> Self {
        Self {
            body: include_str!("../../../../fixtures/gemini/generate_content_ok.json"),
        }
    }
}

impl GeminiApi for MockGemini {
    async fn generate_content(
        &self,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        Ok(serde_json::from_str(self.body)?)
    }
}

/// Text message from a private chat.
pub fn text_message(chat_id: i64, text: &str) -> Message {
    Message {
        message_id: 1,
        from: None,
        chat: Chat {
            id: chat_id,
            kind: String::from("private"),
        },
        date: 0,
        text: Some(String::from(text)),
    }
}
