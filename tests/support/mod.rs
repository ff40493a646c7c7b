//! Shared test doubles: a recording outbound bot and a scriptable chart
//! delegate.

use std::sync::Mutex;

use async_trait::async_trait;
use macross_bot::{
    Bot, ChartDelegate, ChartError, ChartFigure, ChartOverrides, ChartRequest, Chat,
    KeyboardButton, Result,
};

/// One recorded outbound send.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text {
        chat_id: i64,
        text: String,
    },
    Photo {
        chat_id: i64,
        caption: String,
    },
    Document {
        chat_id: i64,
        file_name: String,
        caption: String,
    },
    Keyboard {
        chat_id: i64,
        text: String,
        buttons: Vec<(String, String)>,
    },
    Edit {
        chat_id: i64,
        message_id: i32,
        text: String,
    },
    CallbackAnswer {
        callback_id: String,
        text: String,
    },
}

/// Bot implementation that records every send instead of calling Telegram.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<Outbound>>,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, outbound: Outbound) {
        self.sent.lock().unwrap().push(outbound);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Outbound::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, _png: Vec<u8>, caption: &str) -> Result<()> {
        self.record(Outbound::Photo {
            chat_id: chat.id,
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn send_document(
        &self,
        chat: &Chat,
        _data: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<()> {
        self.record(Outbound::Document {
            chat_id: chat.id,
            file_name: file_name.to_string(),
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[KeyboardButton],
    ) -> Result<()> {
        self.record(Outbound::Keyboard {
            chat_id: chat.id,
            text: text.to_string(),
            buttons: buttons
                .iter()
                .map(|b| (b.label.clone(), b.data.clone()))
                .collect(),
        });
        Ok(())
    }

    async fn edit_text(&self, chat: &Chat, message_id: i32, text: &str) -> Result<()> {
        self.record(Outbound::Edit {
            chat_id: chat.id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<()> {
        self.record(Outbound::CallbackAnswer {
            callback_id: callback_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// What the stub delegate should do when called.
#[derive(Debug, Clone)]
pub enum ChartBehavior {
    Png,
    Pdf,
    NoFigure,
    Fail(String),
    /// Never resolves; keeps the calling worker busy.
    Hang,
}

/// Chart delegate that records calls and answers per [`ChartBehavior`].
pub struct StubChart {
    behavior: ChartBehavior,
    calls: Mutex<Vec<(ChartRequest, ChartOverrides)>>,
}

impl StubChart {
    pub fn new(behavior: ChartBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(ChartRequest, ChartOverrides)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChartDelegate for StubChart {
    async fn render(
        &self,
        request: &ChartRequest,
        overrides: &ChartOverrides,
    ) -> std::result::Result<Option<ChartFigure>, ChartError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), overrides.clone()));

        match &self.behavior {
            ChartBehavior::Png => Ok(Some(ChartFigure::Png(vec![1, 2, 3]))),
            ChartBehavior::Pdf => Ok(Some(ChartFigure::Pdf(vec![4, 5, 6]))),
            ChartBehavior::NoFigure => Ok(None),
            ChartBehavior::Fail(message) => Err(ChartError::Service(message.clone())),
            ChartBehavior::Hang => std::future::pending().await,
        }
    }
}
