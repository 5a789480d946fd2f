use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Методы Bot API, доступные для рассылки
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    EnumString, IntoStaticStr, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum SendMethod {
    /// Текстовое сообщение
    #[default]
    SendMessage,
    SendPhoto,
    SendVideo,
    SendAudio,
    SendDocument,
    SendAnimation,
    SendVoice,
    SendVideoNote,
    SendSticker,
}

/// What a method carries in its form body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `text` field
    Text,
    /// an uploaded file under `field`
    File { field: &'static str },
}

/// Режим форматирования текста / подписи
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    EnumString, IntoStaticStr, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ParseMode {
    #[strum(serialize = "HTML")]
    #[serde(rename = "HTML")]
    Html,
    MarkdownV2,
    Markdown,
}

impl SendMethod {
    /// Имя метода в URL Bot API
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Lookup table: method -> payload shape and upload field name.
    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            SendMethod::SendMessage => PayloadKind::Text,
            SendMethod::SendPhoto => PayloadKind::File { field: "photo" },
            SendMethod::SendVideo => PayloadKind::File { field: "video" },
            SendMethod::SendAudio => PayloadKind::File { field: "audio" },
            SendMethod::SendDocument => PayloadKind::File { field: "document" },
            SendMethod::SendAnimation => PayloadKind::File { field: "animation" },
            SendMethod::SendVoice => PayloadKind::File { field: "voice" },
            SendMethod::SendVideoNote => PayloadKind::File { field: "video_note" },
            SendMethod::SendSticker => PayloadKind::File { field: "sticker" },
        }
    }

    pub fn upload_field(&self) -> Option<&'static str> {
        match self.payload_kind() {
            PayloadKind::Text => None,
            PayloadKind::File { field } => Some(field),
        }
    }

    pub fn is_text(&self) -> bool {
        self.payload_kind() == PayloadKind::Text
    }
}

impl std::fmt::Display for SendMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
