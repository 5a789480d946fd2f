use crate::error::BroadcastError;
use crate::models::types::RecipientId;
use crate::services::extractor::extract_ids;

/// Список получателей в текстовом виде, по одному на строку
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientList {
    text: String,
}

impl RecipientList {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self { text: lines.join("\n") }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splits on newlines, trims each line and drops blank ones.
    pub fn ids(&self) -> Vec<RecipientId> {
        parse_recipients(&self.text)
    }

    /// Replaces the list with the ids from an export file.
    ///
    /// On a parse error the current list is left as it was.
    pub fn import_export(&mut self, content: &str) -> Result<usize, BroadcastError> {
        let ids = extract_ids(content)?;
        let count = ids.len();
        *self = Self::from_ids(ids.iter().map(RecipientId::as_str));
        Ok(count)
    }
}

pub fn parse_recipients(text: &str) -> Vec<RecipientId> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RecipientId::from)
        .collect()
}
