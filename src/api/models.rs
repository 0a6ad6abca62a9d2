use serde::{Deserialize, Serialize};

/// A saved vocabulary entry as returned by the server. The id is
/// server-assigned and immutable; entries are never mutated client-side,
/// a reload replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: i64,
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub arabic_sentence: Option<String>,
}

/// Payload for persisting a translated word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    pub translation: String,
    pub phonetic: String,
    pub sentence: String,
    pub arabic_sentence: String,
}

/// Structured result of the translate endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub arabic_sentence: String,
}

impl From<Translation> for NewWord {
    fn from(t: Translation) -> Self {
        Self {
            word: t.word,
            translation: t.translation,
            phonetic: t.phonetic,
            sentence: t.sentence,
            arabic_sentence: t.arabic_sentence,
        }
    }
}

/// One page of the saved-word list plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct WordPage {
    pub words: Vec<WordEntry>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    pub total_words: u64,
    pub unique_words: u64,
    pub total_sessions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}
