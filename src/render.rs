//! Pure text rendering for the word list screen.
//!
//! Every function maps data to a `String`; writing it anywhere is the
//! caller's job.

use crate::api::models::{Stats, WordEntry, WordFrequency};
use crate::state::ListState;

pub fn screen(words: &[WordEntry], state: &ListState) -> String {
    let mut out = String::new();
    if !state.search_term.is_empty() {
        out.push_str(&format!("Search: \"{}\"\n\n", state.search_term));
    }
    out.push_str(&word_list(words));
    out.push('\n');
    out.push_str(&pagination(state));
    out
}

pub fn word_list(words: &[WordEntry]) -> String {
    if words.is_empty() {
        return "No words yet\nAdd your first Arabic word to get started!\n".to_string();
    }

    let mut out = String::new();
    for entry in words {
        out.push_str(&card(entry));
        out.push('\n');
    }
    out
}

fn card(entry: &WordEntry) -> String {
    let mut out = format!("#{}  {}\n", entry.id, entry.word);
    if let Some(phonetic) = entry.phonetic.as_deref().filter(|p| !p.is_empty()) {
        out.push_str(&format!("    Phonetic: {phonetic}\n"));
    }
    out.push_str(&format!("    English:  {}\n", entry.translation));

    let arabic = entry.arabic_sentence.as_deref().filter(|s| !s.is_empty());
    let english = entry.sentence.as_deref().filter(|s| !s.is_empty());
    if arabic.is_some() || english.is_some() {
        out.push_str("    Example:\n");
        if let Some(sentence) = arabic {
            out.push_str(&format!("      {sentence}\n"));
        }
        if let Some(sentence) = english {
            out.push_str(&format!("      {sentence}\n"));
        }
    }
    out
}

pub fn pagination(state: &ListState) -> String {
    let prev = if state.has_prev() { "[< prev]" } else { "[      ]" };
    let next = if state.has_next() { "[next >]" } else { "[      ]" };
    format!("{prev} Page {} of {} {next}", state.page, state.total_pages)
}

pub fn error_placeholder() -> String {
    "Error loading words\nMake sure the server is running\n".to_string()
}

pub fn login_prompt(login_url: &str) -> String {
    format!("Not signed in.\nOpen {login_url} in a browser to log in, then run `refresh`.\n")
}

pub fn notice(message: &str) -> String {
    format!("{message}\n")
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Words: {}  Unique: {}  Sessions: {}\n",
        stats.total_words, stats.unique_words, stats.total_sessions
    )
}

pub fn frequency(rows: &[WordFrequency]) -> String {
    if rows.is_empty() {
        return "No words yet\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("{:>5}  {}\n", row.count, row.word));
    }
    out
}
