//! Pure mapping from controller state to a renderable view model.
//!
//! Nothing here mutates controller state; the same phases always yield the
//! same [`View`].

use std::fmt::Write as _;

use shared::domain::ResultEntity;

use crate::{lifecycle::LifecyclePhase, rebuild::RebuildController, search::SearchController};

pub const LOADING_TEXT: &str = "Searching...";
pub const NOT_SEARCHED_TEXT: &str = "No results yet.";
pub const NO_MATCHES_TEXT: &str = "No results found.";
pub const REBUILDING_TEXT: &str = "Rebuilding pipeline...";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub search: SearchView,
    pub rebuild: RebuildView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    Loading,
    Empty(EmptyReason),
    Failed { message: String },
    List(Vec<ResultCard>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NotSearched,
    NoMatches,
}

impl EmptyReason {
    pub fn text(self) -> &'static str {
        match self {
            Self::NotSearched => NOT_SEARCHED_TEXT,
            Self::NoMatches => NO_MATCHES_TEXT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub rank: u32,
    pub heading: String,
    pub description: String,
    pub footer: String,
}

impl ResultCard {
    pub fn from_entity(entity: &ResultEntity) -> Self {
        Self {
            rank: entity.rank,
            heading: format!("{}. {}", entity.rank, entity.title),
            description: entity.description.clone(),
            footer: format!("Cluster {} • Score: {:.2}", entity.cluster, entity.score),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RebuildView {
    /// The trigger control should be disabled while a rebuild is in flight.
    pub trigger_enabled: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    InProgress,
    Status,
    Error,
}

/// Rebuild message surfaced once per rebuild call, keyed by its generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub generation: u64,
    pub kind: NoticeKind,
    pub text: String,
}

pub fn present(search: &SearchController, rebuild: &RebuildController) -> View {
    let rebuild_phase = rebuild.phase();
    search.with_phase(|search_phase| {
        present_phases(search_phase, &rebuild_phase, rebuild.generation())
    })
}

pub fn present_phases(
    search: &LifecyclePhase<Vec<ResultEntity>>,
    rebuild: &LifecyclePhase<String>,
    rebuild_generation: u64,
) -> View {
    View {
        search: present_search(search),
        rebuild: present_rebuild(rebuild, rebuild_generation),
    }
}

fn present_search(phase: &LifecyclePhase<Vec<ResultEntity>>) -> SearchView {
    match phase {
        LifecyclePhase::Idle => SearchView::Empty(EmptyReason::NotSearched),
        LifecyclePhase::Pending => SearchView::Loading,
        LifecyclePhase::Failed(err) => SearchView::Failed {
            message: format!("Search failed: {err}"),
        },
        LifecyclePhase::Succeeded(results) if results.is_empty() => {
            SearchView::Empty(EmptyReason::NoMatches)
        }
        LifecyclePhase::Succeeded(results) => {
            SearchView::List(results.iter().map(ResultCard::from_entity).collect())
        }
    }
}

fn present_rebuild(phase: &LifecyclePhase<String>, generation: u64) -> RebuildView {
    let notice = match phase {
        LifecyclePhase::Idle => None,
        LifecyclePhase::Pending => Some((NoticeKind::InProgress, REBUILDING_TEXT.to_string())),
        LifecyclePhase::Succeeded(status) => Some((NoticeKind::Status, status.clone())),
        LifecyclePhase::Failed(err) => Some((NoticeKind::Error, format!("Rebuild failed: {err}"))),
    };

    RebuildView {
        trigger_enabled: !phase.is_pending(),
        notice: notice.map(|(kind, text)| Notice {
            generation,
            kind,
            text,
        }),
    }
}

impl View {
    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match &self.search {
            SearchView::Loading => out.push_str(LOADING_TEXT),
            SearchView::Empty(reason) => out.push_str(reason.text()),
            SearchView::Failed { message } => out.push_str(message),
            SearchView::List(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        out.push_str("\n\n");
                    }
                    let _ = writeln!(out, "{}", card.heading);
                    if !card.description.is_empty() {
                        let _ = writeln!(out, "   {}", card.description);
                    }
                    let _ = write!(out, "   {}", card.footer);
                }
            }
        }

        if let Some(notice) = &self.rebuild.notice {
            let _ = write!(out, "\n\n{}", notice.text);
        }
        out
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
