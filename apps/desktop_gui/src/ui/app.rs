use std::sync::Arc;

use client_core::{
    presenter::{self, Notice, NoticeKind, ResultCard, SearchView, View},
    HttpBackend, RebuildController, SearchController,
};
use eframe::egui;
use tokio::{runtime::Handle, sync::watch};

use crate::backend_bridge::BackendRuntime;
use crate::ui::theme::{self, Accent};

pub struct NewsSearchApp {
    search: SearchController,
    rebuild: RebuildController,
    query_draft: String,
    /// Generation of the last rebuild notice the user closed.
    dismissed_notice: Option<u64>,
    _runtime: BackendRuntime,
}

impl NewsSearchApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: BackendRuntime,
        backend: Arc<HttpBackend>,
        initial_query: String,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut search = SearchController::new(backend.clone(), runtime.handle());
        search.set_query(initial_query.clone());
        let rebuild = RebuildController::new(backend, runtime.handle());

        spawn_repaint_listener(
            &runtime.handle(),
            cc.egui_ctx.clone(),
            search.subscribe(),
            rebuild.subscribe(),
        );

        Self {
            search,
            rebuild,
            query_draft: initial_query,
            dismissed_notice: None,
            _runtime: runtime,
        }
    }

    fn show_search_bar(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        ui.horizontal(|ui| {
            let input_width = (ui.available_width() - 110.0).max(160.0);
            let response = ui.add_sized(
                [input_width, 34.0],
                egui::TextEdit::singleline(&mut self.query_draft)
                    .id_salt("search_query_input")
                    .hint_text("Enter your search..."),
            );
            if response.changed() {
                self.search.set_query(self.query_draft.clone());
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if accent_button(ui, "Search", theme::SEARCH_ACCENT, true).clicked() {
                submit = true;
            }
        });

        if submit {
            let _ = self.search.submit();
        }
    }

    fn show_rebuild_controls(&mut self, ui: &mut egui::Ui, view: &View) {
        let clicked = accent_button(
            ui,
            "Rebuild Pipeline",
            theme::REBUILD_ACCENT,
            view.rebuild.trigger_enabled,
        )
        .on_disabled_hover_text("A rebuild is already running")
        .clicked();
        if clicked {
            let _ = self.rebuild.trigger();
        }

        if let Some(notice) = &view.rebuild.notice {
            let visible = notice.kind == NoticeKind::InProgress
                || self.dismissed_notice != Some(notice.generation);
            if visible && show_notice(ui, notice) {
                self.dismissed_notice = Some(notice.generation);
            }
        }
    }
}

impl eframe::App for NewsSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = presenter::present(&self.search, &self.rebuild);

        egui::CentralPanel::default().show(ctx, |ui| {
            let side = ((ui.available_width() - theme::CONTENT_WIDTH) / 2.0).max(0.0);
            ui.horizontal_top(|ui| {
                ui.add_space(side);
                ui.vertical(|ui| {
                    ui.set_width(theme::CONTENT_WIDTH.min(ui.available_width()));
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.heading(egui::RichText::new("📰 News Search").size(30.0).strong());
                    });
                    ui.add_space(20.0);

                    self.show_search_bar(ui);
                    ui.add_space(12.0);
                    self.show_rebuild_controls(ui, &view);
                    ui.add_space(12.0);

                    show_search_view(ui, &view.search);
                });
            });
        });
    }
}

fn show_search_view(ui: &mut egui::Ui, view: &SearchView) {
    match view {
        SearchView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(presenter::LOADING_TEXT);
            });
        }
        SearchView::Empty(reason) => {
            ui.label(reason.text());
        }
        SearchView::Failed { message } => {
            ui.colored_label(theme::ERROR_TEXT, message);
        }
        SearchView::List(cards) => {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for card in cards {
                        show_result_card(ui, card);
                    }
                });
        }
    }
}

fn show_result_card(ui: &mut egui::Ui, card: &ResultCard) {
    egui::Frame::group(ui.style())
        .fill(theme::CARD_FILL)
        .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
        .inner_margin(15.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(&card.heading)
                    .size(22.0)
                    .strong()
                    .color(theme::TITLE_TEXT),
            );
            if !card.description.is_empty() {
                ui.label(egui::RichText::new(&card.description).color(theme::DESCRIPTION_TEXT));
            }
            ui.label(
                egui::RichText::new(&card.footer)
                    .small()
                    .color(theme::FOOTER_TEXT),
            );
        });
    ui.add_space(15.0);
}

/// Returns true when the user dismissed the notice.
fn show_notice(ui: &mut egui::Ui, notice: &Notice) -> bool {
    let mut dismissed = false;
    ui.horizontal(|ui| match notice.kind {
        NoticeKind::InProgress => {
            ui.spinner();
            ui.label(&notice.text);
        }
        NoticeKind::Status | NoticeKind::Error => {
            let color = if notice.kind == NoticeKind::Error {
                theme::ERROR_TEXT
            } else {
                theme::STATUS_TEXT
            };
            ui.colored_label(color, &notice.text);
            dismissed = ui.small_button("Dismiss").clicked();
        }
    });
    dismissed
}

// Fill follows hover state through the widget visuals rather than per-event mutation.
fn accent_button(ui: &mut egui::Ui, label: &str, accent: Accent, enabled: bool) -> egui::Response {
    ui.scope(|ui| {
        let widgets = &mut ui.style_mut().visuals.widgets;
        widgets.inactive.weak_bg_fill = accent.fill;
        widgets.hovered.weak_bg_fill = accent.hover;
        widgets.active.weak_bg_fill = accent.hover;
        ui.add_enabled(
            enabled,
            egui::Button::new(
                egui::RichText::new(label)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .min_size(egui::vec2(100.0, 34.0)),
        )
    })
    .inner
}

/// Repaints the window whenever either lifecycle changes phase.
fn spawn_repaint_listener<A, B>(
    runtime: &Handle,
    ctx: egui::Context,
    mut search_rx: watch::Receiver<A>,
    mut rebuild_rx: watch::Receiver<B>,
) where
    A: Send + Sync + 'static,
    B: Send + Sync + 'static,
{
    runtime.spawn(async move {
        loop {
            let changed = tokio::select! {
                changed = search_rx.changed() => changed,
                changed = rebuild_rx.changed() => changed,
            };
            if changed.is_err() {
                break;
            }
            ctx.request_repaint();
        }
    });
}
