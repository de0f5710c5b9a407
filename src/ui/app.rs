use std::time::Duration;

use chrono::{DateTime, Utc};
use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};

use super::components::{bid_form, bid_summary, bid_table, login_form};
use super::format::format_local;
use super::state::{AppState, View};

/// Static auction details shown on the public page.
#[derive(Debug, Clone)]
pub struct AuctionInfo {
    pub title: String,
    pub description: String,
    pub ends_at: DateTime<Utc>,
}

pub struct AuctionApp {
    info: AuctionInfo,
    state: AppState,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl AuctionApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        info: AuctionInfo,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
    ) -> Self {
        let mut app = Self {
            state: AppState::new(info.ends_at),
            info,
            command_sender,
            event_receiver,
        };

        let initial = app.state.begin_snapshot_load();
        app.send_command(initial);
        app
    }

    fn handle_api_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Some(command) = self.state.handle_event(event) {
                self.send_command(command);
            }
        }
    }

    fn send_command(&mut self, command: ApiCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to API worker: {err}");
            // Unblock the form if the request never left
            self.state.submitting = false;
        }
    }

    fn render_nav(&mut self, ui: &mut egui::Ui, now: DateTime<Utc>) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.state.view == View::Auction, "Auction")
                .clicked()
            {
                self.state.view = View::Auction;
                let command = self.state.begin_snapshot_load();
                self.send_command(command);
            }
            if ui
                .selectable_label(self.state.view == View::Admin, "Admin")
                .clicked()
            {
                if let Some(command) = self.state.open_admin(now) {
                    self.send_command(command);
                }
            }
        });
    }

    fn render_auction(&mut self, ui: &mut egui::Ui, now: DateTime<Utc>) {
        ui.heading(&self.info.title);
        ui.label(&self.info.description);
        ui.colored_label(
            egui::Color32::RED,
            format!("Closes at: {}", format_local(&self.info.ends_at)),
        );
        ui.separator();

        if self.state.auction_is_open(now) {
            let submit = bid_form::render(
                ui,
                &mut self.state.form,
                &self.state.form_errors,
                self.state.submitting,
            );
            if submit {
                if let Some(new_bid) = self.state.prepare_submission(now) {
                    self.send_command(ApiCommand::SubmitBid(new_bid));
                }
            }
            if let Some(notice) = &self.state.notice {
                ui.colored_label(egui::Color32::GREEN, notice);
            }
        } else {
            ui.label(
                egui::RichText::new("Auction closed!")
                    .strong()
                    .color(egui::Color32::RED),
            );
        }

        ui.separator();
        bid_summary::render(ui, &self.state.snapshot, self.state.snapshot_state);
    }

    fn render_admin(&mut self, ui: &mut egui::Ui, now: DateTime<Utc>) {
        if !self.state.has_active_session(now) {
            if login_form::render(ui, &mut self.state.login) {
                if let Some(command) = self.state.prepare_login() {
                    self.send_command(command);
                }
            }
            return;
        }

        ui.horizontal(|ui| {
            ui.heading("Bid listing");
            if ui.button("Refresh").clicked() {
                if let Some(command) = self.state.fetch_admin_bids() {
                    self.send_command(command);
                }
            }
            if ui.button("Log out").clicked() {
                if let Some(command) = self.state.logout() {
                    self.send_command(command);
                }
            }
        });
        ui.separator();

        if self.state.admin_loading {
            ui.spinner();
        } else {
            bid_table::render(ui, &self.state.admin_bids);
        }
    }
}

impl eframe::App for AuctionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();
        let now = Utc::now();

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            self.render_nav(ui, now);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Auction => self.render_auction(ui, now),
            View::Admin => self.render_admin(ui, now),
        });

        // Poll for worker events and the auction deadline
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
