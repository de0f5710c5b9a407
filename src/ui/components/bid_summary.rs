use eframe::egui;

use crate::common::{Bid, BidSnapshot};
use crate::ui::format::{format_brl, format_local};
use crate::ui::state::LoadState;

pub fn render(ui: &mut egui::Ui, snapshot: &BidSnapshot, load_state: LoadState) {
    ui.heading("Bids");

    if load_state != LoadState::Ready {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading bids...");
        });
        return;
    }

    match (&snapshot.highest_bid, &snapshot.latest_bid) {
        (None, None) => {
            ui.label(egui::RichText::new("No bids yet.").weak());
        }
        (highest, latest) => {
            if let Some(bid) = highest {
                bid_line(ui, "Highest bid", bid);
            }
            if let Some(bid) = latest {
                bid_line(ui, "Latest bid", bid);
            }
        }
    }
}

fn bid_line(ui: &mut egui::Ui, label: &str, bid: &Bid) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(format!(
            "{} - {} - {}",
            bid.name,
            format_brl(bid.amount),
            format_local(&bid.timestamp)
        ));
    });
}
