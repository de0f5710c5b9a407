use eframe::egui;

use crate::common::Bid;
use crate::ui::format::{format_brl, format_local, whatsapp_link};

pub fn render(ui: &mut egui::Ui, bids: &[Bid]) {
    if bids.is_empty() {
        ui.label("No bids found.");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("admin_bid_table")
            .striped(true)
            .num_columns(4)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for header in ["NAME", "CONTACT", "AMOUNT", "DATE"] {
                    ui.label(egui::RichText::new(header).small().strong());
                }
                ui.end_row();

                for bid in bids {
                    ui.label(&bid.name);
                    ui.hyperlink_to(&bid.contact, whatsapp_link(&bid.contact));
                    ui.label(egui::RichText::new(format_brl(bid.amount)).strong());
                    ui.label(format_local(&bid.timestamp));
                    ui.end_row();
                }
            });
    });
}
