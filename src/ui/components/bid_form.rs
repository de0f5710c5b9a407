use eframe::egui;

use crate::common::validation::MAX_NAME_LEN;
use crate::ui::state::{BidForm, FormErrors};

/// Returns true when the user asked to submit.
pub fn render(ui: &mut egui::Ui, form: &mut BidForm, errors: &FormErrors, submitting: bool) -> bool {
    let mut submit = false;

    field(ui, errors.name.as_deref(), |ui| {
        ui.add(
            egui::TextEdit::singleline(&mut form.name)
                .hint_text("Your name")
                .char_limit(MAX_NAME_LEN),
        )
    });
    field(ui, errors.contact.as_deref(), |ui| {
        ui.add(egui::TextEdit::singleline(&mut form.contact).hint_text("Your contact (WhatsApp)"))
    });
    let amount = field(ui, errors.amount.as_deref(), |ui| {
        ui.add(egui::TextEdit::singleline(&mut form.amount).hint_text("Your bid (R$)"))
    });

    if amount.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        submit = true;
    }

    let label = if submitting { "Sending..." } else { "Place bid" };
    if ui.add_enabled(!submitting, egui::Button::new(label)).clicked() {
        submit = true;
    }

    if let Some(general) = &errors.general {
        ui.colored_label(egui::Color32::RED, general);
    }

    submit && !submitting
}

fn field(
    ui: &mut egui::Ui,
    error: Option<&str>,
    add: impl FnOnce(&mut egui::Ui) -> egui::Response,
) -> egui::Response {
    let response = add(ui);
    if let Some(error) = error {
        ui.colored_label(egui::Color32::RED, error);
    }
    response
}
