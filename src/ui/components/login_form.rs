use eframe::egui;

use crate::ui::state::LoginForm;

pub fn render(ui: &mut egui::Ui, form: &mut LoginForm) -> bool {
    let mut login = false;

    ui.heading("Bid listing");
    ui.separator();

    ui.label("Username");
    ui.text_edit_singleline(&mut form.username);

    ui.label("Password");
    let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
    if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        login = true;
    }

    if let Some(error) = &form.error {
        ui.colored_label(egui::Color32::RED, error);
    }

    if ui.button("Log in").clicked() {
        login = true;
    }

    login
}
