use gifmaker::GifForm;

use crate::dialogs::NativeDialogs;

const FIELD_WIDTH: f32 = 360.0;

pub struct GifGeneratorApp {
    form: GifForm,
    dialogs: NativeDialogs,
    status_message: String,
}

impl Default for GifGeneratorApp {
    fn default() -> Self {
        Self {
            form: GifForm::default(),
            dialogs: NativeDialogs::default(),
            status_message: "Ready".to_string(),
        }
    }
}

impl eframe::App for GifGeneratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status_message);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("GIF Generator");
            ui.separator();

            egui::Grid::new("gif_form")
                .num_columns(3)
                .spacing([10.0, 5.0])
                .show(ui, |ui| {
                    self.show_images_row(ui);
                    self.show_output_dir_row(ui);

                    ui.label("Enter Output Filename (without extension):");
                    ui.add(
                        egui::TextEdit::singleline(self.form.filename_mut())
                            .desired_width(FIELD_WIDTH),
                    );
                    ui.end_row();

                    ui.label("");
                    if ui.button("Generate GIF").clicked() {
                        self.generate();
                    }
                    ui.end_row();
                });
        });
    }
}

impl GifGeneratorApp {
    fn show_images_row(&mut self, ui: &mut egui::Ui) {
        ui.label("Select Images:");
        let label = self.form.images_label();
        // Read-only: the list only grows through the picker
        ui.add(egui::TextEdit::singleline(&mut label.as_str()).desired_width(FIELD_WIDTH));
        if ui.button("Browse").clicked() {
            let before = self.form.images().len();
            self.form.browse_images(&mut self.dialogs);
            let added = self.form.images().len() - before;
            if added > 0 {
                self.status_message = format!(
                    "Added {} image(s), {} frame(s) selected",
                    added,
                    self.form.images().len()
                );
            }
        }
        ui.end_row();
    }

    fn show_output_dir_row(&mut self, ui: &mut egui::Ui) {
        ui.label("Select Output Directory:");
        let dir = self
            .form
            .output_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        ui.add(egui::TextEdit::singleline(&mut dir.as_str()).desired_width(FIELD_WIDTH));
        if ui.button("Browse").clicked() {
            self.form.browse_output_dir(&mut self.dialogs);
        }
        ui.end_row();
    }

    fn generate(&mut self) {
        let notification = self.form.generate(&mut self.dialogs);
        self.status_message = notification.message();
    }
}
