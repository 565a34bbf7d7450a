use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Titled section of the form
pub struct Card {
    title: Option<String>,
    highlighted: bool,
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl Card {
    pub fn new() -> Self {
        Self {
            title: None,
            highlighted: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Accent border, used for the result card
    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        let mut frame = DesignSystem::card_frame();

        if self.highlighted {
            frame = frame
                .stroke(egui::Stroke::new(1.5, DesignSystem::ACCENT_PRIMARY))
                .shadow(egui::epaint::Shadow {
                    offset: [0, 4],
                    blur: 15,
                    spread: 0,
                    color: DesignSystem::ACCENT_PRIMARY.linear_multiply(0.15),
                });
        }

        frame.show(ui, |ui| {
            ui.set_width(ui.available_width());

            if let Some(title) = self.title {
                ui.label(
                    egui::RichText::new(title)
                        .size(14.0)
                        .color(DesignSystem::ACCENT_PRIMARY)
                        .strong(),
                );
                ui.add_space(DesignSystem::SPACING_SMALL);
            }

            add_contents(ui)
        })
    }
}
