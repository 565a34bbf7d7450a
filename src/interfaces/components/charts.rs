use crate::domain::valuation::{FactorImpact, GaugeScale};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

/// Horizontal gauge: three colored bands with a needle at `price`
pub fn render_price_gauge(ui: &mut egui::Ui, scale: &GaugeScale, price: f64) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 28.0), egui::Sense::hover());
    let painter = ui.painter();

    for (i, (start, end)) in scale.bands.iter().enumerate() {
        let x0 = rect.left() + rect.width() * (start / scale.max) as f32;
        let x1 = rect.left() + rect.width() * (end / scale.max) as f32;
        let band = egui::Rect::from_min_max(
            egui::pos2(x0, rect.top() + 6.0),
            egui::pos2(x1, rect.bottom() - 6.0),
        );
        painter.rect_filled(band, 2.0, DesignSystem::band_color(i));
    }

    let x = rect.left() + rect.width() * scale.position(price) as f32;
    painter.line_segment(
        [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
        egui::Stroke::new(3.0, DesignSystem::ACCENT_DARK),
    );

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("USD 0").small().color(DesignSystem::TEXT_MUTED));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("USD {:.0}", scale.max))
                    .small()
                    .color(DesignSystem::TEXT_MUTED),
            );
        });
    });
}

/// Bar chart of the signed factor impacts
pub fn render_impact_chart(ui: &mut egui::Ui, impacts: &[FactorImpact]) {
    let bars: Vec<Bar> = impacts
        .iter()
        .enumerate()
        .map(|(i, factor)| {
            let color = if factor.increases_value() {
                DesignSystem::SUCCESS
            } else {
                DesignSystem::DANGER
            };
            Bar::new(i as f64, factor.impact)
                .name(factor.label)
                .fill(color)
                .width(0.6)
        })
        .collect();

    Plot::new("factor_impact_plot")
        .height(160.0)
        .show_axes([false, true])
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Impact (%)", bars));
        });
}
