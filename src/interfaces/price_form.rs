use crate::application::client::PredictionClient;
use crate::domain::errors::ClientError;
use crate::domain::valuation::{FactorImpact, GaugeScale, factor_impacts};
use crate::domain::vehicle::{
    CarColor, CarDetails, FuelType, Insurance, ServiceHistory, Transmission,
};
use crate::interfaces::components::card::Card;
use crate::interfaces::components::charts::{render_impact_chart, render_price_gauge};
use crate::interfaces::design_system::DesignSystem;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tracing::{info, warn};

/// What the result area currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionView {
    Idle,
    Pending,
    Ready(Estimate),
    Failed(String),
}

/// A price with the display-only values derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub price: f64,
    pub gauge: GaugeScale,
    pub impacts: Vec<FactorImpact>,
}

impl Estimate {
    pub fn new(price: f64, details: &CarDetails) -> Self {
        Self {
            price,
            gauge: GaugeScale::for_price(price),
            impacts: factor_impacts(details),
        }
    }

    /// Difference from the gauge's reference value
    pub fn delta(&self) -> f64 {
        self.price - self.gauge.delta_reference
    }
}

/// User-facing text for a failed request
pub fn error_message(error: &ClientError) -> String {
    match error {
        ClientError::Transport { reason } => format!(
            "Could not reach the prediction server. Make sure it is running. ({})",
            reason
        ),
        ClientError::Server { status, body } => {
            format!("Prediction failed (status {}): {}", status, body)
        }
        ClientError::Decode { reason } => {
            format!("The prediction server sent an unexpected response: {}", reason)
        }
    }
}

/// Form-driven client for the price prediction service.
///
/// Requests run on the background runtime; results come back over a
/// channel that is drained every frame.
pub struct PricePredictorApp {
    client: PredictionClient,
    runtime: tokio::runtime::Handle,
    details: CarDetails,
    view: PredictionView,
    show_debug: bool,
    result_tx: Sender<(CarDetails, Result<f64, ClientError>)>,
    result_rx: Receiver<(CarDetails, Result<f64, ClientError>)>,
}

impl PricePredictorApp {
    pub fn new(client: PredictionClient, runtime: tokio::runtime::Handle) -> Self {
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        Self {
            client,
            runtime,
            details: CarDetails::default(),
            view: PredictionView::Idle,
            show_debug: false,
            result_tx,
            result_rx,
        }
    }

    pub fn view(&self) -> &PredictionView {
        &self.view
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let details = self.details.clone();
        let record = details.to_feature_record();
        let client = self.client.clone();
        let tx = self.result_tx.clone();
        let ctx = ctx.clone();

        self.view = PredictionView::Pending;
        self.runtime.spawn(async move {
            let result = client.predict(&record).await;
            let _ = tx.send((details, result));
            ctx.request_repaint();
        });
    }

    fn poll_results(&mut self) {
        while let Ok((details, result)) = self.result_rx.try_recv() {
            self.view = match result {
                Ok(price) => {
                    info!("Estimated resale value: USD {:.2}", price);
                    PredictionView::Ready(Estimate::new(price, &details))
                }
                Err(e) => {
                    warn!("Prediction request failed: {}", e);
                    PredictionView::Failed(error_message(&e))
                }
            };
        }
    }

    fn render_specifications(&mut self, ui: &mut egui::Ui) {
        let details = &mut self.details;
        Card::new().title("Car Specifications").show(ui, |ui| {
            ui.columns(2, |cols| {
                cols[0].add(egui::Slider::new(&mut details.car_age, 0..=30).text("Car Age (Years)"));
                cols[0].horizontal(|ui| {
                    ui.label("Engine Capacity (cc)");
                    ui.add(
                        egui::DragValue::new(&mut details.engine_cc)
                            .range(600..=6000)
                            .speed(100),
                    );
                });
                cols[0].add(
                    egui::Slider::new(&mut details.owner_count, 0..=5)
                        .text("Number of Previous Owners"),
                );

                cols[1].horizontal(|ui| {
                    ui.label("Mileage (km per litre)");
                    ui.add(
                        egui::DragValue::new(&mut details.mileage_kmpl)
                            .range(1.0..=50.0)
                            .speed(0.5),
                    );
                });
                cols[1].add(egui::Slider::new(&mut details.brand, 0..=10).text("Brand Rating (0-10)"))
                    .on_hover_text("0 = Economy brand, 10 = Luxury brand");
                cols[1].add(
                    egui::Slider::new(&mut details.accidents_reported, 0..=10)
                        .text("Accidents Reported"),
                );
            });
        });
    }

    fn render_categories(&mut self, ui: &mut egui::Ui) {
        let details = &mut self.details;

        Card::new().title("Fuel Type").show(ui, |ui| {
            ui.horizontal(|ui| {
                for fuel in FuelType::ALL {
                    ui.radio_value(&mut details.fuel_type, fuel, fuel.to_string());
                }
            });
        });
        ui.add_space(DesignSystem::SPACING_SMALL);

        Card::new().title("Transmission").show(ui, |ui| {
            ui.horizontal(|ui| {
                for transmission in Transmission::ALL {
                    ui.radio_value(
                        &mut details.transmission,
                        transmission,
                        transmission.to_string(),
                    );
                }
            });
        });
        ui.add_space(DesignSystem::SPACING_SMALL);

        Card::new().title("Car Color").show(ui, |ui| {
            egui::ComboBox::from_label("Choose your car's color")
                .selected_text(details.color.to_string())
                .show_ui(ui, |ui| {
                    for color in CarColor::ALL {
                        ui.selectable_value(&mut details.color, color, color.to_string());
                    }
                });
        });
        ui.add_space(DesignSystem::SPACING_SMALL);

        Card::new().title("Service History").show(ui, |ui| {
            ui.horizontal(|ui| {
                for history in ServiceHistory::ALL {
                    ui.radio_value(&mut details.service_history, history, history.to_string());
                }
            });
        });
        ui.add_space(DesignSystem::SPACING_SMALL);

        Card::new().title("Is Insurance Valid?").show(ui, |ui| {
            ui.horizontal(|ui| {
                for insurance in Insurance::ALL {
                    ui.radio_value(&mut details.insurance, insurance, insurance.to_string());
                }
            });
        });
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        match &self.view {
            PredictionView::Idle => {}
            PredictionView::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Requesting estimate...");
                });
            }
            PredictionView::Failed(message) => {
                Card::new().show(ui, |ui| {
                    ui.label(egui::RichText::new(message).color(DesignSystem::DANGER));
                });
            }
            PredictionView::Ready(estimate) => render_estimate(ui, estimate),
        }
    }

    fn render_debug(&self, ui: &mut egui::Ui) {
        let record = self.details.to_feature_record();
        let json = serde_json::to_string_pretty(&record)
            .unwrap_or_else(|e| format!("<unserializable record: {}>", e));
        Card::new().title("Debug Info").show(ui, |ui| {
            ui.label(egui::RichText::new(json).monospace().small());
        });
    }
}

fn render_estimate(ui: &mut egui::Ui, estimate: &Estimate) {
    Card::new().highlighted(true).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Estimated Resale Value")
                    .size(18.0)
                    .color(DesignSystem::ACCENT_PRIMARY),
            );
            ui.label(
                egui::RichText::new(format!("USD {:.0}", estimate.price))
                    .size(36.0)
                    .strong()
                    .color(DesignSystem::TEXT_PRIMARY),
            );
            let delta = estimate.delta();
            let (sign, color) = if delta >= 0.0 {
                ("+", DesignSystem::SUCCESS)
            } else {
                ("", DesignSystem::DANGER)
            };
            ui.label(
                egui::RichText::new(format!(
                    "{}{:.0} vs reference {:.0}",
                    sign, delta, estimate.gauge.delta_reference
                ))
                .color(color),
            );
        });
        ui.add_space(DesignSystem::SPACING_SMALL);
        render_price_gauge(ui, &estimate.gauge, estimate.price);
    });

    ui.add_space(DesignSystem::SPACING_MEDIUM);

    Card::new().title("Key Value Factors").show(ui, |ui| {
        for factor in &estimate.impacts {
            let color = if factor.increases_value() {
                DesignSystem::SUCCESS
            } else {
                DesignSystem::DANGER
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(factor.label).strong());
                ui.label(egui::RichText::new(factor.describe()).color(color));
            });
            ui.add(
                egui::ProgressBar::new(factor.progress())
                    .fill(color)
                    .desired_height(6.0),
            );
            ui.add_space(4.0);
        }
        ui.add_space(DesignSystem::SPACING_SMALL);
        render_impact_chart(ui, &estimate.impacts);
    });

    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.label(
        egui::RichText::new(
            "Note: actual price may vary based on market conditions, vehicle condition, \
             and other factors not considered in this estimate.",
        )
        .small()
        .italics()
        .color(DesignSystem::TEXT_MUTED),
    );
}

impl eframe::App for PricePredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        self.poll_results();

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.heading(
                            egui::RichText::new("Used Car Price Predictor")
                                .size(26.0)
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(
                                "Enter your car's details below to get an estimated resale price.",
                            )
                            .color(DesignSystem::TEXT_SECONDARY),
                        );
                        ui.add_space(DesignSystem::SPACING_MEDIUM);

                        self.render_specifications(ui);
                        ui.add_space(DesignSystem::SPACING_SMALL);
                        self.render_categories(ui);
                        ui.add_space(DesignSystem::SPACING_MEDIUM);

                        ui.horizontal(|ui| {
                            let pending = self.view == PredictionView::Pending;
                            let button = egui::Button::new(
                                egui::RichText::new("Predict Resale Price").strong(),
                            )
                            .fill(DesignSystem::ACCENT_DARK);
                            if ui.add_enabled(!pending, button).clicked() {
                                self.submit(ui.ctx());
                            }
                            ui.checkbox(&mut self.show_debug, "Show debug info");
                        });
                        ui.add_space(DesignSystem::SPACING_MEDIUM);

                        if self.show_debug {
                            self.render_debug(ui);
                            ui.add_space(DesignSystem::SPACING_MEDIUM);
                        }

                        self.render_result(ui);
                    });
            });
    }
}
