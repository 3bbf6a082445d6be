mod settings;

use std::sync::Arc;

use eframe::egui::{self, RichText, Ui};
use hitcast_domain::{FeatureKind, HIT_THRESHOLD};
use hitcast_model::{ModelStatus, Predictor};
use hitcast_session::{GaugeTone, SessionState, Verdict, DISPLAY_ORDER, RADAR_FEATURES};
use hitcast_ui::charts;
use hitcast_ui::theme::{self as ui_theme, ThemeMode, ThemeTokens};
use settings::AppSettings;
use time::OffsetDateTime;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = AppSettings::load_or_default();
    let model = ModelStatus::load(&settings.model_path);
    info!(ready = model.is_ready(), path = %settings.model_path.display(), "starting desktop app");

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Hitcast | Hit Predictor",
        options,
        Box::new(move |_cc| Box::new(DesktopApp::new(settings, model))),
    )
    .map_err(|e| anyhow::anyhow!(format!("{e:?}")))?;
    Ok(())
}

struct DesktopApp {
    model: ModelStatus,
    session: SessionState,
    settings: SettingsPane,
    status_message: Option<String>,
    last_updated: String,
}

impl DesktopApp {
    fn new(settings: AppSettings, model: ModelStatus) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            model,
            session: SessionState::new(),
            settings: SettingsPane::new(settings),
            status_message: None,
            last_updated: format!("{} {}", now.month(), now.year()),
        }
    }

    fn analyze(&mut self, predictor: &Predictor) {
        match self.session.analyze(predictor) {
            Ok(_) => self.status_message = None,
            Err(err) => {
                error!(error = %err, "analysis failed");
                self.status_message = Some(format!("Analysis failed: {err}"));
            }
        }
    }

    fn controls_ui(&mut self, ui: &mut Ui) {
        ui.heading("Audio Features Control Panel");
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for feature in DISPLAY_ORDER {
                let spec = feature.spec();
                let mut value = self.session.inputs.get(feature);
                ui.label(RichText::new(spec.display_label()).strong());
                let slider = egui::Slider::new(&mut value, spec.min..=spec.max).step_by(spec.step);
                let slider = match spec.kind {
                    FeatureKind::Integer => slider.fixed_decimals(0),
                    FeatureKind::Continuous => slider.max_decimals(2),
                };
                if ui.add(slider).on_hover_text(spec.description).changed() {
                    if let Err(err) = self.session.inputs.set(feature, spec.clamp(value)) {
                        self.status_message = Some(err.to_string());
                    }
                }
                ui.add_space(4.0);
            }
            ui.separator();
            if ui
                .add_sized([ui.available_width(), 32.0], egui::Button::new("Reset to Zero"))
                .clicked()
            {
                self.session.reset_inputs();
            }
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.weak(format!("App last updated: {}", self.last_updated));
            });
        });
    }

    fn results_ui(&mut self, ui: &mut Ui, predictor: &Arc<Predictor>, tokens: &ThemeTokens) {
        ui.columns(2, |columns| {
            columns[0].vertical_centered(|ui| {
                ui.heading("Audio Feature Profile");
                let axes: Vec<(String, f64)> = RADAR_FEATURES
                    .iter()
                    .map(|feature| {
                        (
                            feature.spec().display_label(),
                            self.session.inputs.get(*feature),
                        )
                    })
                    .collect();
                charts::radar(ui, &axes, tokens, 320.0);
            });

            columns[1].vertical_centered(|ui| {
                ui.heading("Hit Probability");
                let bar = tone_color(self.session.gauge_tone(), tokens);
                charts::gauge(ui, self.session.percent(), bar, tokens, 200.0);
                ui.add_space(8.0);
                let analyze = egui::Button::new(RichText::new("ANALYZE HIT POTENTIAL").strong())
                    .fill(tokens.accent_hit);
                if ui.add_sized([ui.available_width(), 40.0], analyze).clicked() {
                    self.analyze(predictor);
                }
                if let Some(message) = &self.status_message {
                    ui.colored_label(tokens.accent_miss, message);
                }
                if self.session.prediction_made {
                    if let Some(verdict) = self.session.verdict() {
                        ui.add_space(12.0);
                        verdict_banner(ui, verdict, tokens);
                    }
                }
            });
        });
    }

    fn about_ui(&self, ui: &mut Ui, predictor: &Predictor) {
        egui::CollapsingHeader::new("About the model & methodology")
            .default_open(false)
            .show(ui, |ui| {
                let artifact = predictor.artifact();
                ui.columns(3, |columns| {
                    columns[0].heading("Model");
                    columns[0].label("Algorithm: bagged decision trees (Gini)");
                    columns[0].label(format!("Trees: {}", artifact.forest.tree_count()));
                    columns[0].label(format!("Training rows: {}", artifact.trained_rows));

                    columns[1].heading("Classification");
                    columns[1].label(format!("Hit threshold: popularity ≥ {HIT_THRESHOLD}"));
                    columns[1].label("Probability: share of trees voting hit");
                    columns[1].label("Label: hit when more than half the trees agree");

                    columns[2].heading("Accuracy");
                    columns[2].label("Not stored with the model.");
                    columns[2].label("Measure it with `hitcast-train --holdout 0.2`.");
                });
            });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui_theme::apply(ctx, self.settings.current.theme);
        let tokens = ui_theme::theme(self.settings.current.theme).tokens;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Hitcast Hit Predictor").color(tokens.accent_hit).strong());
                ui.label(RichText::new("Predict your song's chart potential").color(tokens.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.settings.open = true;
                    }
                });
            });
        });
        self.settings.window(ctx);

        let predictor = match &self.model {
            ModelStatus::Ready(predictor) => Arc::clone(predictor),
            ModelStatus::Unavailable { path, reason } => {
                let (path, reason) = (path.display().to_string(), reason.clone());
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading(
                            RichText::new("Model not found")
                                .color(tokens.accent_miss)
                                .strong(),
                        );
                        ui.label(format!("Please ensure '{path}' is in the correct directory."));
                        ui.weak(reason);
                    });
                });
                return;
            }
        };

        egui::SidePanel::left("controls")
            .default_width(300.0)
            .resizable(false)
            .show(ctx, |ui| self.controls_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.results_ui(ui, &predictor, &tokens);
            ui.separator();
            self.about_ui(ui, &predictor);
        });
    }
}

fn tone_color(tone: GaugeTone, tokens: &ThemeTokens) -> egui::Color32 {
    match tone {
        GaugeTone::Hit => tokens.accent_hit,
        GaugeTone::Miss => tokens.accent_miss,
        GaugeTone::Idle => tokens.idle,
    }
}

fn verdict_banner(ui: &mut Ui, verdict: Verdict, tokens: &ThemeTokens) {
    let accent = match verdict {
        Verdict::ChartBuster => tokens.accent_hit,
        Verdict::NeedsWork => tokens.accent_miss,
    };
    egui::Frame::none()
        .fill(accent.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(2.0, accent))
        .rounding(16.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(verdict.headline()).size(26.0).strong().color(accent));
                ui.label(verdict.detail());
            });
        });
}

struct SettingsPane {
    open: bool,
    current: AppSettings,
    model_path_input: String,
    status_message: Option<String>,
}

impl SettingsPane {
    fn new(current: AppSettings) -> Self {
        Self {
            open: false,
            model_path_input: current.model_path.display().to_string(),
            current,
            status_message: None,
        }
    }

    fn window(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Model artifact");
                ui.text_edit_singleline(&mut self.model_path_input);
                ui.weak("Takes effect the next time the app starts.");
                ui.add_space(6.0);

                let mut theme = self.current.theme;
                egui::ComboBox::from_label("Theme")
                    .selected_text(theme.label())
                    .show_ui(ui, |ui| {
                        for mode in [ThemeMode::Dark, ThemeMode::Light] {
                            ui.selectable_value(&mut theme, mode, mode.label());
                        }
                    });
                self.current.theme = theme;

                ui.add_space(6.0);
                if ui.button("Save").clicked() {
                    self.current.model_path = self.model_path_input.trim().into();
                    self.status_message = Some(match self.current.save() {
                        Ok(()) => "Saved".to_string(),
                        Err(err) => {
                            error!(error = %err, "failed to save settings");
                            format!("Save failed: {err}")
                        }
                    });
                }
                if let Some(message) = &self.status_message {
                    ui.weak(message);
                }
            });
        self.open = open;
    }
}
