use super::state::{CatalogStatus, StatusKind, ViewMode};
use super::EtlLauncher;
use crate::etl::Transformation;
use crate::utils::file_size::format_size;
use crate::utils::sort::{sorted, SortOrder};
use chrono::Local;
use eframe::egui::{self, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const WARNING: Color32 = Color32::from_rgb(230, 160, 0);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const TILE_SIZE: [f32; 2] = [150.0, 96.0];

fn format_modified(t: &Transformation) -> String {
    t.modified
        .map(|m| m.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl EtlLauncher {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Pentaho ETL Launcher");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Pick a transformation, optionally filter by date, and run it")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Transformation");
                        ui.add_space(8.0);
                        ui.selectable_value(&mut self.state.view_mode, ViewMode::List, "☰ List");
                        ui.selectable_value(&mut self.state.view_mode, ViewMode::Grid, "▦ Grid");
                    });
                    ui.add_space(8.0);

                    match self.state.catalog_notice() {
                        Some(notice) => {
                            let color = match self.state.catalog {
                                CatalogStatus::Failed(_) => ERROR,
                                _ => ui.visuals().text_color().gamma_multiply(0.7),
                            };
                            ui.colored_label(color, notice);
                        }
                        None => match self.state.view_mode {
                            ViewMode::List => self.render_dropdown(ui),
                            ViewMode::Grid => self.render_grid(ui),
                        },
                    }
                });

                ui.add_space(20.0);
                self.render_date_filters(ui);
                ui.add_space(20.0);

                ui.vertical_centered(|ui| {
                    let running = self.state.is_executing;
                    ui.add_enabled_ui(!running, |ui| {
                        let label = if running { "⏳ Running..." } else { "▶ Run ETL" };
                        let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                        if ui.add(button).clicked() {
                            self.run_selected();
                        }
                    });
                });

                ui.add_space(20.0);
                self.render_status(ui);
            });
        });
    }

    fn render_dropdown(&mut self, ui: &mut egui::Ui) {
        let selected_text = self
            .state
            .selected()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "-- select a .ktr --".to_string());

        let mut clicked = None;
        egui::ComboBox::from_id_source("transformation_picker")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for t in &self.state.transformations {
                    let is_selected = self.state.selected_path.as_deref() == Some(t.path.as_str());
                    if ui
                        .selectable_label(is_selected, t.name.as_str())
                        .on_hover_text(t.path.as_str())
                        .clicked()
                    {
                        clicked = Some(t.path.clone());
                    }
                }
            });

        if let Some(path) = clicked {
            self.state.select(&path);
        }
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Sort by");
            egui::ComboBox::from_id_source("sort_order")
                .selected_text(self.state.sort_order.label())
                .show_ui(ui, |ui| {
                    for order in SortOrder::ALL {
                        ui.selectable_value(&mut self.state.sort_order, order, order.label());
                    }
                });
        });
        ui.add_space(8.0);

        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for t in sorted(&self.state.transformations, self.state.sort_order) {
                let is_selected = self.state.selected_path.as_deref() == Some(t.path.as_str());
                let text = format!(
                    "📄\n{}\n{}\n{}",
                    t.name,
                    format_size(t.size),
                    format_modified(t)
                );
                let tile = egui::SelectableLabel::new(is_selected, RichText::new(text));
                if ui.add_sized(TILE_SIZE, tile).on_hover_text(t.path.as_str()).clicked() {
                    clicked = Some(t.path.clone());
                }
            }
        });

        if let Some(path) = clicked {
            self.state.select(&path);
        }
    }

    fn render_date_filters(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("Date filter (optional)");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Start");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.fecha_inicio)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(110.0),
                );
                ui.add_space(12.0);
                ui.label("End");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.fecha_fin)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(110.0),
                );
            });
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let status = &self.state.status;
        let color = match status.kind {
            StatusKind::Idle => return,
            StatusKind::Loading => ACCENT,
            StatusKind::Success => SUCCESS,
            StatusKind::Warning => WARNING,
            StatusKind::Error => ERROR,
        };

        ui.group(|ui| {
            ui.horizontal(|ui| {
                if status.kind == StatusKind::Loading {
                    ui.spinner();
                }
                ui.colored_label(color, status.text.as_str());
            });
        });

        let Some(details) = self.state.status.details.clone() else {
            return;
        };

        ui.add_space(10.0);
        if ui
            .button(if self.state.show_details {
                "Hide Details"
            } else {
                "Show Details"
            })
            .clicked()
        {
            self.state.show_details = !self.state.show_details;
        }

        if self.state.show_details {
            egui::ScrollArea::vertical()
                .id_source("run_details")
                .max_height(200.0)
                .show(ui, |ui| {
                    egui::Frame::none()
                        .fill(ui.style().visuals.extreme_bg_color)
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(RichText::new(details).monospace()).wrap(true),
                            );
                        });
                });
        }
    }
}
