// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use anyhow::Context;
use eframe::egui;
use std::path::PathBuf;

use varda::{CarExplorer, Point, Rgb, StarGeometry};

const HIT_TOLERANCE: f64 = 6.0;

fn main() -> std::result::Result<(), eframe::Error> {
    env_logger::init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1020.0, 640.0])
            .with_title("Car Explorer"),
        ..Default::default()
    };
    eframe::run_native(
        "Car Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(CarExplorerApp::new()))),
    )
}

struct CarExplorerApp {
    explorer: Option<CarExplorer>,
    selected_file: Option<PathBuf>,
    error_message: Option<String>,
}

impl CarExplorerApp {
    fn new() -> Self {
        let mut app = Self {
            explorer: None,
            selected_file: None,
            error_message: None,
        };
        let default_paths = [
            "cars.csv",
            "data/cars.csv",
            "bin/demos/varda-explorer-demo/cars.csv",
        ];
        if let Some(path) = default_paths.iter().map(PathBuf::from).find(|p| p.exists()) {
            app.load_file(path);
        }
        app
    }

    fn load_file(&mut self, path: PathBuf) {
        let loaded = CarExplorer::from_csv(&path)
            .with_context(|| format!("failed to load dataset '{}'", path.display()));
        match loaded {
            Ok(explorer) => {
                self.explorer = Some(explorer);
                self.selected_file = Some(path);
                self.error_message = None;
            }
            Err(e) => {
                log::error!("{e:#}");
                self.explorer = None;
                self.error_message = Some(format!("{e:#}"));
            }
        }
    }

    fn to_colour32(rgb: Rgb) -> egui::Color32 {
        egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
    }

    fn draw_scatter(&self, ui: &mut egui::Ui) -> Option<usize> {
        let explorer = self.explorer.as_ref()?;
        let view = explorer.scatter();
        let area = view.area();
        let desired = egui::vec2(area.width as f32, area.height as f32);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click());
        let painter = ui.painter_at(rect);
        let origin = rect.min + egui::vec2(area.margin.left as f32, area.margin.top as f32);
        let to_screen = |p: Point| egui::pos2(origin.x + p.x as f32, origin.y + p.y as f32);
        let axis_stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
        let text_colour = ui.visuals().text_color();
        let inner_w = area.inner_width();
        let inner_h = area.inner_height();

        painter.line_segment(
            [
                to_screen(Point::new(0.0, inner_h)),
                to_screen(Point::new(inner_w, inner_h)),
            ],
            axis_stroke,
        );
        for tick in view.x_scale().ticks(8) {
            let base = to_screen(Point::new(view.x_scale().apply(tick), inner_h));
            painter.line_segment([base, base + egui::vec2(0.0, 5.0)], axis_stroke);
            painter.text(
                base + egui::vec2(0.0, 16.0),
                egui::Align2::CENTER_CENTER,
                format!("{tick}"),
                egui::FontId::proportional(10.0),
                text_colour,
            );
        }
        painter.text(
            to_screen(Point::new(inner_w / 2.0, inner_h + 40.0)),
            egui::Align2::CENTER_CENTER,
            "Horsepower (HP)",
            egui::FontId::proportional(12.0),
            text_colour,
        );

        painter.line_segment(
            [to_screen(Point::ORIGIN), to_screen(Point::new(0.0, inner_h))],
            axis_stroke,
        );
        for tick in view.y_scale().ticks(8) {
            let base = to_screen(Point::new(0.0, inner_h - view.y_scale().apply(tick)));
            painter.line_segment([base + egui::vec2(-5.0, 0.0), base], axis_stroke);
            painter.text(
                base + egui::vec2(-8.0, 0.0),
                egui::Align2::RIGHT_CENTER,
                format!("{tick}"),
                egui::FontId::proportional(10.0),
                text_colour,
            );
        }
        painter.text(
            to_screen(Point::new(0.0, -16.0)),
            egui::Align2::LEFT_CENTER,
            "Retail Price ($)",
            egui::FontId::proportional(12.0),
            text_colour,
        );

        let mark_radius = explorer.config().mark_radius as f32;
        for mark in view.marks() {
            let centre = to_screen(mark.pos);
            painter.circle_filled(centre, mark_radius, Self::to_colour32(mark.colour));
            if explorer.selection().is_selected(mark.index) {
                painter.circle_stroke(
                    centre,
                    mark_radius + 2.5,
                    egui::Stroke::new(2.0, text_colour),
                );
            }
        }

        let legend_origin = to_screen(Point::new(inner_w + 20.0, 0.0));
        for (i, entry) in view.legend().iter().enumerate() {
            let row = legend_origin + egui::vec2(0.0, i as f32 * 20.0);
            painter.rect_filled(
                egui::Rect::from_min_size(row, egui::vec2(10.0, 10.0)),
                egui::CornerRadius::ZERO,
                Self::to_colour32(entry.colour),
            );
            painter.text(
                row + egui::vec2(15.0, 5.0),
                egui::Align2::LEFT_CENTER,
                &entry.label,
                egui::FontId::proportional(12.0),
                text_colour,
            );
        }

        if response.clicked() {
            if let Some(click) = response.interact_pointer_pos() {
                let local = Point::new((click.x - origin.x) as f64, (click.y - origin.y) as f64);
                return view.hit_test(local, HIT_TOLERANCE);
            }
        }
        None
    }

    fn draw_star(&self, ui: &mut egui::Ui, geometry: &StarGeometry, colour: Rgb) {
        let side = (geometry.radius * 3.0) as f32;
        let (rect, _response) =
            ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let centre = rect.center();
        let to_screen = |p: Point| egui::pos2(centre.x + p.x as f32, centre.y + p.y as f32);
        let text_colour = ui.visuals().text_color();
        for axis in &geometry.axes {
            painter.line_segment(
                [to_screen(Point::ORIGIN), to_screen(axis.end)],
                egui::Stroke::new(1.0, egui::Color32::GRAY),
            );
            painter.text(
                to_screen(axis.label_anchor),
                egui::Align2::CENTER_CENTER,
                &axis.label,
                egui::FontId::proportional(11.0),
                text_colour,
            );
        }
        let points: Vec<egui::Pos2> = geometry.vertices.iter().map(|v| to_screen(*v)).collect();
        let stroke_colour = Self::to_colour32(colour);
        let fill = egui::Color32::from_rgba_unmultiplied(colour.r, colour.g, colour.b, 90);
        painter.add(egui::Shape::convex_polygon(
            points,
            fill,
            egui::Stroke::new(2.0, stroke_colour),
        ));
    }

    fn render_detail_panel(&self, ui: &mut egui::Ui) {
        let Some(explorer) = self.explorer.as_ref() else {
            return;
        };
        ui.heading("Details");
        ui.separator();
        let Some(car) = explorer.selected_car() else {
            ui.label("Click a mark to inspect a car.");
            return;
        };
        if let Some(panel) = explorer.detail_text() {
            for line in panel.lines() {
                ui.monospace(line);
            }
        }
        ui.separator();
        if let Some(geometry) = explorer.star_geometry() {
            let colour = explorer.scatter().colours().colour_of(&car.car_type);
            self.draw_star(ui, &geometry, colour);
        }
        ui.separator();
        if ui.button("Copy JSON").clicked() {
            match explorer.export_selection_json() {
                Ok(json) => ui.ctx().copy_text(json),
                Err(e) => log::warn!("export failed: {e}"),
            }
        }
    }
}

impl eframe::App for CarExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Car Explorer");
                ui.separator();
                if ui.button("Select CSV File").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .pick_file()
                    {
                        self.load_file(path);
                    }
                }
                if let Some(ref path) = self.selected_file {
                    ui.label(format!("File: {}", path.display()));
                }
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(explorer) = &self.explorer {
                    ui.label(format!("Records: {}", explorer.cars().len()));
                    ui.label(format!("Types: {}", explorer.categories().len()));
                    if let Some(car) = explorer.selected_car() {
                        ui.separator();
                        ui.label(format!("Selected: {}", car.name));
                    }
                }
            });
        });

        if self.explorer.is_some() {
            egui::SidePanel::right("detail_panel")
                .min_width(340.0)
                .show(ctx, |ui| self.render_detail_panel(ui));
        }

        let mut clicked: Option<usize> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref error) = self.error_message {
                ui.colored_label(egui::Color32::RED, "Error:");
                ui.separator();
                ui.monospace(error);
                return;
            }
            if self.explorer.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Select a CSV file of car records to get started");
                });
                return;
            }
            egui::ScrollArea::both().show(ui, |ui| {
                clicked = self.draw_scatter(ui);
            });
        });

        if let Some(index) = clicked {
            if let Some(explorer) = self.explorer.as_mut() {
                if let Err(e) = explorer.select(index) {
                    self.error_message = Some(e.to_string());
                }
            }
        }
    }
}
