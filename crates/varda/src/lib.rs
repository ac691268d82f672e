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

pub mod dataset;
pub mod detail;
pub mod encode;
pub mod error;
pub mod scale;
pub mod scatter;
pub mod star;

pub use dataset::{load_csv, max_of, Car, NumericField};
pub use encode::CategorySet;
pub use error::{ChartError, DataError, ExplorerError, Result, SerialisationError};
pub use scale::{ColourScale, LinearScale, Rgb, CATEGORY_PALETTE};
pub use scatter::{LegendEntry, Margins, PlotArea, ScatterMark, ScatterView, Selection};
pub use star::{
    default_features, FeatureDescriptor, FeatureKind, Point, StarAxis, StarGeometry, StarPlot,
};

use std::path::Path;

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub plot: PlotArea,
    pub star_radius: f64,
    pub mark_radius: f64,
    pub features: Vec<FeatureDescriptor>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            plot: PlotArea::default(),
            star_radius: 100.0,
            mark_radius: 5.0,
            features: default_features(),
        }
    }
}

#[derive(Debug)]
pub struct CarExplorer {
    config: ExplorerConfig,
    cars: Vec<Car>,
    categories: CategorySet,
    scatter: ScatterView,
    star: StarPlot,
    selection: Selection,
}

impl CarExplorer {
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let cars = dataset::load_csv(path)?;
        Self::from_cars(cars, ExplorerConfig::default())
    }
    pub fn from_cars(cars: Vec<Car>, config: ExplorerConfig) -> Result<Self> {
        if cars.is_empty() {
            return Err(DataError::EmptyDataset.into());
        }
        let categories = CategorySet::from_cars(&cars);
        let scatter = ScatterView::new(&cars, &categories, config.plot);
        let star = StarPlot::new(config.features.clone(), &cars, &categories, config.star_radius)?;
        log::info!(
            "loaded {} records across {} categories",
            cars.len(),
            categories.len()
        );
        Ok(Self {
            config,
            cars,
            categories,
            scatter,
            star,
            selection: Selection::NONE,
        })
    }
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }
    pub fn scatter(&self) -> &ScatterView {
        &self.scatter
    }
    pub fn star(&self) -> &StarPlot {
        &self.star
    }
    pub fn selection(&self) -> Selection {
        self.selection
    }
    pub fn select(&mut self, index: usize) -> Result<&Car> {
        if index >= self.cars.len() {
            return Err(ChartError::RecordOutOfRange {
                index,
                len: self.cars.len(),
            }
            .into());
        }
        self.selection = Selection::select(index);
        Ok(&self.cars[index])
    }
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
    pub fn selected_car(&self) -> Option<&Car> {
        self.selection.index().map(|index| &self.cars[index])
    }
    pub fn detail_text(&self) -> Option<String> {
        self.selected_car().map(detail::render)
    }
    pub fn star_geometry(&self) -> Option<StarGeometry> {
        self.selected_car().map(|car| self.star.geometry(car))
    }
    pub fn export_selection_json(&self) -> Result<String> {
        let car = self
            .selected_car()
            .ok_or(SerialisationError::NothingSelected)?;
        let payload = serde_json::json!({
            "car": car,
            "geometry": self.star.geometry(car),
        });
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<Car> {
        let csv = "\
Name,Type,Retail Price,Dealer Cost,Horsepower(HP),City Miles Per Gallon,Weight,Engine Size (l),AWD,RWD,Cyl
X,Sedan,20000,18000,150,24,3100,2.4,0,0,4
Y,SUV,30000,27500,200,16,4400,4.0,1,0,8
";
        dataset::from_reader(csv.as_bytes()).unwrap()
    }

    fn three_axis_config() -> ExplorerConfig {
        ExplorerConfig {
            features: vec![
                FeatureDescriptor::categorical("Type"),
                FeatureDescriptor::numeric("HP", NumericField::Horsepower),
                FeatureDescriptor::numeric("Retail Price", NumericField::RetailPrice),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = CarExplorer::from_cars(Vec::new(), ExplorerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ExplorerError::Data(DataError::EmptyDataset)
        ));
    }

    #[test]
    fn click_on_y_selects_y_and_updates_both_panels() {
        let mut explorer = CarExplorer::from_cars(fleet(), three_axis_config()).unwrap();
        assert_eq!(explorer.selection().index(), None);
        let y_pos = explorer.scatter().marks()[1].pos;
        let hit = explorer.scatter().hit_test(y_pos, 6.0).unwrap();
        explorer.select(hit).unwrap();
        assert_eq!(explorer.selected_car().unwrap().name, "Y");
        let panel = explorer.detail_text().unwrap();
        assert!(panel.contains("Type: SUV"));
        let geometry = explorer.star_geometry().unwrap();
        let hp_vertex = geometry.vertices[1];
        let radius = (hp_vertex.x.powi(2) + hp_vertex.y.powi(2)).sqrt();
        // 200 HP is the maximum, so the HP vertex reaches the full radius.
        assert!((radius - explorer.config().star_radius).abs() < 1e-9);
    }

    #[test]
    fn reselection_replaces_the_previous_choice() {
        let mut explorer = CarExplorer::from_cars(fleet(), three_axis_config()).unwrap();
        explorer.select(0).unwrap();
        explorer.select(1).unwrap();
        assert!(explorer.selection().is_selected(1));
        assert!(!explorer.selection().is_selected(0));
        explorer.clear_selection();
        assert!(explorer.selected_car().is_none());
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        let mut explorer = CarExplorer::from_cars(fleet(), three_axis_config()).unwrap();
        let err = explorer.select(7).unwrap_err();
        assert!(matches!(
            err,
            ExplorerError::Chart(ChartError::RecordOutOfRange { index: 7, len: 2 })
        ));
    }

    #[test]
    fn export_requires_a_selection() {
        let mut explorer = CarExplorer::from_cars(fleet(), three_axis_config()).unwrap();
        assert!(explorer.export_selection_json().is_err());
        explorer.select(1).unwrap();
        let json = explorer.export_selection_json().unwrap();
        assert!(json.contains("\"name\": \"Y\""));
        assert!(json.contains("\"vertices\""));
    }
}
