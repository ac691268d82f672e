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

use crate::dataset::{Car, NumericField};
use crate::encode::CategorySet;
use crate::scale::{ColourScale, LinearScale, Rgb};
use crate::star::Point;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margins,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 500.0,
            margin: Margins {
                top: 40.0,
                right: 150.0,
                bottom: 60.0,
                left: 60.0,
            },
        }
    }
}

impl PlotArea {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMark {
    pub index: usize,
    pub pos: Point,
    pub colour: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub colour: Rgb,
}

#[derive(Debug, Clone)]
pub struct ScatterView {
    area: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
    colours: ColourScale,
    marks: Vec<ScatterMark>,
    legend: Vec<LegendEntry>,
}

impl ScatterView {
    pub fn new(cars: &[Car], categories: &CategorySet, area: PlotArea) -> Self {
        let x_scale = LinearScale::from_field(cars, NumericField::Horsepower, area.inner_width());
        let y_scale = LinearScale::from_field(cars, NumericField::RetailPrice, area.inner_height());
        let colours = ColourScale::new(categories.clone());
        // Records with an unparsable axis field have no defined position and draw no mark.
        let marks = cars
            .iter()
            .enumerate()
            .filter_map(|(index, car)| {
                let x = x_scale.apply(car.horsepower);
                let y = area.inner_height() - y_scale.apply(car.retail_price);
                if x.is_finite() && y.is_finite() {
                    Some(ScatterMark {
                        index,
                        pos: Point::new(x, y),
                        colour: colours.colour_of(&car.car_type),
                    })
                } else {
                    None
                }
            })
            .collect();
        let legend = categories
            .labels()
            .iter()
            .map(|label| LegendEntry {
                label: label.clone(),
                colour: colours.colour_of(label),
            })
            .collect();
        Self {
            area,
            x_scale,
            y_scale,
            colours,
            marks,
            legend,
        }
    }
    pub fn area(&self) -> PlotArea {
        self.area
    }
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }
    pub fn colours(&self) -> &ColourScale {
        &self.colours
    }
    pub fn marks(&self) -> &[ScatterMark] {
        &self.marks
    }
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }
    pub fn hit_test(&self, at: Point, tolerance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for mark in &self.marks {
            let dx = mark.pos.x - at.x;
            let dy = mark.pos.y - at.y;
            let distance_sq = dx * dx + dy * dy;
            if distance_sq <= tolerance * tolerance
                && best.map_or(true, |(_, b)| distance_sq < b)
            {
                best = Some((mark.index, distance_sq));
            }
        }
        best.map(|(index, _)| index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection(Option<usize>);

impl Selection {
    pub const NONE: Selection = Selection(None);
    pub fn select(index: usize) -> Self {
        Selection(Some(index))
    }
    pub fn set(&mut self, index: usize) {
        self.0 = Some(index);
    }
    pub fn clear(&mut self) {
        self.0 = None;
    }
    pub fn index(&self) -> Option<usize> {
        self.0
    }
    pub fn is_selected(&self, index: usize) -> bool {
        self.0 == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(name: &str, car_type: &str, horsepower: f64, retail_price: f64) -> Car {
        Car {
            name: name.to_string(),
            car_type: car_type.to_string(),
            retail_price,
            dealer_cost: retail_price,
            horsepower,
            city_mpg: 20.0,
            weight: 3000.0,
            engine_size: 2.0,
            awd: 0.0,
            rwd: 0.0,
            cyl: 4.0,
        }
    }

    fn view(cars: &[Car]) -> ScatterView {
        let categories = CategorySet::from_cars(cars);
        ScatterView::new(cars, &categories, PlotArea::default())
    }

    #[test]
    fn positions_follow_the_scales_with_inverted_y() {
        let cars = vec![
            car("X", "Sedan", 150.0, 20000.0),
            car("Y", "SUV", 200.0, 30000.0),
        ];
        let v = view(&cars);
        let area = v.area();
        let max_mark = &v.marks()[1];
        assert!((max_mark.pos.x - area.inner_width()).abs() < 1e-9);
        // Price maximum sits at the top of the panel.
        assert!(max_mark.pos.y.abs() < 1e-9);
        let min_mark = &v.marks()[0];
        assert!(min_mark.pos.y > max_mark.pos.y);
    }

    #[test]
    fn unplottable_records_draw_no_mark() {
        let mut cars = vec![
            car("X", "Sedan", 150.0, 20000.0),
            car("Y", "SUV", 200.0, 30000.0),
        ];
        cars[0].horsepower = f64::NAN;
        let v = view(&cars);
        assert_eq!(v.marks().len(), 1);
        assert_eq!(v.marks()[0].index, 1);
    }

    #[test]
    fn legend_matches_sorted_categories() {
        let cars = vec![
            car("A", "Sedan", 100.0, 10000.0),
            car("B", "SUV", 120.0, 12000.0),
            car("C", "Sedan", 140.0, 14000.0),
        ];
        let v = view(&cars);
        let labels: Vec<&str> = v.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["SUV", "Sedan"]);
    }

    #[test]
    fn hit_test_picks_the_nearest_mark_within_tolerance() {
        let cars = vec![
            car("X", "Sedan", 100.0, 10000.0),
            car("Y", "SUV", 200.0, 30000.0),
        ];
        let v = view(&cars);
        let target = v.marks()[0].pos;
        let near = Point::new(target.x + 2.0, target.y - 2.0);
        assert_eq!(v.hit_test(near, 6.0), Some(0));
        assert_eq!(v.hit_test(Point::new(target.x + 50.0, target.y), 6.0), None);
    }

    #[test]
    fn selection_is_exclusive() {
        let mut selection = Selection::NONE;
        assert_eq!(selection.index(), None);
        selection.set(0);
        selection.set(1);
        assert!(selection.is_selected(1));
        assert!(!selection.is_selected(0));
        assert_eq!(selection.index(), Some(1));
        selection.clear();
        assert_eq!(selection, Selection::NONE);
    }
}
