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
use crate::error::{ChartError, ChartResult};
use crate::scale::LinearScale;
use serde::Serialize;
use std::f64::consts::PI;

pub const MIN_AXES: usize = 3;
pub const LABEL_OFFSET: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureKind {
    Numeric(NumericField),
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDescriptor {
    pub label: String,
    pub kind: FeatureKind,
}

impl FeatureDescriptor {
    pub fn numeric(label: &str, field: NumericField) -> Self {
        Self {
            label: label.to_string(),
            kind: FeatureKind::Numeric(field),
        }
    }
    pub fn categorical(label: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: FeatureKind::Categorical,
        }
    }
}

pub fn default_features() -> Vec<FeatureDescriptor> {
    vec![
        FeatureDescriptor::categorical("Type"),
        FeatureDescriptor::numeric("AWD", NumericField::Awd),
        FeatureDescriptor::numeric("RWD", NumericField::Rwd),
        FeatureDescriptor::numeric("Retail Price", NumericField::RetailPrice),
        FeatureDescriptor::numeric("Dealer Cost", NumericField::DealerCost),
        FeatureDescriptor::numeric("Engine Size", NumericField::EngineSize),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn polar(angle: f64, radius: f64) -> Self {
        Self {
            x: angle.cos() * radius,
            y: angle.sin() * radius,
        }
    }
}

pub fn axis_angle(index: usize, axis_count: usize) -> f64 {
    index as f64 * (2.0 * PI / axis_count as f64) - PI / 2.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarAxis {
    pub label: String,
    pub angle: f64,
    pub end: Point,
    pub label_anchor: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarGeometry {
    pub radius: f64,
    pub axes: Vec<StarAxis>,
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct StarPlot {
    features: Vec<FeatureDescriptor>,
    scales: Vec<LinearScale>,
    categories: CategorySet,
    radius: f64,
}

impl StarPlot {
    pub fn new(
        features: Vec<FeatureDescriptor>,
        cars: &[Car],
        categories: &CategorySet,
        radius: f64,
    ) -> ChartResult<Self> {
        if features.len() < MIN_AXES {
            return Err(ChartError::NotEnoughAxes {
                required: MIN_AXES,
                available: features.len(),
            });
        }
        let scales = features
            .iter()
            .map(|feature| match feature.kind {
                FeatureKind::Numeric(field) => LinearScale::from_field(cars, field, radius),
                FeatureKind::Categorical => LinearScale::for_categories(categories, radius),
            })
            .collect();
        Ok(Self {
            features,
            scales,
            categories: categories.clone(),
            radius,
        })
    }
    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
    pub fn scale_of(&self, index: usize) -> Option<&LinearScale> {
        self.scales.get(index)
    }
    pub fn geometry(&self, car: &Car) -> StarGeometry {
        let axis_count = self.features.len();
        let axes = self
            .features
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let angle = axis_angle(i, axis_count);
                StarAxis {
                    label: feature.label.clone(),
                    angle,
                    end: Point::polar(angle, self.radius),
                    label_anchor: Point::polar(angle, self.radius * LABEL_OFFSET),
                }
            })
            .collect();
        let vertices = self
            .features
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                Point::polar(axis_angle(i, axis_count), self.vertex_radius(i, feature, car))
            })
            .collect();
        StarGeometry {
            radius: self.radius,
            axes,
            vertices,
        }
    }
    fn vertex_radius(&self, index: usize, feature: &FeatureDescriptor, car: &Car) -> f64 {
        let value = match feature.kind {
            FeatureKind::Numeric(field) => field.of(car),
            FeatureKind::Categorical => match self.categories.index_of(&car.car_type) {
                Some(position) => position as f64,
                None => {
                    debug_assert!(
                        false,
                        "category '{}' missing from the encoded set",
                        car.car_type
                    );
                    log::error!("category index miss for '{}'", car.car_type);
                    f64::NAN
                }
            },
        };
        let radius = self.scales[index].apply(value);
        // Missing measurements collapse the vertex to the origin.
        if radius.is_finite() {
            radius
        } else {
            0.0
        }
    }
}
