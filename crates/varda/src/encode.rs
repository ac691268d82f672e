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

use crate::dataset::Car;
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl CategorySet {
    pub fn from_cars(cars: &[Car]) -> Self {
        Self::from_labels(cars.iter().map(|car| car.car_type.clone()))
    }
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            labels: labels.into_iter().unique().sorted().collect(),
        }
    }
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
    pub fn len(&self) -> usize {
        self.labels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
    pub fn max_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|candidate| candidate.as_str().cmp(label))
            .ok()
    }
}
