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

use crate::dataset::{max_of, Car, NumericField};
use crate::encode::CategorySet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain_max: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        let domain_max = if domain_max.is_finite() && domain_max > 0.0 {
            domain_max
        } else {
            0.0
        };
        Self {
            domain_max,
            range_max,
        }
    }
    pub fn from_field(cars: &[Car], field: NumericField, range_max: f64) -> Self {
        Self::new(max_of(cars, field), range_max)
    }
    pub fn for_categories(categories: &CategorySet, range_max: f64) -> Self {
        Self::new(categories.max_index() as f64, range_max)
    }
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }
    pub fn range_max(&self) -> f64 {
        self.range_max
    }
    // A collapsed domain maps everything to the range origin.
    pub fn apply(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 {
            return 0.0;
        }
        value / self.domain_max * self.range_max
    }
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.domain_max <= 0.0 || count == 0 {
            return vec![0.0];
        }
        let step = tick_step(self.domain_max, count);
        let mut ticks = Vec::new();
        let mut value = 0.0;
        while value <= self.domain_max + step * 1e-9 {
            ticks.push(value);
            value += step;
        }
        ticks
    }
}

fn tick_step(domain_max: f64, count: usize) -> f64 {
    let raw = domain_max / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const CATEGORY_PALETTE: [Rgb; 10] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0x17, 0xbe, 0xcf),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColourScale {
    categories: CategorySet,
}

impl ColourScale {
    pub fn new(categories: CategorySet) -> Self {
        Self { categories }
    }
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }
    pub fn colour_of(&self, label: &str) -> Rgb {
        match self.categories.index_of(label) {
            Some(index) => CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()],
            None => {
                debug_assert!(false, "label '{label}' missing from the encoded category set");
                log::error!("colour lookup miss for label '{label}'");
                CATEGORY_PALETTE[0]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn midpoint_is_linear() {
        let scale = LinearScale::new(200.0, 100.0);
        assert_eq!(scale.apply(100.0), 50.0);
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(200.0), 100.0);
    }

    #[test]
    fn zero_domain_never_divides() {
        let scale = LinearScale::new(0.0, 100.0);
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(42.0), 0.0);
        assert_eq!(scale.apply(f64::NAN), 0.0);
    }

    #[test]
    fn nan_input_propagates_on_a_live_domain() {
        let scale = LinearScale::new(10.0, 100.0);
        assert!(scale.apply(f64::NAN).is_nan());
    }

    #[test]
    fn negative_or_nan_domain_collapses() {
        assert_eq!(LinearScale::new(-5.0, 100.0).apply(3.0), 0.0);
        assert_eq!(LinearScale::new(f64::NAN, 100.0).apply(3.0), 0.0);
    }

    #[test]
    fn ticks_cover_the_domain() {
        let scale = LinearScale::new(500.0, 400.0);
        let ticks = scale.ticks(8);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(*ticks.last().unwrap() <= 500.0 + 1e-6);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn colour_is_stable_per_label() {
        let set = CategorySet::from_labels(
            ["Sedan", "SUV", "Sports"].iter().map(|s| s.to_string()),
        );
        let colours = ColourScale::new(set);
        assert_eq!(colours.colour_of("SUV"), colours.colour_of("SUV"));
        assert_ne!(colours.colour_of("SUV"), colours.colour_of("Sedan"));
    }

    proptest! {
        #[test]
        fn apply_is_monotone_on_the_domain(
            domain in 1.0f64..1e6,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let scale = LinearScale::new(domain, 100.0);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.apply(lo * domain) <= scale.apply(hi * domain));
        }
    }
}
