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

pub fn render(car: &Car) -> String {
    let mut panel = String::new();
    panel.push_str(&format!("{}\n", car.name));
    panel.push_str(&format!("Type: {}\n", car.car_type));
    panel.push_str(&format!("AWD: {} | RWD: {}\n", car.awd, car.rwd));
    panel.push_str(&format!("Retail Price: ${}\n", car.retail_price));
    panel.push_str(&format!("Dealer Cost: ${}\n", car.dealer_cost));
    panel.push_str(&format!("Engine Size: {}L\n", car.engine_size));
    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_field_verbatim() {
        let car = Car {
            name: "Acme Trail".to_string(),
            car_type: "SUV".to_string(),
            retail_price: 30000.0,
            dealer_cost: 27500.0,
            horsepower: 200.0,
            city_mpg: 16.0,
            weight: 4400.0,
            engine_size: 4.0,
            awd: 1.0,
            rwd: 0.0,
            cyl: 8.0,
        };
        let panel = render(&car);
        assert!(panel.starts_with("Acme Trail\n"));
        assert!(panel.contains("Type: SUV"));
        assert!(panel.contains("AWD: 1 | RWD: 0"));
        assert!(panel.contains("Retail Price: $30000"));
        assert!(panel.contains("Dealer Cost: $27500"));
        assert!(panel.contains("Engine Size: 4L"));
    }
}
