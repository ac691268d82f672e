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

use crate::error::{DataError, DataResult};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

pub const NAME_HEADER: &str = "Name";
pub const TYPE_HEADER: &str = "Type";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub name: String,
    pub car_type: String,
    pub retail_price: f64,
    pub dealer_cost: f64,
    pub horsepower: f64,
    pub city_mpg: f64,
    pub weight: f64,
    pub engine_size: f64,
    pub awd: f64,
    pub rwd: f64,
    pub cyl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericField {
    RetailPrice,
    DealerCost,
    Horsepower,
    CityMpg,
    Weight,
    EngineSize,
    Awd,
    Rwd,
    Cyl,
}

impl NumericField {
    pub const ALL: [NumericField; 9] = [
        NumericField::RetailPrice,
        NumericField::DealerCost,
        NumericField::Horsepower,
        NumericField::CityMpg,
        NumericField::Weight,
        NumericField::EngineSize,
        NumericField::Awd,
        NumericField::Rwd,
        NumericField::Cyl,
    ];
    pub fn header(&self) -> &'static str {
        match self {
            NumericField::RetailPrice => "Retail Price",
            NumericField::DealerCost => "Dealer Cost",
            NumericField::Horsepower => "Horsepower(HP)",
            NumericField::CityMpg => "City Miles Per Gallon",
            NumericField::Weight => "Weight",
            NumericField::EngineSize => "Engine Size (l)",
            NumericField::Awd => "AWD",
            NumericField::Rwd => "RWD",
            NumericField::Cyl => "Cyl",
        }
    }
    pub fn of(&self, car: &Car) -> f64 {
        match self {
            NumericField::RetailPrice => car.retail_price,
            NumericField::DealerCost => car.dealer_cost,
            NumericField::Horsepower => car.horsepower,
            NumericField::CityMpg => car.city_mpg,
            NumericField::Weight => car.weight,
            NumericField::EngineSize => car.engine_size,
            NumericField::Awd => car.awd,
            NumericField::Rwd => car.rwd,
            NumericField::Cyl => car.cyl,
        }
    }
}

pub fn coerce(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> DataResult<Vec<Car>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|source| {
        log::error!("failed to open dataset '{}': {source}", path.display());
        DataError::DataFileError {
            path: path.display().to_string(),
            source,
        }
    })?;
    parse_records(reader)
}

pub fn from_reader<R: Read>(rdr: R) -> DataResult<Vec<Car>> {
    parse_records(csv::Reader::from_reader(rdr))
}

fn parse_records<R: Read>(mut reader: csv::Reader<R>) -> DataResult<Vec<Car>> {
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let name_col = column(NAME_HEADER);
    let type_col = column(TYPE_HEADER);
    let numeric_cols: Vec<(NumericField, Option<usize>)> = NumericField::ALL
        .iter()
        .map(|&field| (field, column(field.header())))
        .collect();
    let mut cars = Vec::new();
    for result in reader.records() {
        let record = result?;
        let text = |col: Option<usize>| {
            col.and_then(|i| record.get(i)).unwrap_or_default().to_string()
        };
        let number = |field: NumericField| {
            let col = numeric_cols
                .iter()
                .find(|(f, _)| *f == field)
                .and_then(|(_, col)| *col);
            coerce(col.and_then(|i| record.get(i)))
        };
        cars.push(Car {
            name: text(name_col),
            car_type: text(type_col),
            retail_price: number(NumericField::RetailPrice),
            dealer_cost: number(NumericField::DealerCost),
            horsepower: number(NumericField::Horsepower),
            city_mpg: number(NumericField::CityMpg),
            weight: number(NumericField::Weight),
            engine_size: number(NumericField::EngineSize),
            awd: number(NumericField::Awd),
            rwd: number(NumericField::Rwd),
            cyl: number(NumericField::Cyl),
        });
    }
    Ok(cars)
}

pub fn max_of(cars: &[Car], field: NumericField) -> f64 {
    cars.iter()
        .map(|car| field.of(car))
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Name,Type,Retail Price,Dealer Cost,Horsepower(HP),City Miles Per Gallon,Weight,Engine Size (l),AWD,RWD,Cyl
Acme Roadster,Sports,43000,39500,300,18,3200,3.2,0,1,6
Acme Family,Sedan,21000,19800,160,24,3100,2.4,0,0,4
Acme Trail,SUV,not-a-price,31000,250,16,4400,4.0,1,0,8
";

    #[test]
    fn parses_rows_and_coerces_numbers() {
        let cars = from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(cars.len(), 3);
        assert_eq!(cars[0].name, "Acme Roadster");
        assert_eq!(cars[0].car_type, "Sports");
        assert_eq!(cars[0].horsepower, 300.0);
        assert_eq!(cars[1].retail_price, 21000.0);
        assert_eq!(cars[2].awd, 1.0);
    }

    #[test]
    fn unparsable_cell_becomes_nan() {
        let cars = from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(cars[2].retail_price.is_nan());
    }

    #[test]
    fn missing_column_becomes_nan_for_every_row() {
        let csv = "Name,Type,Horsepower(HP)\nA,Sedan,120\nB,SUV,210\n";
        let cars = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(cars.len(), 2);
        assert!(cars.iter().all(|c| c.retail_price.is_nan()));
        assert!(cars.iter().all(|c| c.weight.is_nan()));
        assert_eq!(cars[1].horsepower, 210.0);
    }

    #[test]
    fn loads_from_a_real_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let cars = load_csv(file.path()).unwrap();
        assert_eq!(cars.len(), 3);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_csv("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DataError::DataFileError { .. }));
    }

    #[test]
    fn max_ignores_nan() {
        let cars = from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(max_of(&cars, NumericField::RetailPrice), 43000.0);
        assert_eq!(max_of(&cars, NumericField::Horsepower), 300.0);
    }

    #[test]
    fn max_of_empty_is_zero() {
        assert_eq!(max_of(&[], NumericField::Weight), 0.0);
    }
}
