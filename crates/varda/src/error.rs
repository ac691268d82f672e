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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Data loading error: {0}")]
    Data(#[from] DataError),
    #[error("Chart construction error: {0}")]
    Chart(#[from] ChartError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] SerialisationError),
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read data file '{path}': {source}")]
    DataFileError {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Malformed record: {0}")]
    Csv(#[from] csv::Error),
    #[error("Empty dataset provided")]
    EmptyDataset,
}
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Star plot requires at least {required} axes, have {available}")]
    NotEnoughAxes { required: usize, available: usize },
    #[error("Record index {index} out of range for {len} loaded records")]
    RecordOutOfRange { index: usize, len: usize },
}
#[derive(Error, Debug)]
pub enum SerialisationError {
    #[error("JSON serialisation failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Nothing is selected to export")]
    NothingSelected,
}
pub type Result<T> = std::result::Result<T, ExplorerError>;
pub type DataResult<T> = std::result::Result<T, DataError>;
pub type ChartResult<T> = std::result::Result<T, ChartError>;
impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::Serialisation(SerialisationError::Json { source: err })
    }
}
impl ExplorerError {
    pub fn category(&self) -> &'static str {
        match self {
            ExplorerError::Data(_) => "Data",
            ExplorerError::Chart(_) => "Chart",
            ExplorerError::Io(_) => "I/O",
            ExplorerError::Serialisation(_) => "Serialisation",
        }
    }
}
