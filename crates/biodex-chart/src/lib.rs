//! Animal speed chart.
//!
//! Loads a static `name,speed,diet` CSV, keeps the rows with a positive
//! numeric speed and a diet of carnivore, herbivore or omnivore, ranks them
//! by speed and renders the fastest as an SVG bar chart.
//!
//! # Example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), biodex_chart::ChartError> {
//!     let top = biodex_chart::load_top_animals("static/sample_animals.csv", 20).await?;
//!     let svg = biodex_chart::render_svg(&top, 800);
//!     println!("{}", svg);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::debug;

pub mod data;
pub mod scale;
pub mod svg;

pub use data::{parse_animals, top_by_speed, AnimalDatum, Diet};
pub use svg::render_svg;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Read the CSV at `path` and return its `n` fastest valid rows.
pub async fn load_top_animals(path: impl AsRef<Path>, n: usize) -> Result<Vec<AnimalDatum>, ChartError> {
    let path = path.as_ref();
    debug!("Loading animal speeds from {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;
    let rows = parse_animals(&content)?;
    Ok(top_by_speed(rows, n))
}
