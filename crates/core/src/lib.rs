//! Domain logic shared by the terminal and browser dashboards.
//!
//! Nothing here performs I/O: the apps fetch the statistics and the boundary
//! dataset, hand the bodies to [`summary`] and [`topology`], and draw what
//! [`aggregate`], [`choropleth`] and [`showcase`] derive from them.

pub mod aggregate;
pub mod choropleth;
pub mod color;
pub mod error;
pub mod page;
pub mod raster;
pub mod regions;
pub mod schedule;
pub mod showcase;
pub mod suggestion;
pub mod summary;
pub mod topology;

pub use aggregate::{Aggregate, CountryRank, DailyPoint, Dashboard};
pub use choropleth::Choropleth;
pub use color::Rgba;
pub use error::DashboardError;
pub use showcase::{ShowcaseFrame, ShowcaseInput};
pub use suggestion::Suggestion;
pub use summary::{DailySummary, SummaryCollection};
