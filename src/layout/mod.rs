//! Layout engine: text measurement, block heights and pagination.

mod diagnostic;
pub mod fonts;
mod geometry;
mod height;
mod metrics;
mod paginator;
#[cfg(feature = "ttf")]
mod ttf;

pub use diagnostic::Diagnostic;
pub use geometry::{FontSizePreset, PageGeometry, TextAlign};
pub use height::HeightEstimator;
pub use metrics::{CharClass, FixedWidthMetrics, FontMetricsProvider, TextExtent, TextMetrics};
pub use paginator::{pack, PackItem, PackedPage, Packing, Pagination, Paginator};
#[cfg(feature = "ttf")]
pub use ttf::TtfMetrics;
