//! Entity API operations

mod entity;
mod gl_slips;
mod sales_service_prices;

pub use entity::*;
pub use gl_slips::*;
pub use sales_service_prices::*;
