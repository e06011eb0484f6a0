mod driver;
mod rider;
mod route;
mod trip;

pub use driver::Driver;
pub use rider::Rider;
pub use route::Route;
pub use trip::{Status as TripStatus, Trip, TripId};
