/// Business logic services layer
mod apod;
mod epic;
mod mars;

pub use apod::ApodService;
pub use epic::EpicService;
pub use mars::MarsService;
