pub mod applicants;
pub mod theme;

pub use theme::ColorScheme;
