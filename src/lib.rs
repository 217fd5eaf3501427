pub mod compositor;
pub mod icon_gen;
pub mod inspect;
pub mod style;

pub use icon_gen::generate_icon;
