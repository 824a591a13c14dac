pub mod error;
pub mod params;
pub mod result;
pub mod value;

pub use error::*;
pub use params::*;
pub use result::*;
pub use value::*;
