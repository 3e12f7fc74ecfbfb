pub mod emission;
pub mod order;
pub mod value;

pub use emission::*;
pub use order::*;
pub use value::*;
