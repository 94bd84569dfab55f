pub use convert::*;
pub use list::*;

mod convert;
mod list;
