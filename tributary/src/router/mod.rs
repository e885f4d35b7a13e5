#[macro_use]
mod macros;

pub mod categories;
pub mod dispatch;
pub mod fallback;
pub mod util;
