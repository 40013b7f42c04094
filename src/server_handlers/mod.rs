pub mod preview;
pub mod calendario;
pub mod feriados;
pub mod docs;

pub use preview::*;
pub use calendario::*;
pub use feriados::*;
pub use docs::*;
