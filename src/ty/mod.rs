mod table;
pub use table::{NamedValues, TableShow};
