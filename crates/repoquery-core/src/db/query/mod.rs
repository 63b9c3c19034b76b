mod page;
mod prepared;

#[cfg(test)]
mod tests;

pub use page::PageRequest;
pub use prepared::{BoundParameters, HintSet, PreparedQuery, QueryKind};
