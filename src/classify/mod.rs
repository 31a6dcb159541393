mod aliases;
mod classifier;

pub use aliases::AliasTable;
pub use classifier::Classifier;
