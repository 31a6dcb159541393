mod item;

pub use item::{Item, NewItem, RawItem, UNCLASSIFIED};
