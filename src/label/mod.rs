//! Label stores: the dominance-pruned sets of labels kept per node.

pub mod store;

pub use store::{Evicted, Insertion, LabelStore};
