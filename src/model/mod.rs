//! # Resource Graph Model
//!
//! Plain data shared by the graph, the label stores and the engine.
//! These types cross every boundary: graph ↔ engine ↔ caller.
//!
//! Design rule: this module is pure data with no I/O and no run state.

pub mod node;
pub mod edge;
pub mod resource;
pub mod label;
pub mod path;

pub use node::NodeId;
pub use edge::Edge;
pub use resource::{Resource, ResourceVector};
pub use label::{Label, LabelArena, LabelId};
pub use path::Path;
