// Domain layer module
pub mod base;
pub mod value_objects;
pub mod entities;
pub mod slot;
pub mod events;

pub use base::*;
pub use value_objects::*;
pub use entities::*;
pub use slot::*;
pub use events::*;
