//! Directory browsing core: viewport windowing, back-navigation history,
//! selection rules and the state machine tying them together.

pub mod machine;
pub mod policy;
pub mod stack;
pub mod viewport;

pub use machine::{Browser, Effect, Input, ListingMessage, ListingRequest, Phase, SessionOptions, Snapshot};
pub use policy::{EffectiveType, SelectionPolicy};
