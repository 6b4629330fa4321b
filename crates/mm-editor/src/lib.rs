pub mod commands;
pub mod controller;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod tools;
pub mod viewport;

pub use commands::{CommandStack, Snapshot};
pub use controller::Controller;
pub use input::{InputEvent, Modifiers};
pub use session::{EditorConfig, EditorSession, SessionEvent, Subscription};
pub use store::{MemoryStore, SnapshotStore};
pub use viewport::Camera;
