pub mod contact;
pub mod content;
pub mod indicator;
pub mod logging;
pub mod navigation;
pub mod scroll;
pub mod view_state;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
