pub(crate) mod audio;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod narration;
pub(crate) mod state;
pub(crate) mod timer;
