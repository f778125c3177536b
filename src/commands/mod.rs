pub mod archive;
pub mod common;
pub mod train_sync;

pub use archive::Archive;
pub use common::RunOptions;
pub use train_sync::TrainSync;
