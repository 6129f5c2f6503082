mod game_store;
mod json_file_store;
mod store_error;

pub use game_store::GameStore;
pub use json_file_store::JsonFileStore;
pub use store_error::StoreError;
