mod app_error;
mod operation;
mod trams_app;

pub use app_error::TramsAppError;
pub use operation::TramsOperation;
pub use trams_app::TramsApp;
