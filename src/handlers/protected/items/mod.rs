pub mod list;
pub mod update_batch;

pub use list::list_get;
pub use update_batch::update_batch_post;
