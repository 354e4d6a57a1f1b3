pub mod health;
pub mod links;

pub use health::health_handler;
pub use links::{
    bulk_create_handler, bulk_delete_handler, cache_status_handler, create_link_handler,
    delete_link_handler, get_link_handler, list_links_handler, redirect_handler,
};
