pub mod db;
pub mod list_item;
