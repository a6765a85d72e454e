pub mod composition;
mod count;
mod element;
pub mod element_table;
