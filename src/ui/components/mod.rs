pub mod bid_form;
pub mod bid_summary;
pub mod bid_table;
pub mod login_form;
