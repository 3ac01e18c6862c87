pub mod numeric_ids;
