pub mod query_date;
