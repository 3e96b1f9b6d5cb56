pub mod callback;
pub mod object_store;
pub mod s3_store;
