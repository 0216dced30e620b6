pub mod errors;
pub mod db;
pub mod object_id;
pub mod product;

#[cfg(test)]
mod tests;
