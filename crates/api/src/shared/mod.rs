#[cfg(test)]
pub mod testing;
pub mod usecase;
pub mod versioned;
