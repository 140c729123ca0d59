pub mod forms;
pub mod registry;
pub mod types;

#[allow(clippy::unwrap_used)]
#[cfg(test)]
pub(crate) mod test_utils;
