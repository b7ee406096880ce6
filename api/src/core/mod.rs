pub mod app_state;
pub mod auth;
pub mod http;

#[cfg(test)]
pub mod test_support;
