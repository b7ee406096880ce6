pub mod rag_base_config;
pub mod search_options;
pub mod search_result;
