pub mod generate_quiz_request;
pub mod generate_quiz_response;
pub mod generate_quiz_route;
pub mod quiz_prompt;
pub mod submit_quiz_request;
pub mod submit_quiz_response;
pub mod submit_quiz_route;
