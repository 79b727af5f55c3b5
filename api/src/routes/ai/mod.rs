pub mod ai_response_route;
pub mod ai_reply;
