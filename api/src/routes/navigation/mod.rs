pub mod jump_route;
pub mod navigation_info_route;
pub mod navigation_response;
pub mod next_question_route;
pub mod number_route;
pub mod previous_question_route;
