pub mod question_page_route;
