// Requests
pub mod todo_create_request;
pub mod todo_update_request;
pub mod login_request;
pub mod user_create_request;
pub mod todo_list_query;


// Responses
pub mod todo_out;
pub mod token;
pub mod user_out;
