
//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
    pub mod error;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
    pub mod validation;
}

pub use shared::models::*;
pub use shared::dto::*;
pub use shared::validation;
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod auth;
}
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
}
//---------------------------------------
