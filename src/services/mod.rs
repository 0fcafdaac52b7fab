pub mod model_service;
pub mod prompt_builder;
pub mod quiz_parser;
pub mod session_service;
pub mod tutor_service;

pub use session_service::SessionService;
pub use tutor_service::TutorService;
