use actix_web::web;

pub mod session_handler;
pub mod syllabus_handler;
pub mod tutor_handler;

pub use session_handler::{
    create_session, end_session, get_options, get_session, health_check, set_credential,
    update_settings,
};
pub use syllabus_handler::{add_topic, remove_topic, toggle_topic};
pub use tutor_handler::{request_explanation, request_quiz, submit_answer};

/// Registers every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(get_options)
        .service(create_session)
        .service(get_session)
        .service(end_session)
        .service(update_settings)
        .service(set_credential)
        .service(request_explanation)
        .service(request_quiz)
        .service(submit_answer)
        .service(add_topic)
        .service(remove_topic)
        .service(toggle_topic);
}
