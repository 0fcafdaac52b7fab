pub mod request;
pub mod response;

pub use request::{
    AddTopicRequest, ExplainRequest, SetCredentialRequest, SubmitAnswerRequest,
    UpdateSettingsRequest,
};
pub use response::{OptionsDto, QuizDto, SessionDto, SyllabusDto};
