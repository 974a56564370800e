//! Self-diagnosis use cases.

mod question;

pub use question::{
    AnswerHandler, AnswerOption, OptionView, PressPhase, QuestionContent, QuestionError,
    QuestionScreen, QuestionView, ScrollTarget, SubmitOutcome,
};
