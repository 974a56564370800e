//! Yes/no question screen.
//!
//! Built empty, then configured once with its content and answer handler.
//! The answer is only handed out on submit, and only if one was chosen.

use tracing::debug;

/// Receives the chosen answer on a successful submit.
pub type AnswerHandler = Box<dyn Fn(bool) + Send + Sync>;

/// Everything the screen displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionContent {
    /// 1-based page number
    pub position: usize,
    pub total: usize,
    pub title: String,
    pub detail: String,
    pub error_text: String,
    pub affirm_text: String,
    pub deny_text: String,
    pub action_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOption {
    Affirm,
    Deny,
}

impl AnswerOption {
    fn answer(self) -> bool {
        matches!(self, AnswerOption::Affirm)
    }
}

/// Stage of a long-press gesture on one of the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollTarget {
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Answered(bool),
    ValidationFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question position {position} is outside 1..={total}")]
    PositionOutOfRange { position: usize, total: usize },
    #[error("question screen used before configure")]
    NotConfigured,
    #[error("question screen already configured")]
    AlreadyConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
    /// Pressed preview while a long press is held
    pub highlighted: bool,
}

/// Render snapshot of the screen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuestionView {
    pub page_label: String,
    pub page_accessibility_label: String,
    pub title: String,
    pub detail: String,
    pub error_text: String,
    pub error_visible: bool,
    pub affirm: OptionView,
    pub deny: OptionView,
    pub action_text: String,
    pub scrolled_to: Option<ScrollTarget>,
}

struct Configured {
    content: QuestionContent,
    on_answered: AnswerHandler,
}

#[derive(Default)]
pub struct QuestionScreen {
    configured: Option<Configured>,
    answer: Option<bool>,
    pressed: Option<AnswerOption>,
    error_visible: bool,
    scrolled_to: Option<ScrollTarget>,
}

impl QuestionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(
        &mut self,
        content: QuestionContent,
        on_answered: AnswerHandler,
    ) -> Result<(), QuestionError> {
        if self.configured.is_some() {
            return Err(QuestionError::AlreadyConfigured);
        }
        if content.position == 0 || content.position > content.total {
            return Err(QuestionError::PositionOutOfRange {
                position: content.position,
                total: content.total,
            });
        }
        self.configured = Some(Configured {
            content,
            on_answered,
        });
        Ok(())
    }

    pub fn answer(&self) -> Option<bool> {
        self.answer
    }

    /// A tap also ends any press preview still showing on either option.
    pub fn select(&mut self, option: AnswerOption) -> Result<(), QuestionError> {
        self.ensure_configured()?;
        self.pressed = None;
        self.answer = Some(option.answer());
        Ok(())
    }

    pub fn select_affirm(&mut self) -> Result<(), QuestionError> {
        self.select(AnswerOption::Affirm)
    }

    pub fn select_deny(&mut self) -> Result<(), QuestionError> {
        self.select(AnswerOption::Deny)
    }

    /// Holding an option only previews it; releasing commits, however short the hold.
    pub fn long_press(&mut self, option: AnswerOption, phase: PressPhase) -> Result<(), QuestionError> {
        self.ensure_configured()?;
        match phase {
            PressPhase::Began | PressPhase::Changed => self.pressed = Some(option),
            PressPhase::Ended => {
                self.pressed = None;
                self.select(option)?;
            }
            PressPhase::Cancelled => self.pressed = None,
        }
        Ok(())
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, QuestionError> {
        let configured = self.configured.as_ref().ok_or(QuestionError::NotConfigured)?;
        match self.answer {
            Some(answer) => {
                debug!(answer, position = configured.content.position, "question answered");
                (configured.on_answered)(answer);
                Ok(SubmitOutcome::Answered(answer))
            }
            None => {
                debug!(position = configured.content.position, "question submitted without an answer");
                self.error_visible = true;
                self.scrolled_to = Some(ScrollTarget::Error);
                Ok(SubmitOutcome::ValidationFailed)
            }
        }
    }

    pub fn view(&self) -> Result<QuestionView, QuestionError> {
        let content = &self
            .configured
            .as_ref()
            .ok_or(QuestionError::NotConfigured)?
            .content;
        let option = |option: AnswerOption, text: &str| OptionView {
            text: text.to_string(),
            selected: self.answer == Some(option.answer()),
            highlighted: self.pressed == Some(option),
        };

        Ok(QuestionView {
            page_label: format!("{}/{}", content.position, content.total),
            page_accessibility_label: format!("Step {} of {}", content.position, content.total),
            title: content.title.clone(),
            detail: content.detail.clone(),
            error_text: content.error_text.clone(),
            error_visible: self.error_visible,
            affirm: option(AnswerOption::Affirm, &content.affirm_text),
            deny: option(AnswerOption::Deny, &content.deny_text),
            action_text: content.action_text.clone(),
            scrolled_to: self.scrolled_to,
        })
    }

    fn ensure_configured(&self) -> Result<(), QuestionError> {
        match self.configured {
            Some(_) => Ok(()),
            None => Err(QuestionError::NotConfigured),
        }
    }
}
