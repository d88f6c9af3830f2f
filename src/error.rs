// Every variant states *where* things went wrong.
use crate::booking::mailer::MailError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening or decoding the base image failed
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// Reading or parsing the config file failed
    #[error("config error: {0}")]
    Config(String),

    /// A breakpoint table violated its ordering rules
    #[error("breakpoint table error: {0}")]
    Breakpoints(String),

    /// Dispatching an email failed
    #[error(transparent)]
    Mail(#[from] MailError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn breakpoints(msg: impl Into<String>) -> Self {
        Self::Breakpoints(msg.into())
    }
}
