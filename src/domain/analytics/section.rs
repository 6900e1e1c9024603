/// Lifecycle of one independently fetched slice of page state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Section<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// The fetch failed; the reason is shown in place of the section.
    Failed(String),
}

impl<T> Section<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => Self::Failed(error.to_string()),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Section<U> {
        match self {
            Self::Idle => Section::Idle,
            Self::Loading => Section::Loading,
            Self::Loaded(value) => Section::Loaded(f(value)),
            Self::Failed(reason) => Section::Failed(reason),
        }
    }
}
