//! Documentation values flowing between extractor, merge engine and assembler

/// Leading documentation comment of one declaration piece
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawComment {
    #[default]
    Absent,
    /// Content with comment markers stripped
    Text(String),
}

impl RawComment {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Text(text) => Some(text),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// XML body to emit for a symbol, without the `<member>` wrapper
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MergedDocumentation {
    #[default]
    None,
    Body(String),
}

impl MergedDocumentation {
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Body(body) => Some(body),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<RawComment> for MergedDocumentation {
    fn from(comment: RawComment) -> Self {
        match comment {
            RawComment::Absent => Self::None,
            RawComment::Text(text) => Self::Body(text),
        }
    }
}
