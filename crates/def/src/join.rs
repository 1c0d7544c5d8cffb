use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinType {
    /// Whether rows of the right input survive without a match.
    pub const fn preserves_right(&self) -> bool {
        matches!(self, Self::RightOuter | Self::FullOuter)
    }
}

impl Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Inner => "inner",
                Self::LeftOuter => "left outer",
                Self::RightOuter => "right outer",
                Self::FullOuter => "full outer",
                Self::Cross => "cross",
            }
        )
    }
}
