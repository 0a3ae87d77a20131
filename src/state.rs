/// Phase of the single-pointer gesture state machine
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

impl GestureState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing => "drawing",
        }
    }
}
