/// Everything a renderer can ask of the savings screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    GoalTextChanged(String),
    AmountTextChanged(String),
    AddPressed,
    WithdrawPressed,
    ResetPressed,
    /// Tap outside the input fields. Only drops input focus in the renderer.
    BackgroundTap,
}
