/// Visibility and enabled state of the previous/next controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavState {
    pub hidden: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl NavState {
    pub fn compute(len: usize, active: Option<usize>) -> Self {
        let has_multiple = len > 1;
        let prev_disabled = !has_multiple || active.map_or(true, |index| index == 0);
        let next_disabled = !has_multiple || active.map_or(true, |index| index + 1 >= len);
        Self {
            hidden: !has_multiple,
            prev_disabled,
            next_disabled,
        }
    }
}
