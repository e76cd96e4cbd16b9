#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos { x: $x, y: $y }
    };
}

impl Pos {
    /// adds an offset, or `None` when either axis leaves the `i32` range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(pos!(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

#[test]
fn test_checked_add() {
    assert_eq!(pos!(1, 2).checked_add(pos!(-1, 1)), Some(pos!(0, 3)));
    assert_eq!(pos!(i32::MAX, 0).checked_add(pos!(1, 0)), None);
    assert_eq!(pos!(0, i32::MIN).checked_add(pos!(0, -1)), None);
}
