/// Kotlin style scope function, handy at the end of long iterator chains.
pub trait LetAlso: Sized {
    fn let_owned<R, F>(self, block: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        block(self)
    }
}

impl<T> LetAlso for T {}
