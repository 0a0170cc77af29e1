/// Length of the run of `true` at the end of an oldest-first flag sequence.
pub fn trailing_streak<I>(flags: I) -> usize
where
    I: DoubleEndedIterator<Item = bool>,
{
    flags.rev().take_while(|hit| *hit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_the_tail_run() {
        assert_eq!(trailing_streak([true, true, false, true, true].into_iter()), 2);
        assert_eq!(trailing_streak([true, false].into_iter()), 0);
        assert_eq!(trailing_streak(std::iter::empty::<bool>()), 0);
        assert_eq!(trailing_streak([true; 4].into_iter()), 4);
    }
}
